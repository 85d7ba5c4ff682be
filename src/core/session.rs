//! Per-session mutable state: origin weights, edited recommendations and
//! chart window selections.
//!
//! One interactive session owns one `SessionState`. Every edit recomputes the
//! affected map and replaces it as a whole.

use crate::error::DashboardError;
use crate::models::timeframe::TimeframeSet;
use crate::signals::allocation::{drifts_from_full_pool, equal_split, redistribute, FULL_POOL};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    instruments: Vec<String>,
    origin_weights: BTreeMap<String, f64>,
    recommendations: BTreeMap<String, f64>,
    recommendations_edited: bool,
    chart_windows: BTreeMap<String, String>,
    default_chart_window: String,
    threshold_pct: Option<f64>,
}

impl SessionState {
    pub fn new(instruments: Vec<String>, default_chart_window: impl Into<String>) -> Self {
        let origin_weights = equal_split(instruments.iter(), FULL_POOL);
        Self {
            recommendations: origin_weights.clone(),
            origin_weights,
            instruments,
            recommendations_edited: false,
            chart_windows: BTreeMap::new(),
            default_chart_window: default_chart_window.into(),
            threshold_pct: None,
        }
    }

    pub fn instruments(&self) -> &[String] {
        &self.instruments
    }

    fn ensure_known(&self, name: &str) -> Result<(), DashboardError> {
        if self.instruments.iter().any(|n| n == name) {
            Ok(())
        } else {
            Err(DashboardError::UnknownInstrument(name.to_string()))
        }
    }

    pub fn origin_weights(&self) -> &BTreeMap<String, f64> {
        &self.origin_weights
    }

    /// Set one origin weight, clamped to `[0, 100]`. Values are accepted
    /// even when the set no longer sums to 100.
    pub fn set_origin_weight(&mut self, name: &str, value: f64) -> Result<f64, DashboardError> {
        self.ensure_known(name)?;
        let value = value.clamp(0.0, FULL_POOL);
        let mut weights = self.origin_weights.clone();
        weights.insert(name.to_string(), value);
        self.origin_weights = weights;
        self.recommendations_edited = false;
        Ok(value)
    }

    pub fn reset_origin_weights(&mut self) {
        self.origin_weights = equal_split(self.instruments.iter(), FULL_POOL);
        self.recommendations_edited = false;
    }

    /// True when the origin weights do not sum to 100.
    pub fn origin_drift(&self) -> bool {
        drifts_from_full_pool(&self.origin_weights)
    }

    pub fn recommendations(&self) -> &BTreeMap<String, f64> {
        &self.recommendations
    }

    pub fn recommendations_edited(&self) -> bool {
        self.recommendations_edited
    }

    /// Replace the recommendations with freshly computed ones unless the user
    /// has edited them since the last origin change or refresh.
    pub fn offer_recommendations(&mut self, computed: BTreeMap<String, f64>) {
        if !self.recommendations_edited {
            self.recommendations = computed;
        }
    }

    /// Threshold of the last recommendation computation, if any.
    pub fn threshold_pct(&self) -> Option<f64> {
        self.threshold_pct
    }

    pub fn record_threshold(&mut self, threshold_pct: f64) {
        self.threshold_pct = Some(threshold_pct);
    }

    /// Edit one recommended percentage and redistribute the others.
    pub fn edit_recommendation(
        &mut self,
        name: &str,
        value: f64,
    ) -> Result<&BTreeMap<String, f64>, DashboardError> {
        self.ensure_known(name)?;
        self.recommendations = redistribute(&self.recommendations, name, value);
        self.recommendations_edited = true;
        Ok(&self.recommendations)
    }

    /// Drop user edits so the next computation takes over again.
    pub fn clear_recommendation_edits(&mut self) {
        self.recommendations_edited = false;
    }

    pub fn chart_window(&self, name: &str) -> &str {
        self.chart_windows
            .get(name)
            .map(String::as_str)
            .unwrap_or(&self.default_chart_window)
    }

    pub fn select_chart_window(
        &mut self,
        name: &str,
        label: &str,
        timeframes: &TimeframeSet,
    ) -> Result<(), DashboardError> {
        self.ensure_known(name)?;
        if timeframes.get(label).is_none() {
            return Err(DashboardError::UnknownTimeframe(label.to_string()));
        }
        self.chart_windows.insert(name.to_string(), label.to_string());
        Ok(())
    }
}
