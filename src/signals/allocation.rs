//! Score shifting, capital allocation and interactive redistribution

use serde::Serialize;
use std::collections::BTreeMap;

/// Percentages are expressed against this base.
pub const FULL_POOL: f64 = 100.0;

/// Tolerance used when checking that a weight set sums to the full pool.
pub const SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationResult {
    /// Amount added to every raw score so the lowest one lands on zero
    pub shift: f64,
    pub adjusted: BTreeMap<String, f64>,
    pub allocations: BTreeMap<String, f64>,
    /// True when the weighted total was zero and the fallback was used
    pub fallback: bool,
}

/// Shift raw scores so the minimum is zero when it is negative.
///
/// Returns the applied shift and the adjusted scores. When every raw score is
/// already non-negative nothing is shifted, so the lowest adjusted score is
/// not necessarily zero.
pub fn shift_scores(raw_scores: &BTreeMap<String, f64>) -> (f64, BTreeMap<String, f64>) {
    let min_score = raw_scores
        .values()
        .copied()
        .fold(f64::INFINITY, f64::min);
    let shift = if min_score.is_finite() && min_score < 0.0 {
        -min_score
    } else {
        0.0
    };
    let adjusted = raw_scores
        .iter()
        .map(|(id, score)| (id.clone(), score + shift))
        .collect();
    (shift, adjusted)
}

/// Distribute `pool` across instruments proportionally to their adjusted
/// scores, optionally blended with per-instrument origin weights.
///
/// Instruments missing from `origin_weights` get a weight of zero. When the
/// weighted total is zero the origin weights are returned unchanged, or an
/// equal split of `pool` when no origin weights are given.
pub fn normalize(
    raw_scores: &BTreeMap<String, f64>,
    origin_weights: Option<&BTreeMap<String, f64>>,
    pool: f64,
) -> AllocationResult {
    let (shift, adjusted) = shift_scores(raw_scores);

    let weighted: BTreeMap<String, f64> = adjusted
        .iter()
        .map(|(id, score)| {
            let weight = match origin_weights {
                Some(origin) => origin.get(id).copied().unwrap_or(0.0),
                None => 1.0,
            };
            (id.clone(), score * weight)
        })
        .collect();
    let total: f64 = weighted.values().sum();

    let (allocations, fallback) = if total == 0.0 {
        let fallback = match origin_weights {
            Some(origin) => adjusted
                .keys()
                .map(|id| (id.clone(), origin.get(id).copied().unwrap_or(0.0)))
                .collect(),
            None => equal_split(adjusted.keys(), pool),
        };
        (fallback, true)
    } else {
        let allocations = weighted
            .iter()
            .map(|(id, w)| (id.clone(), w / total * pool))
            .collect();
        (allocations, false)
    };

    AllocationResult {
        shift,
        adjusted,
        allocations,
        fallback,
    }
}

/// Split `pool` equally across the given ids.
pub fn equal_split<'a, I>(ids: I, pool: f64) -> BTreeMap<String, f64>
where
    I: IntoIterator<Item = &'a String>,
    I::IntoIter: ExactSizeIterator,
{
    let ids = ids.into_iter();
    let count = ids.len();
    if count == 0 {
        return BTreeMap::new();
    }
    let share = pool / count as f64;
    ids.map(|id| (id.clone(), share)).collect()
}

/// Whether a weight set drifts away from summing to the full pool.
pub fn drifts_from_full_pool(weights: &BTreeMap<String, f64>) -> bool {
    let total: f64 = weights.values().sum();
    (total - FULL_POOL).abs() > SUM_TOLERANCE
}

/// Apply a user edit of one recommended percentage while keeping the set
/// summing to 100.
///
/// `new_value` is clamped to `[0, 100]`. The other entries are scaled by
/// `remaining / old_remaining` to keep their proportions, or share
/// `remaining` equally when they cannot be scaled. The result is finally
/// renormalized to absorb floating-point drift.
pub fn redistribute(
    weights: &BTreeMap<String, f64>,
    changed: &str,
    new_value: f64,
) -> BTreeMap<String, f64> {
    let value = new_value.clamp(0.0, FULL_POOL);
    let old_value = weights.get(changed).copied().unwrap_or(0.0);
    let remaining = FULL_POOL - value;
    let old_remaining = FULL_POOL - old_value;

    let others: Vec<&String> = weights.keys().filter(|id| id.as_str() != changed).collect();

    let mut updated: BTreeMap<String, f64> = if others.is_empty() || old_remaining <= 0.0 {
        let share = if others.is_empty() {
            0.0
        } else {
            remaining / others.len() as f64
        };
        others.iter().map(|id| ((*id).clone(), share)).collect()
    } else {
        let factor = remaining / old_remaining;
        others
            .iter()
            .map(|id| ((*id).clone(), weights[id.as_str()] * factor))
            .collect()
    };
    updated.insert(changed.to_string(), value);

    let total: f64 = updated.values().sum();
    if total > 0.0 {
        let scale = FULL_POOL / total;
        for weight in updated.values_mut() {
            *weight *= scale;
        }
    }
    updated
}
