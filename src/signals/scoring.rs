//! Deviation scoring: maps a relative price deviation onto a discrete tier

use crate::models::score::DeviationTier;

/// Relative deviation of `last` from `mean`.
///
/// The caller guarantees `mean != 0.0`.
pub fn relative_deviation(last: f64, mean: f64) -> f64 {
    (last - mean) / mean
}

/// Score a relative deviation against a threshold expressed in percent.
///
/// `threshold_pct` must be strictly positive. The mapping is a step function:
///
/// | condition          | tier           |
/// |--------------------|----------------|
/// | `diff <= -t`       | `StrongBuy`    |
/// | `-t < diff < 0`    | `Buy`          |
/// | `diff == 0`        | `Neutral`      |
/// | `0 < diff < t`     | `Reduce`       |
/// | `diff >= t`        | `StrongReduce` |
///
/// where `t = threshold_pct / 100`.
pub fn score_deviation(diff: f64, threshold_pct: f64) -> DeviationTier {
    let t = threshold_pct / 100.0;
    if diff <= -t {
        DeviationTier::StrongBuy
    } else if diff < 0.0 {
        DeviationTier::Buy
    } else if diff == 0.0 {
        DeviationTier::Neutral
    } else if diff < t {
        DeviationTier::Reduce
    } else {
        DeviationTier::StrongReduce
    }
}

/// Score the deviation of `last` from `mean`, `None` when the mean is zero.
pub fn score_against_mean(
    last: f64,
    mean: f64,
    threshold_pct: f64,
) -> Option<(DeviationTier, f64)> {
    if mean == 0.0 {
        return None;
    }
    let diff = relative_deviation(last, mean);
    Some((score_deviation(diff, threshold_pct), diff))
}
