//! Unit tests for deviation scoring

use dca_dashboard::models::score::DeviationTier;
use dca_dashboard::signals::scoring::{relative_deviation, score_against_mean, score_deviation};

#[test]
fn test_scores_every_bucket() {
    assert_eq!(score_deviation(-0.2, 10.0), DeviationTier::StrongBuy);
    assert_eq!(score_deviation(-0.05, 10.0), DeviationTier::Buy);
    assert_eq!(score_deviation(0.0, 10.0), DeviationTier::Neutral);
    assert_eq!(score_deviation(0.05, 10.0), DeviationTier::Reduce);
    assert_eq!(score_deviation(0.2, 10.0), DeviationTier::StrongReduce);
}

#[test]
fn test_threshold_boundaries_are_strong_tiers() {
    for threshold_pct in [1.0, 5.0, 10.0, 15.0, 30.0, 100.0] {
        let t = threshold_pct / 100.0;
        assert_eq!(score_deviation(-t, threshold_pct).score(), 1.0);
        assert_eq!(score_deviation(t, threshold_pct).score(), -1.0);
        assert_eq!(score_deviation(0.0, threshold_pct).score(), 0.0);
    }
}

#[test]
fn test_tier_carries_arrow_and_color() {
    let tier = score_deviation(-0.5, 10.0);
    assert_eq!(tier.arrow(), "↑");
    assert_eq!(tier.color(), "#66BB6A");

    let tier = score_deviation(0.5, 10.0);
    assert_eq!(tier.arrow(), "↓");
    assert_eq!(tier.color(), "#E57373");

    assert_eq!(DeviationTier::Neutral.arrow(), "→");
    assert_eq!(DeviationTier::Buy.color(), "#A5D6A7");
    assert_eq!(DeviationTier::Reduce.color(), "#FFB74D");
}

#[test]
fn test_scores_stay_in_allowed_set() {
    let allowed = [-1.0, -0.5, 0.0, 0.5, 1.0];
    let mut diff = -2.0;
    while diff <= 2.0 {
        let score = score_deviation(diff, 7.5).score();
        assert!(allowed.contains(&score), "unexpected score {} for {}", score, diff);
        diff += 0.0125;
    }
}

#[test]
fn test_score_is_monotonically_non_increasing() {
    for threshold_pct in [1.0, 10.0, 25.0] {
        let mut previous = f64::INFINITY;
        let mut diff = -1.5;
        while diff <= 1.5 {
            let score = score_deviation(diff, threshold_pct).score();
            assert!(score <= previous, "score rose at diff {}", diff);
            previous = score;
            diff += 0.001;
        }
    }
}

#[test]
fn test_extreme_deviations_are_total() {
    assert_eq!(score_deviation(-1e9, 10.0), DeviationTier::StrongBuy);
    assert_eq!(score_deviation(1e9, 10.0), DeviationTier::StrongReduce);
}

#[test]
fn test_relative_deviation() {
    assert!((relative_deviation(80.0, 100.0) + 0.2).abs() < 1e-12);
    assert_eq!(relative_deviation(100.0, 100.0), 0.0);
}

#[test]
fn test_zero_mean_is_not_scored() {
    assert!(score_against_mean(10.0, 0.0, 10.0).is_none());
    let (tier, diff) = score_against_mean(120.0, 100.0, 10.0).unwrap();
    assert_eq!(tier, DeviationTier::StrongReduce);
    assert!((diff - 0.2).abs() < 1e-12);
}
