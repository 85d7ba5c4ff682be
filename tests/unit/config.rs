//! Unit tests for configuration

use dca_dashboard::config::{
    validate_equity_share, validate_pool, validate_threshold, ConfigError, DashboardConfig,
};
use dca_dashboard::error::DashboardError;
use dca_dashboard::logging::{log_format_for, LogFormat};
use std::env;

#[test]
fn test_default_config() {
    let config = DashboardConfig::default();
    assert_eq!(config.port, 8080);
    assert_eq!(config.instruments.len(), 8);
    assert_eq!(config.timeframes.len(), 5);
    assert_eq!(config.macro_series.len(), 4);
    assert_eq!(config.threshold_pct, 10.0);
    assert_eq!(config.pool_pct, 100.0);
    assert_eq!(config.equity_share_pct, 50.0);
    assert!(config.fred_api_key.is_none());
    assert_eq!(config.instrument("S&P500").unwrap().ticker, "SPY");
    assert!(config.timeframes.get(&config.default_chart_window).is_some());
}

#[test]
fn test_threshold_validation() {
    assert_eq!(validate_threshold(1.0), Ok(1.0));
    assert_eq!(validate_threshold(30.0), Ok(30.0));
    assert!(matches!(
        validate_threshold(0.0),
        Err(DashboardError::InvalidThreshold { .. })
    ));
    assert!(validate_threshold(31.0).is_err());
    assert!(validate_threshold(f64::NAN).is_err());
}

#[test]
fn test_pool_and_equity_share_validation() {
    assert_eq!(validate_pool(100.0), Ok(100.0));
    assert_eq!(validate_pool(250.0), Ok(250.0));
    assert_eq!(validate_pool(-100.0), Err(DashboardError::InvalidPool(-100.0)));
    assert!(validate_pool(0.0).is_err());
    assert!(validate_pool(f64::NAN).is_err());
    assert!(validate_pool(f64::INFINITY).is_err());

    assert_eq!(validate_equity_share(0.0), Ok(0.0));
    assert_eq!(validate_equity_share(100.0), Ok(100.0));
    assert!(validate_equity_share(100.5).is_err());
    assert!(validate_equity_share(f64::NAN).is_err());
}

#[test]
fn test_from_env_reads_and_validates() {
    env::set_var("THRESHOLD_PCT", "15");
    env::set_var("FRED_API_KEY", "  secret ");
    let config = DashboardConfig::from_env().unwrap();
    assert_eq!(config.threshold_pct, 15.0);
    assert_eq!(config.fred_api_key.as_deref(), Some("secret"));

    env::set_var("THRESHOLD_PCT", "abc");
    assert!(matches!(
        DashboardConfig::from_env(),
        Err(ConfigError::Invalid { key: "THRESHOLD_PCT", .. })
    ));

    env::set_var("THRESHOLD_PCT", "45");
    assert!(matches!(
        DashboardConfig::from_env(),
        Err(ConfigError::OutOfRange { key: "THRESHOLD_PCT", .. })
    ));

    env::remove_var("THRESHOLD_PCT");
    env::set_var("POOL_PCT", "-100");
    assert!(matches!(
        DashboardConfig::from_env(),
        Err(ConfigError::OutOfRange { key: "POOL_PCT", .. })
    ));
    env::set_var("POOL_PCT", "inf");
    assert!(matches!(
        DashboardConfig::from_env(),
        Err(ConfigError::OutOfRange { key: "POOL_PCT", .. })
    ));
    env::set_var("POOL_PCT", "80");
    assert_eq!(DashboardConfig::from_env().unwrap().pool_pct, 80.0);
    env::remove_var("POOL_PCT");

    env::set_var("FRED_API_KEY", "");
    assert!(DashboardConfig::from_env().unwrap().fred_api_key.is_none());
    env::remove_var("FRED_API_KEY");
}

#[test]
fn test_log_format_by_environment() {
    assert_eq!(log_format_for("production"), LogFormat::Json);
    assert_eq!(log_format_for("prod"), LogFormat::Json);
    assert_eq!(log_format_for("sandbox"), LogFormat::Pretty);
}
