//! Tests for the full validation pipeline.

use super::*;

#[test]
fn default_config_validates() {
    let config = ScreenCheckConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_frame_rate_zero() {
    let mut config = ScreenCheckConfig::default();
    config.capture.frame_rate_ideal = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("capture.frame_rate_ideal"));
}

#[test]
fn catches_frame_rate_too_large() {
    let mut config = ScreenCheckConfig::default();
    config.capture.frame_rate_ideal = 240;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("capture.frame_rate_ideal"));
}

#[test]
fn frame_rate_bounds_are_inclusive() {
    let mut config = ScreenCheckConfig::default();
    config.capture.frame_rate_ideal = 1;
    assert!(validate(&config).is_ok());
    config.capture.frame_rate_ideal = 120;
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_event_capacity_zero() {
    let mut config = ScreenCheckConfig::default();
    config.capture.event_capacity = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("capture.event_capacity"));
}

#[test]
fn empty_keyword_list_is_allowed() {
    let mut config = ScreenCheckConfig::default();
    config.classification.permission_cancel_keywords.clear();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_blank_keyword() {
    let mut config = ScreenCheckConfig::default();
    config
        .classification
        .permission_cancel_keywords
        .push("  ".into());
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("permission_cancel_keywords[1]"));
}

#[test]
fn collects_every_error() {
    let mut config = ScreenCheckConfig::default();
    config.capture.frame_rate_ideal = 0;
    config.classification.permission_cancel_keywords = vec![String::new()];
    let err = validate(&config).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError(_)));
    let msg = err.to_string();
    assert!(msg.contains("capture.frame_rate_ideal"));
    assert!(msg.contains("permission_cancel_keywords[0]"));
}
