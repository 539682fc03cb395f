/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use subnorm::app_config::{Config, IntegrityMode, LogLevel};
use subnorm::errors::ConfigError;
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.max_line_length, 42);
    assert_eq!(config.max_reading_speed, 20.0);
    assert_eq!(config.min_duration_ms, 1000);
    assert_eq!(config.max_duration_ms, 6000);
    assert_eq!(config.transition_gap_ms, 120);
    assert_eq!(config.lead_in_offset, 0.0);
    assert_eq!(config.dedup_tolerance_ms, 50);
    assert_eq!(config.integrity_mode, IntegrityMode::Count);
    assert!(!config.debug);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withNegativeLeadIn_shouldFail() {
    let config = Config {
        lead_in_offset: -0.5,
        ..Config::default()
    };

    assert_eq!(config.validate(), Err(ConfigError::NegativeLeadIn(-0.5)));
}

#[test]
fn test_config_validation_withNonFiniteLeadIn_shouldFail() {
    let config = Config {
        lead_in_offset: f64::INFINITY,
        ..Config::default()
    };

    assert!(matches!(config.validate(), Err(ConfigError::NonFiniteLeadIn(_))));
}

#[test]
fn test_config_validation_withInvalidBounds_shouldNameTheField() {
    let cases = [
        (Config { max_line_length: 0, ..Config::default() }, "max_line_length"),
        (Config { max_reading_speed: 0.0, ..Config::default() }, "max_reading_speed"),
        (Config { min_duration_ms: 0, ..Config::default() }, "min_duration_ms"),
        (Config { min_duration_ms: 7000, ..Config::default() }, "max_duration_ms"),
        (Config { dedup_tolerance_ms: 0, ..Config::default() }, "dedup_tolerance_ms"),
    ];

    for (config, expected_field) in cases {
        match config.validate() {
            Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("Expected InvalidValue for {}, got {:?}", expected_field, other),
        }
    }
}

/// Test loading a partial JSON file
#[test]
fn test_from_file_withPartialJson_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "subnorm.json",
        r#"{ "max_line_length": 32, "integrity_mode": "detailed", "log_level": "debug" }"#,
    )?;

    let config = Config::from_file(&path)?;

    assert_eq!(config.max_line_length, 32);
    assert_eq!(config.integrity_mode, IntegrityMode::Detailed);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.transition_gap_ms, 120);
    Ok(())
}

#[test]
fn test_from_file_withMissingFile_shouldReturnLoadError() {
    let result = Config::from_file("/nonexistent/subnorm.json");
    assert!(matches!(result, Err(ConfigError::Load { .. })));
}

#[test]
fn test_from_file_withInvalidJson_shouldReturnLoadError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "broken.json", "{ not json")?;

    assert!(matches!(Config::from_file(&path), Err(ConfigError::Load { .. })));
    Ok(())
}

/// Test derived helpers
#[test]
fn test_helpers_withDefaultConfig_shouldConvertUnits() {
    let config = Config {
        lead_in_offset: 1.5,
        ..Config::default()
    };

    assert_eq!(config.lead_in_offset_ms(), Ok(1500));
    assert_eq!(config.reading_time_ms(20), 1000);
    assert_eq!(config.reading_time_ms(7), 350);
    assert_eq!(config.clamp_duration(200), 1000);
    assert_eq!(config.clamp_duration(9000), 6000);
    assert_eq!(config.clamp_duration(2500), 2500);
}

#[test]
fn test_lead_in_offset_ms_withNegativeOrNonFiniteOffset_shouldRejectInsteadOfClamping() {
    let negative = Config {
        lead_in_offset: -0.25,
        ..Config::default()
    };
    let infinite = Config {
        lead_in_offset: f64::INFINITY,
        ..Config::default()
    };

    assert_eq!(negative.lead_in_offset_ms(), Err(ConfigError::NegativeLeadIn(-0.25)));
    assert!(matches!(infinite.lead_in_offset_ms(), Err(ConfigError::NonFiniteLeadIn(_))));
}

#[test]
fn test_log_level_toLevelFilter_shouldMapEveryLevel() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
