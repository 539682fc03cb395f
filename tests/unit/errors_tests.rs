/*!
 * Tests for error types and conversions
 */

use std::path::PathBuf;
use subnorm::errors::{AnalyzerError, AppError, ConfigError, InputError, IntegrityError};

#[test]
fn test_config_error_display_withNegativeLeadIn_shouldMentionValue() {
    let error = ConfigError::NegativeLeadIn(-2.0);
    assert!(error.to_string().contains("-2"));
}

#[test]
fn test_integrity_error_display_withMismatch_shouldNameCounts() {
    let error = IntegrityError::WordCountMismatch {
        original: 12,
        emitted: 11,
        collapsed: 0,
    };
    let message = error.to_string();

    assert!(message.contains("12"));
    assert!(message.contains("11"));
}

#[test]
fn test_app_error_from_withEachStageError_shouldWrapIt() {
    let config: AppError = ConfigError::NegativeLeadIn(-1.0).into();
    let input: AppError = InputError::NotFound(PathBuf::from("missing.srt")).into();
    let analyzer: AppError = AnalyzerError::Failed("boom".to_string()).into();
    let integrity: AppError = IntegrityError::WordCountMismatch { original: 2, emitted: 1, collapsed: 0 }.into();

    assert!(matches!(config, AppError::Config(_)));
    assert!(matches!(input, AppError::Input(_)));
    assert!(matches!(analyzer, AppError::Analyzer(_)));
    assert!(matches!(integrity, AppError::Integrity(_)));
}

#[test]
fn test_app_error_from_withIoError_shouldBecomeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let error: AppError = io_error.into();

    assert!(matches!(error, AppError::File(ref message) if message.contains("denied")));
}

#[test]
fn test_app_error_from_withAnyhowError_shouldBecomeUnknown() {
    let error: AppError = anyhow::anyhow!("something odd").into();
    assert!(matches!(error, AppError::Unknown(_)));
}

#[test]
fn test_analyzer_error_display_withEntry_shouldNameEntry() {
    let error = AnalyzerError::InEntry {
        entry: 7,
        message: "timeout".to_string(),
    };
    assert!(error.to_string().contains("entry 7"));
}
