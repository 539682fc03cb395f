/*!
 * Error types for the subnorm application.
 *
 * This module contains custom error types for each stage of a normalization
 * run, using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors detected while validating the run configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Lead-in offset below zero
    #[error("Lead-in offset must be >= 0 seconds, got {0}")]
    NegativeLeadIn(f64),

    /// Lead-in offset is NaN or infinite
    #[error("Lead-in offset must be a finite number, got {0}")]
    NonFiniteLeadIn(f64),

    /// Any other out-of-range setting
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue {
        /// Name of the offending setting
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// The configuration file could not be loaded
    #[error("Failed to load config file {path:?}: {message}")]
    Load {
        /// Path of the config file
        path: PathBuf,
        /// Underlying failure
        message: String,
    },
}

/// Errors that can occur while reading or parsing a subtitle file
#[derive(Error, Debug)]
pub enum InputError {
    /// The input path does not exist
    #[error("Input file does not exist: {0:?}")]
    NotFound(PathBuf),

    /// The input exists but could not be read as UTF-8 text
    #[error("Failed to read {path:?}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content is not valid SubRip
    #[error("Malformed SubRip at line {line}: {reason}")]
    Malformed {
        /// 1-based line number in the source
        line: usize,
        /// What was wrong
        reason: String,
    },

    /// The content holds no subtitle entries
    #[error("No subtitle entries were found in the SubRip content")]
    Empty,
}

/// Errors raised by a linguistic analyzer backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyzerError {
    /// The backend could not be reached or loaded
    #[error("Linguistic analyzer unavailable: {0}")]
    Unavailable(String),

    /// The backend failed on a particular text
    #[error("Linguistic analysis failed: {0}")]
    Failed(String),

    /// A backend failure attributed to a source entry
    #[error("Linguistic analysis failed for entry {entry}: {message}")]
    InEntry {
        /// Sequence number of the source entry
        entry: usize,
        /// Backend message
        message: String,
    },
}

/// Content-integrity failures; any of these aborts the run before output
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntegrityError {
    /// Total word counts differ
    #[error(
        "Integrity check failed: original text has {original} words, adjusted text has {emitted} (+{collapsed} collapsed as duplicates)"
    )]
    WordCountMismatch {
        original: usize,
        emitted: usize,
        collapsed: usize,
    },

    /// Word sequences differ at a given position (detailed mode)
    #[error(
        "Integrity check failed at word {position}: original '{original_word}', adjusted '{adjusted_word}' (original context: \"{original_context}\"; adjusted context: \"{adjusted_context}\")"
    )]
    WordMismatch {
        position: usize,
        original_word: String,
        adjusted_word: String,
        original_context: String,
        adjusted_context: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from configuration validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error reading or parsing the input
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Error from the linguistic analyzer
    #[error("Analyzer error: {0}")]
    Analyzer(#[from] AnalyzerError),

    /// Error from the integrity check
    #[error("Integrity error: {0}")]
    Integrity(#[from] IntegrityError),

    /// Error from a file operation on the output side
    #[error("File error: {0}")]
    File(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
