use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

use crate::errors::ConfigError;

/// Application configuration module
/// This module holds every tuning constant of a normalization run in one
/// immutable value that is handed to each component.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Maximum characters per display line
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,

    /// Reading speed in characters per second
    #[serde(default = "default_max_reading_speed")]
    pub max_reading_speed: f64,

    /// Minimum on-screen duration in milliseconds
    #[serde(default = "default_min_duration_ms")]
    pub min_duration_ms: u64,

    /// Maximum on-screen duration in milliseconds
    #[serde(default = "default_max_duration_ms")]
    pub max_duration_ms: u64,

    /// Minimum blank interval between consecutive subtitles in milliseconds
    #[serde(default = "default_transition_gap_ms")]
    pub transition_gap_ms: u64,

    /// Shift applied to every output timing, in seconds
    #[serde(default)]
    pub lead_in_offset: f64,

    /// Rounding bucket used when comparing windows of duplicate candidates
    #[serde(default = "default_dedup_tolerance_ms")]
    pub dedup_tolerance_ms: u64,

    /// How strictly content integrity is verified
    #[serde(default)]
    pub integrity_mode: IntegrityMode,

    /// Emit the structured per-entry trace
    #[serde(default)]
    pub debug: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Integrity verification strategy
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum IntegrityMode {
    /// Compare total word counts only
    #[default]
    Count,
    /// Compare word sequences and report the first difference with context
    Detailed,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Equivalent filter for the `log` facade
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_max_line_length() -> usize {
    42
}

fn default_max_reading_speed() -> f64 {
    20.0
}

fn default_min_duration_ms() -> u64 {
    1000
}

fn default_max_duration_ms() -> u64 {
    6000
}

fn default_transition_gap_ms() -> u64 {
    120
}

fn default_dedup_tolerance_ms() -> u64 {
    50
}

impl Config {
    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let load_error = |message: String| ConfigError::Load {
            path: path.to_path_buf(),
            message,
        };

        let content = std::fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| load_error(e.to_string()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.lead_in_offset_ms()?;

        if self.max_line_length == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_line_length",
                reason: "must be at least 1 character".to_string(),
            });
        }

        if !self.max_reading_speed.is_finite() || self.max_reading_speed <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "max_reading_speed",
                reason: format!("must be a positive number, got {}", self.max_reading_speed),
            });
        }

        if self.min_duration_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "min_duration_ms",
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.min_duration_ms > self.max_duration_ms {
            return Err(ConfigError::InvalidValue {
                field: "max_duration_ms",
                reason: format!(
                    "must not be below min_duration_ms ({} < {})",
                    self.max_duration_ms, self.min_duration_ms
                ),
            });
        }

        if self.dedup_tolerance_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "dedup_tolerance_ms",
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// Lead-in offset converted to whole milliseconds; negative or non-finite values are rejected
    pub fn lead_in_offset_ms(&self) -> Result<u64, ConfigError> {
        if !self.lead_in_offset.is_finite() {
            return Err(ConfigError::NonFiniteLeadIn(self.lead_in_offset));
        }
        if self.lead_in_offset < 0.0 {
            return Err(ConfigError::NegativeLeadIn(self.lead_in_offset));
        }
        Ok((self.lead_in_offset * 1000.0).round() as u64)
    }

    /// Reading-speed duration for a line of `char_count` characters, in ms
    pub fn reading_time_ms(&self, char_count: usize) -> u64 {
        ((char_count as f64 / self.max_reading_speed) * 1000.0).round() as u64
    }

    /// Clamp a duration into `[min_duration_ms, max_duration_ms]`
    pub fn clamp_duration(&self, duration_ms: u64) -> u64 {
        duration_ms.clamp(self.min_duration_ms, self.max_duration_ms)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            max_line_length: default_max_line_length(),
            max_reading_speed: default_max_reading_speed(),
            min_duration_ms: default_min_duration_ms(),
            max_duration_ms: default_max_duration_ms(),
            transition_gap_ms: default_transition_gap_ms(),
            lead_in_offset: 0.0,
            dedup_tolerance_ms: default_dedup_tolerance_ms(),
            integrity_mode: IntegrityMode::default(),
            debug: false,
            log_level: LogLevel::default(),
        }
    }
}
