/*!
 * # subnorm - subtitle re-flow and re-timing
 *
 * A Rust library that normalizes SubRip subtitles for readability while
 * guaranteeing that no word of the dialogue is lost.
 *
 * ## Features
 *
 * - Re-flow text into lines of a configurable length, preferring sentence,
 *   conjunction, clause and preposition boundaries
 * - Never split hyphenated compounds or contractions
 * - Re-time lines by reading speed within minimum/maximum duration bounds
 * - Enforce a transition gap between consecutive subtitles
 * - Collapse accidental duplicates
 * - Shift the whole stream by a lead-in offset
 * - Verify word-count integrity before anything is written
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `subtitle_processor`: SubRip parsing and serialization
 * - `linguistics`: Token annotation behind the `LinguisticAnalyzer` trait
 * - `segmentation`: Line breaking with ranked breakpoints
 * - `timing`: Per-entry re-timing, gap enforcement and lead-in offset
 * - `builder`: Output assembly, deduplication and origin mapping
 * - `validation`: Integrity check and timing audit
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod builder;
pub mod errors;
pub mod file_utils;
pub mod linguistics;
pub mod segmentation;
pub mod subtitle_processor;
pub mod timing;
pub mod validation;

// Re-export main types for easier usage
pub use app_config::{Config, IntegrityMode, LogLevel};
pub use app_controller::{BatchSummary, Controller, NormalizationOutcome, PipelineStage, RunStatus};
pub use builder::{MappingRecord, SubtitleBuilder};
pub use linguistics::{LinguisticAnalyzer, RuleBasedAnalyzer, Token};
pub use segmentation::Segmenter;
pub use subtitle_processor::{SubtitleCollection, SubtitleEntry};
pub use timing::{OffsetApplier, TimingNormalizer};
pub use validation::IntegrityChecker;
pub use errors::{AnalyzerError, AppError, ConfigError, InputError, IntegrityError};
