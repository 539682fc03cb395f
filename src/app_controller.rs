use log::{error, warn, info, debug};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

use crate::app_config::Config;
use crate::builder::{dedup_key, MappingRecord, SubtitleBuilder};
use crate::errors::{AnalyzerError, AppError};
use crate::file_utils::FileManager;
use crate::linguistics::{LinguisticAnalyzer, RuleBasedAnalyzer};
use crate::segmentation::{PhraseBoundary, Segmenter};
use crate::subtitle_processor::{SubtitleCollection, SubtitleEntry};
use crate::timing::{OffsetApplier, TimeWindow, TimingAdjustment, TimingNormalizer};
use crate::validation::{IntegrityChecker, IntegrityReport, TimingAudit};

// @module: Application controller for subtitle normalization

/// Log target of the structured per-entry trace
pub const TRACE_TARGET: &str = "subnorm::trace";

/// Stages of a whole-file run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Init,
    Parsed,
    SegmentNormalize,
    OffsetApplied,
    IntegrityChecked,
    Serialized,
    Failed,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Init => "INIT",
            PipelineStage::Parsed => "PARSED",
            PipelineStage::SegmentNormalize => "SEGMENT_NORMALIZE",
            PipelineStage::OffsetApplied => "OFFSET_APPLIED",
            PipelineStage::IntegrityChecked => "INTEGRITY_CHECKED",
            PipelineStage::Serialized => "SERIALIZED",
            PipelineStage::Failed => "FAILED",
        };
        f.write_str(name)
    }
}

/// Result of normalizing one parsed file in memory
#[derive(Debug, Clone)]
pub struct NormalizationOutcome {
    /// Final entries, numbered from 1, offset applied
    pub entries: Vec<SubtitleEntry>,
    /// Source entry to output entries
    pub mapping: MappingRecord,
    /// Word counts confirmed by the integrity check
    pub report: IntegrityReport,
    /// Lines longer than the limit because they could not be split
    pub overflow_lines: usize,
    /// Lines kept at the minimum duration although they crowd the next entry
    pub relaxed_gaps: usize,
    /// Findings of the timing audit
    pub audit_issues: usize,
}

/// What happened to one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// Output written to this path
    Written(PathBuf),
    /// Output already existed and overwriting was not requested
    Skipped(PathBuf),
}

/// Counts for a multi-file run
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub duration: Duration,
}

impl BatchSummary {
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Main application controller for subtitle normalization
pub struct Controller {
    // @field: Validated run configuration
    config: Config,
    // @field: Annotation backend
    analyzer: Box<dyn LinguisticAnalyzer>,
}

impl Controller {
    /// Create a controller with the built-in analyzer
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        Self::with_analyzer(config, Box::new(RuleBasedAnalyzer::new()))
    }

    // @method: Create a controller with a specific analyzer; validates the configuration
    pub fn with_analyzer(config: Config, analyzer: Box<dyn LinguisticAnalyzer>) -> Result<Self, AppError> {
        config.validate()?;
        debug!("Using the {} analyzer", analyzer.name());
        Ok(Self { config, analyzer })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Normalize one input file and write `<stem>.adjusted.srt` beside it
    ///
    /// Nothing is written unless every stage succeeds.
    pub fn run(&self, input_file: &Path, force_overwrite: bool) -> Result<RunStatus, AppError> {
        let output_path = FileManager::adjusted_output_path(input_file);
        if output_path.exists() && !force_overwrite {
            warn!("Skipping file, {} already exists (use -f to force overwrite)", output_path.display());
            return Ok(RunStatus::Skipped(output_path));
        }

        Self::enter(PipelineStage::Init);
        let collection = SubtitleCollection::from_file(input_file).map_err(|e| {
            Self::enter(PipelineStage::Failed);
            AppError::from(e)
        })?;
        Self::enter(PipelineStage::Parsed);
        debug!(
            "Read {} entries ({} words) from {}",
            collection.entries.len(),
            collection.word_count(),
            input_file.display()
        );

        let outcome = self.normalize_entries(&collection.entries)?;

        let adjusted = SubtitleCollection {
            source_file: output_path.clone(),
            entries: outcome.entries,
        };
        FileManager::write_atomically(&output_path, &adjusted.to_srt_string()).map_err(|e| {
            Self::enter(PipelineStage::Failed);
            AppError::File(e.to_string())
        })?;
        Self::enter(PipelineStage::Serialized);

        info!(
            "Success: {} ({} entries from {}, {} words preserved)",
            output_path.display(),
            adjusted.entries.len(),
            collection.entries.len(),
            outcome.report.original_words
        );
        if outcome.overflow_lines > 0 || outcome.relaxed_gaps > 0 {
            warn!(
                "{} overlong unsplittable line(s), {} line(s) held at minimum duration",
                outcome.overflow_lines, outcome.relaxed_gaps
            );
        }

        Ok(RunStatus::Written(output_path))
    }

    /// Re-flow, re-time, shift and verify parsed entries
    pub fn normalize_entries(&self, entries: &[SubtitleEntry]) -> Result<NormalizationOutcome, AppError> {
        let result = self.normalize_entries_inner(entries);
        if result.is_err() {
            Self::enter(PipelineStage::Failed);
        }
        result
    }

    fn normalize_entries_inner(&self, entries: &[SubtitleEntry]) -> Result<NormalizationOutcome, AppError> {
        let segmenter = Segmenter::new(&self.config);
        let normalizer = TimingNormalizer::new(&self.config);
        let mut builder = SubtitleBuilder::new(self.config.dedup_tolerance_ms);
        let mut overflow_lines = 0;
        let mut relaxed_gaps = 0;

        Self::enter(PipelineStage::SegmentNormalize);
        for (i, entry) in entries.iter().enumerate() {
            let text = entry.flattened_text();
            let tokens = self.analyzer.analyze(&text).map_err(|e| AnalyzerError::InEntry {
                entry: entry.seq_num,
                message: e.to_string(),
            })?;

            let segmentation = segmenter.segment(&tokens);
            let char_counts: Vec<usize> = segmentation.phrases.iter().map(|p| p.char_count).collect();
            let window = TimeWindow::new(entry.start_time_ms, entry.end_time_ms);
            let next_start = self.next_distinct_start(entries, i);
            let timing = normalizer.normalize_entry(window, &char_counts, next_start);

            overflow_lines += segmentation
                .phrases
                .iter()
                .filter(|p| p.boundary == PhraseBoundary::SingleTokenOverflow)
                .count();
            relaxed_gaps += Self::count_relaxed(&timing.adjustments);

            if self.config.debug {
                let trace = json!({
                    "entry": entry.seq_num,
                    "source_window": window,
                    "next_start_ms": next_start,
                    "decisions": segmentation.decisions,
                    "phrases": segmentation.phrases,
                    "windows": timing.windows,
                    "adjustments": timing.adjustments,
                });
                debug!(target: TRACE_TARGET, "{}", trace);
            }

            for (phrase, line_window) in segmentation.phrases.iter().zip(&timing.windows) {
                builder.push_line(entry.seq_num, &phrase.content, *line_window);
            }
        }

        let mut windows = builder.windows();
        let gap_adjustments = normalizer.enforce_gaps(&mut windows);
        builder.set_windows(&windows);
        if self.config.debug && !gap_adjustments.is_empty() {
            debug!(target: TRACE_TARGET, "{}", json!({ "gap_pass": gap_adjustments }));
        }

        let output = builder.finish();
        let collapsed = output.collapsed_count();
        if collapsed > 0 {
            info!("Collapsed {} duplicate line(s)", collapsed);
        }

        let offset = OffsetApplier::new(self.config.lead_in_offset_ms()?);
        let adjusted = offset.apply(output.entries);
        Self::enter(PipelineStage::OffsetApplied);

        let report = IntegrityChecker::new(self.config.integrity_mode).check(entries, &adjusted, &output.production)?;
        Self::enter(PipelineStage::IntegrityChecked);
        debug!("Mapping record: {:?}", output.mapping);

        let audit_issues = self.audit(&adjusted);

        Ok(NormalizationOutcome {
            entries: adjusted,
            mapping: output.mapping,
            report,
            overflow_lines,
            relaxed_gaps,
            audit_issues,
        })
    }

    /// Start of the next source entry that is not a duplicate of entry `i`
    ///
    /// Duplicates share the same bound so they re-time identically and collapse.
    fn next_distinct_start(&self, entries: &[SubtitleEntry], i: usize) -> Option<u64> {
        let tolerance = self.config.dedup_tolerance_ms;
        let current = &entries[i];
        let key = dedup_key(
            &current.text,
            TimeWindow::new(current.start_time_ms, current.end_time_ms),
            tolerance,
        );

        entries[i + 1..]
            .iter()
            .find(|next| {
                dedup_key(&next.text, TimeWindow::new(next.start_time_ms, next.end_time_ms), tolerance) != key
            })
            .map(|next| next.start_time_ms)
    }

    /// Log every timing finding on the final entries; never fails the run
    fn audit(&self, entries: &[SubtitleEntry]) -> usize {
        let report = TimingAudit::new(&self.config).audit(entries);
        for finding in &report.findings {
            warn!("Entry {}: {}", finding.seq_num, finding.issue);
        }
        report.len()
    }

    fn count_relaxed(adjustments: &[TimingAdjustment]) -> usize {
        adjustments
            .iter()
            .filter(|a| matches!(a, TimingAdjustment::GapRelaxed { .. }))
            .count()
    }

    fn enter(stage: PipelineStage) {
        debug!("Pipeline stage: {}", stage);
    }

    /// Run the workflow in folder mode, processing every SubRip file in a directory
    /// Files that already have adjusted output will be skipped
    pub fn run_folder(&self, input_dir: &Path, force_overwrite: bool) -> Result<BatchSummary, AppError> {
        if !FileManager::dir_exists(input_dir) {
            return Err(AppError::File(format!("Input directory does not exist: {:?}", input_dir)));
        }

        let files = FileManager::find_subtitle_files(input_dir)?;
        if files.is_empty() {
            return Err(AppError::File(format!("No subtitle files found in directory: {:?}", input_dir)));
        }

        self.run_files(&files, force_overwrite)
    }

    /// Run over a mix of files and directories given on the command line
    pub fn run_paths(&self, paths: &[PathBuf], force_overwrite: bool) -> Result<BatchSummary, AppError> {
        let mut files = Vec::new();
        for path in paths {
            if FileManager::dir_exists(path) {
                files.extend(FileManager::find_subtitle_files(path)?);
            } else {
                files.push(path.clone());
            }
        }

        self.run_files(&files, force_overwrite)
    }

    fn run_files(&self, files: &[PathBuf], force_overwrite: bool) -> Result<BatchSummary, AppError> {
        let start_time = Instant::now();
        let mut summary = BatchSummary::default();

        let progress = if files.len() > 1 {
            let pb = ProgressBar::new(files.len() as u64);
            let style = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
                .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
                .unwrap_or_else(|_| ProgressStyle::default_bar());
            pb.set_style(style.progress_chars("█▓▒░"));
            pb
        } else {
            ProgressBar::hidden()
        };

        for file in files {
            let file_name = file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            progress.set_message(format!("Processing: {}", file_name));

            match self.run(file, force_overwrite) {
                Ok(RunStatus::Written(_)) => summary.processed += 1,
                Ok(RunStatus::Skipped(_)) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing file {}: {}", file_name, e);
                    summary.failed += 1;
                }
            }

            progress.inc(1);
        }

        progress.finish_and_clear();
        summary.duration = start_time.elapsed();

        if files.len() > 1 {
            info!(
                "Processing completed in {}: {} processed, {} skipped, {} errors",
                Self::format_duration(summary.duration),
                summary.processed,
                summary.skipped,
                summary.failed
            );
        }

        Ok(summary)
    }

    // Format duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
