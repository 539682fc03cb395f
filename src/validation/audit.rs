/*!
 * Post-run timing audit.
 *
 * Re-reads the final stream and lists every place where an entry breaks a
 * configured bound. Findings are logged by the controller and never fail the
 * run: the normalizer already records the cases where it had to give way.
 */

use std::fmt;
use log::debug;

use crate::app_config::Config;
use crate::subtitle_processor::SubtitleEntry;

/// Slack on the reading speed comparison, in characters per second
const READING_SPEED_SLACK: f64 = 0.05;

/// A bound broken by one output entry
#[derive(Debug, Clone, PartialEq)]
pub enum TimingIssue {
    /// End does not come after start
    Inverted { start_ms: u64, end_ms: u64 },
    /// Shown for less than the minimum duration
    TooShort { duration_ms: u64, min_ms: u64 },
    /// Shown for longer than the maximum duration
    TooLong { duration_ms: u64, max_ms: u64 },
    /// More characters per second than the reading speed allows
    TooFast { cps: f64, max_cps: f64 },
    /// Starts before the previous entry starts
    OutOfOrder { prev_seq_num: usize },
    /// Starts before the previous entry ends
    Overlap { prev_seq_num: usize, overlap_ms: u64 },
    /// Blank interval after the previous entry is shorter than the transition gap
    TightGap { prev_seq_num: usize, gap_ms: u64, min_gap_ms: u64 },
}

impl fmt::Display for TimingIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimingIssue::Inverted { start_ms, end_ms } => {
                write!(f, "ends at {}ms, not after its start at {}ms", end_ms, start_ms)
            }
            TimingIssue::TooShort { duration_ms, min_ms } => {
                write!(f, "shown for {}ms (min: {}ms)", duration_ms, min_ms)
            }
            TimingIssue::TooLong { duration_ms, max_ms } => {
                write!(f, "shown for {}ms (max: {}ms)", duration_ms, max_ms)
            }
            TimingIssue::TooFast { cps, max_cps } => {
                write!(f, "needs {:.1} chars/s (max: {:.1})", cps, max_cps)
            }
            TimingIssue::OutOfOrder { prev_seq_num } => {
                write!(f, "starts before entry {}", prev_seq_num)
            }
            TimingIssue::Overlap { prev_seq_num, overlap_ms } => {
                write!(f, "overlaps entry {} by {}ms", prev_seq_num, overlap_ms)
            }
            TimingIssue::TightGap { prev_seq_num, gap_ms, min_gap_ms } => {
                write!(f, "only {}ms after entry {} (min: {}ms)", gap_ms, prev_seq_num, min_gap_ms)
            }
        }
    }
}

/// One finding, tied to the output entry it concerns
#[derive(Debug, Clone, PartialEq)]
pub struct AuditFinding {
    pub seq_num: usize,
    pub issue: TimingIssue,
}

/// Everything the audit found, in stream order
#[derive(Debug, Clone, Default)]
pub struct AuditReport {
    pub findings: Vec<AuditFinding>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Findings reported against one entry
    pub fn for_entry(&self, seq_num: usize) -> impl Iterator<Item = &TimingIssue> {
        self.findings
            .iter()
            .filter(move |f| f.seq_num == seq_num)
            .map(|f| &f.issue)
    }

    /// Number of entries that start before their predecessor ends
    pub fn overlap_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| matches!(f.issue, TimingIssue::Overlap { .. }))
            .count()
    }
}

/// Audits output timings against the bounds of a run
#[derive(Debug, Clone, Copy)]
pub struct TimingAudit {
    max_cps: f64,
    min_duration_ms: u64,
    max_duration_ms: u64,
    min_gap_ms: u64,
}

impl TimingAudit {
    pub fn new(config: &Config) -> Self {
        Self {
            max_cps: config.max_reading_speed,
            min_duration_ms: config.min_duration_ms,
            max_duration_ms: config.max_duration_ms,
            min_gap_ms: config.transition_gap_ms,
        }
    }

    /// Check every entry on its own and against the one before it
    pub fn audit(&self, entries: &[SubtitleEntry]) -> AuditReport {
        let mut report = AuditReport::default();
        let mut prev: Option<&SubtitleEntry> = None;

        for entry in entries {
            let mut push = |issue| {
                report.findings.push(AuditFinding {
                    seq_num: entry.seq_num,
                    issue,
                })
            };

            for issue in self.entry_issues(entry) {
                push(issue);
            }
            if let Some(prev) = prev {
                if let Some(issue) = self.neighbour_issue(prev, entry) {
                    push(issue);
                }
            }

            prev = Some(entry);
        }

        debug!("Timing audit: {} entries, {} findings", entries.len(), report.len());
        report
    }

    fn entry_issues(&self, entry: &SubtitleEntry) -> Vec<TimingIssue> {
        if entry.end_time_ms <= entry.start_time_ms {
            return vec![TimingIssue::Inverted {
                start_ms: entry.start_time_ms,
                end_ms: entry.end_time_ms,
            }];
        }

        let mut issues = Vec::new();
        let duration_ms = entry.duration_ms();
        if duration_ms < self.min_duration_ms {
            issues.push(TimingIssue::TooShort { duration_ms, min_ms: self.min_duration_ms });
        }
        if duration_ms > self.max_duration_ms {
            issues.push(TimingIssue::TooLong { duration_ms, max_ms: self.max_duration_ms });
        }

        let cps = reading_speed(entry);
        if cps > self.max_cps + READING_SPEED_SLACK {
            issues.push(TimingIssue::TooFast { cps, max_cps: self.max_cps });
        }
        issues
    }

    fn neighbour_issue(&self, prev: &SubtitleEntry, entry: &SubtitleEntry) -> Option<TimingIssue> {
        if entry.start_time_ms < prev.start_time_ms {
            return Some(TimingIssue::OutOfOrder { prev_seq_num: prev.seq_num });
        }
        if entry.start_time_ms < prev.end_time_ms {
            return Some(TimingIssue::Overlap {
                prev_seq_num: prev.seq_num,
                overlap_ms: prev.end_time_ms - entry.start_time_ms,
            });
        }

        let gap_ms = entry.start_time_ms - prev.end_time_ms;
        (gap_ms < self.min_gap_ms).then_some(TimingIssue::TightGap {
            prev_seq_num: prev.seq_num,
            gap_ms,
            min_gap_ms: self.min_gap_ms,
        })
    }
}

impl Default for TimingAudit {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

/// Characters per second an entry asks of the viewer; line breaks are free
pub fn reading_speed(entry: &SubtitleEntry) -> f64 {
    if entry.end_time_ms <= entry.start_time_ms {
        return f64::INFINITY;
    }

    let chars = entry.text.chars().filter(|c| !matches!(c, '\n' | '\r')).count() as f64;
    chars * 1000.0 / entry.duration_ms() as f64
}
