use log::{debug, warn};
use serde::Serialize;

use crate::app_config::Config;

/// A `[start, end]` display window in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeWindow {
    pub start_ms: u64,
    pub end_ms: u64,
}

impl TimeWindow {
    pub fn new(start_ms: u64, end_ms: u64) -> Self {
        Self { start_ms, end_ms }
    }

    pub fn duration_ms(&self) -> u64 {
        self.end_ms.saturating_sub(self.start_ms)
    }
}

/// One timing adjustment, recorded for the debug trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimingAdjustment {
    /// Duration raised to the minimum
    ClampedToMin { line: usize, from_ms: u64, to_ms: u64 },
    /// Duration cut to the maximum
    ClampedToMax { line: usize, from_ms: u64, to_ms: u64 },
    /// Lines overran the source window; the last line ends later
    ExtendedPastWindow { line: usize, by_ms: u64 },
    /// Last line cut so the next entry keeps its transition gap
    BoundedByNext { line: usize, end_ms: u64 },
    /// End moved earlier to open the transition gap
    ShrunkEnd { line: usize, from_ms: u64, to_ms: u64 },
    /// Start moved later to open the transition gap
    PushedStart { line: usize, from_ms: u64, to_ms: u64 },
    /// Last line kept at the minimum duration although it crowds the next
    /// entry; the gap pass then pushes the next entry later
    GapRelaxed { line: usize, gap_ms: i64 },
}

/// Windows derived for the lines of one source entry
#[derive(Debug, Clone, Default)]
pub struct EntryTiming {
    pub windows: Vec<TimeWindow>,
    pub adjustments: Vec<TimingAdjustment>,
}

// @struct: Reading-speed and gap aware re-timer
#[derive(Debug, Clone)]
pub struct TimingNormalizer {
    min_duration_ms: u64,
    transition_gap_ms: u64,
    config: Config,
}

impl TimingNormalizer {
    /// Create a normalizer from the run configuration
    pub fn new(config: &Config) -> Self {
        Self {
            min_duration_ms: config.min_duration_ms,
            transition_gap_ms: config.transition_gap_ms,
            config: config.clone(),
        }
    }

    /// Derive one window per line of a source entry
    ///
    /// A single line gets its reading-speed duration. Several lines share the
    /// source window in proportion to their length, each share floored by its
    /// reading-speed duration. Every duration is clamped into the configured
    /// bounds and lines are laid out back to back, separated by the
    /// transition gap. The last line never ends later than
    /// `next_start - gap` unless that would cut it below the minimum.
    pub fn normalize_entry(&self, window: TimeWindow, char_counts: &[usize], next_start_ms: Option<u64>) -> EntryTiming {
        let mut timing = EntryTiming::default();
        if char_counts.is_empty() {
            return timing;
        }

        let durations = self.line_durations(window, char_counts);

        let mut cursor = window.start_ms;
        for (line, &raw) in durations.iter().enumerate() {
            let clamped = self.config.clamp_duration(raw);
            if clamped > raw {
                timing.adjustments.push(TimingAdjustment::ClampedToMin { line, from_ms: raw, to_ms: clamped });
            } else if clamped < raw {
                timing.adjustments.push(TimingAdjustment::ClampedToMax { line, from_ms: raw, to_ms: clamped });
            }

            timing.windows.push(TimeWindow::new(cursor, cursor + clamped));
            cursor += clamped + self.transition_gap_ms;
        }

        let last_line = timing.windows.len() - 1;
        let last = &mut timing.windows[last_line];

        if last.end_ms > window.end_ms {
            timing.adjustments.push(TimingAdjustment::ExtendedPastWindow {
                line: last_line,
                by_ms: last.end_ms - window.end_ms,
            });
        }

        if let Some(next_start) = next_start_ms {
            let limit = next_start.saturating_sub(self.transition_gap_ms);
            if last.end_ms > limit {
                let floor = last.start_ms + self.min_duration_ms;
                if limit >= floor {
                    last.end_ms = limit;
                    timing.adjustments.push(TimingAdjustment::BoundedByNext { line: last_line, end_ms: limit });
                } else {
                    last.end_ms = last.end_ms.min(floor);
                    let gap_ms = next_start as i64 - last.end_ms as i64;
                    warn!(
                        "Keeping {}ms minimum duration leaves a {}ms gap before the next subtitle (wanted {}ms); it will start later",
                        self.min_duration_ms, gap_ms, self.transition_gap_ms
                    );
                    timing.adjustments.push(TimingAdjustment::GapRelaxed { line: last_line, gap_ms });
                }
            }
        }

        timing
    }

    /// Enforce the transition gap between every adjacent pair of windows
    ///
    /// A violating pair first shrinks the earlier window, never below the
    /// minimum duration. If that is not enough the later window is pushed by
    /// the shortfall and keeps at least the minimum duration; the push
    /// cascades through the following pairs. No two windows ever overlap.
    pub fn enforce_gaps(&self, windows: &mut [TimeWindow]) -> Vec<TimingAdjustment> {
        let mut adjustments = Vec::new();
        let gap = self.transition_gap_ms;

        for i in 1..windows.len() {
            let (before, after) = windows.split_at_mut(i);
            let prev = &mut before[i - 1];
            let current = &mut after[0];

            if prev.end_ms + gap <= current.start_ms {
                continue;
            }

            let target_end = current.start_ms.saturating_sub(gap);
            let new_end = target_end.max(prev.start_ms + self.min_duration_ms);
            if new_end < prev.end_ms {
                adjustments.push(TimingAdjustment::ShrunkEnd { line: i - 1, from_ms: prev.end_ms, to_ms: new_end });
                prev.end_ms = new_end;
            }

            let required_start = prev.end_ms + gap;
            if required_start <= current.start_ms {
                continue;
            }

            adjustments.push(TimingAdjustment::PushedStart {
                line: i,
                from_ms: current.start_ms,
                to_ms: required_start,
            });
            debug!("Pushing line {} from {}ms to {}ms", i + 1, current.start_ms, required_start);
            current.start_ms = required_start;
            current.end_ms = current.end_ms.max(required_start + self.min_duration_ms);
        }

        adjustments
    }

    /// Unclamped duration for each line
    fn line_durations(&self, window: TimeWindow, char_counts: &[usize]) -> Vec<u64> {
        if char_counts.len() == 1 {
            return vec![self.config.reading_time_ms(char_counts[0])];
        }

        let gaps = self.transition_gap_ms * (char_counts.len() as u64 - 1);
        let available = window.duration_ms().saturating_sub(gaps);
        let total_chars: u64 = char_counts.iter().map(|&c| c as u64).sum::<u64>().max(1);

        char_counts
            .iter()
            .map(|&chars| {
                let share = (available as u128 * chars as u128 / total_chars as u128) as u64;
                share.max(self.config.reading_time_ms(chars))
            })
            .collect()
    }
}
