use log::debug;

use crate::subtitle_processor::SubtitleEntry;

/// Shifts every timing of a finished subtitle stream by a fixed lead-in
#[derive(Debug, Clone, Copy)]
pub struct OffsetApplier {
    offset_ms: u64,
}

impl OffsetApplier {
    /// Create an applier for a validated, non-negative offset in milliseconds
    pub fn new(offset_ms: u64) -> Self {
        Self { offset_ms }
    }

    pub fn offset_ms(&self) -> u64 {
        self.offset_ms
    }

    /// Return shifted copies of the entries
    ///
    /// A uniform shift keeps every duration and every gap unchanged.
    pub fn apply(&self, entries: Vec<SubtitleEntry>) -> Vec<SubtitleEntry> {
        if self.offset_ms == 0 {
            return entries;
        }

        debug!("Shifting {} entries by {}ms", entries.len(), self.offset_ms);

        entries
            .into_iter()
            .map(|entry| SubtitleEntry {
                start_time_ms: entry.start_time_ms + self.offset_ms,
                end_time_ms: entry.end_time_ms + self.offset_ms,
                ..entry
            })
            .collect()
    }
}
