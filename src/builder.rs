/*!
 * Assembly of the output subtitle stream.
 *
 * Lines arrive in file order together with the index of the source entry
 * they came from. The builder collapses lines that repeat an already placed
 * one, keeps the source-to-output mapping, and records every produced line so
 * the integrity check can account for collapsed text.
 */

use std::collections::{BTreeMap, HashMap};

use log::debug;
use serde::Serialize;

use crate::subtitle_processor::SubtitleEntry;
use crate::timing::TimeWindow;

/// Where a pushed line ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Placed as a new output entry at this position (0-based)
    Kept(usize),
    /// Identical to the output entry at this position and dropped
    Collapsed(usize),
}

/// One produced line, kept or collapsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProducedLine {
    pub origin: usize,
    pub text: String,
    pub collapsed: bool,
}

/// Source entry index to output entry indices, both 1-based
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MappingRecord {
    links: BTreeMap<usize, Vec<usize>>,
}

impl MappingRecord {
    /// Link a source entry to an output entry
    pub fn record(&mut self, original: usize, adjusted: usize) {
        let targets = self.links.entry(original).or_default();
        if !targets.contains(&adjusted) {
            targets.push(adjusted);
        }
    }

    /// Output entries produced from a source entry
    pub fn new_indices(&self, original: usize) -> &[usize] {
        self.links.get(&original).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Source entries that contributed to an output entry
    pub fn origins_of(&self, adjusted: usize) -> Vec<usize> {
        self.links
            .iter()
            .filter(|(_, targets)| targets.contains(&adjusted))
            .map(|(&original, _)| original)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Everything the builder produced
#[derive(Debug, Clone, Default)]
pub struct BuildOutput {
    pub entries: Vec<SubtitleEntry>,
    pub mapping: MappingRecord,
    pub production: Vec<ProducedLine>,
}

impl BuildOutput {
    /// Number of lines dropped as duplicates
    pub fn collapsed_count(&self) -> usize {
        self.production.iter().filter(|line| line.collapsed).count()
    }
}

/// Identity of a line for duplicate detection
pub type DedupKey = (String, u64, u64);

/// Normalized text plus both timings rounded to `tolerance_ms` buckets
pub fn dedup_key(text: &str, window: TimeWindow, tolerance_ms: u64) -> DedupKey {
    let tolerance_ms = tolerance_ms.max(1);
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
    let half = tolerance_ms / 2;
    (
        normalized,
        (window.start_ms + half) / tolerance_ms,
        (window.end_ms + half) / tolerance_ms,
    )
}

/// Accumulates output lines in order
#[derive(Debug)]
pub struct SubtitleBuilder {
    tolerance_ms: u64,
    lines: Vec<(String, TimeWindow)>,
    placed: HashMap<DedupKey, usize>,
    mapping: MappingRecord,
    production: Vec<ProducedLine>,
}

impl SubtitleBuilder {
    /// Create a builder; timings within `tolerance_ms` count as equal
    pub fn new(tolerance_ms: u64) -> Self {
        Self {
            tolerance_ms: tolerance_ms.max(1),
            lines: Vec::new(),
            placed: HashMap::new(),
            mapping: MappingRecord::default(),
            production: Vec::new(),
        }
    }

    /// Append a line produced from source entry `origin` (1-based)
    pub fn push_line(&mut self, origin: usize, text: &str, window: TimeWindow) -> Placement {
        let key = dedup_key(text, window, self.tolerance_ms);

        if let Some(&existing) = self.placed.get(&key) {
            debug!("Collapsing duplicate line '{}' from entry {} into entry {}", text, origin, existing + 1);
            self.mapping.record(origin, existing + 1);
            self.production.push(ProducedLine {
                origin,
                text: text.to_string(),
                collapsed: true,
            });
            return Placement::Collapsed(existing);
        }

        let index = self.lines.len();
        self.lines.push((text.to_string(), window));
        self.placed.insert(key, index);
        self.mapping.record(origin, index + 1);
        self.production.push(ProducedLine {
            origin,
            text: text.to_string(),
            collapsed: false,
        });
        Placement::Kept(index)
    }

    /// Copy of the kept windows, in order, for the gap pass
    pub fn windows(&self) -> Vec<TimeWindow> {
        self.lines.iter().map(|(_, window)| *window).collect()
    }

    /// Replace the kept windows after the gap pass
    pub fn set_windows(&mut self, windows: &[TimeWindow]) {
        for ((_, slot), window) in self.lines.iter_mut().zip(windows) {
            *slot = *window;
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Produce numbered entries, starting at 1
    pub fn finish(self) -> BuildOutput {
        let entries = self
            .lines
            .into_iter()
            .enumerate()
            .map(|(i, (text, window))| {
                SubtitleEntry::new(i + 1, window.start_ms, window.end_ms, text)
            })
            .collect();

        BuildOutput {
            entries,
            mapping: self.mapping,
            production: self.production,
        }
    }
}
