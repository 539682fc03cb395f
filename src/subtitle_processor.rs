use std::fmt;
use std::path::{Path, PathBuf};
use regex::Regex;
use once_cell::sync::Lazy;
use log::{warn, debug};
use crate::errors::InputError;

// @module: SubRip reading and writing

// @const: SRT timestamp regex
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,3}):(\d{2}):(\d{2})[,.](\d{3})\s*-->\s*(\d{1,3}):(\d{2}):(\d{2})[,.](\d{3})").expect("Invalid timestamp regex")
});

// @struct: Single subtitle entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleEntry {
    // @field: Sequence number
    pub seq_num: usize,

    // @field: Start time in ms
    pub start_time_ms: u64,

    // @field: End time in ms
    pub end_time_ms: u64,

    // @field: Subtitle text
    pub text: String,
}

impl SubtitleEntry {
    /// Creates a new subtitle entry
    pub fn new(seq_num: usize, start_time_ms: u64, end_time_ms: u64, text: String) -> Self {
        SubtitleEntry {
            seq_num,
            start_time_ms,
            end_time_ms,
            text,
        }
    }

    /// Parse an SRT timestamp (`HH:MM:SS,mmm`, `.` also accepted) to milliseconds
    pub fn parse_timestamp(timestamp: &str) -> Result<u64, String> {
        let parts: Vec<&str> = timestamp.trim().split(&[':', ',', '.'][..]).collect();
        let [hours, minutes, seconds, millis] = parts.as_slice() else {
            return Err(format!("Invalid timestamp format: {}", timestamp));
        };

        let mut values = [0u64; 4];
        for (value, part) in values.iter_mut().zip([hours, minutes, seconds, millis]) {
            *value = part
                .parse()
                .map_err(|_| format!("Non-numeric component '{}' in timestamp: {}", part, timestamp))?;
        }

        Self::timestamp_from_parts(values).ok_or_else(|| format!("Invalid time components in timestamp: {}", timestamp))
    }

    /// Milliseconds for hours, minutes, seconds and millis, if each is in range
    fn timestamp_from_parts([hours, minutes, seconds, millis]: [u64; 4]) -> Option<u64> {
        (minutes < 60 && seconds < 60 && millis < 1000)
            .then(|| hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis)
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        Self::format_timestamp(self.start_time_ms)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        Self::format_timestamp(self.end_time_ms)
    }

    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }

    /// Duration of the entry in milliseconds
    pub fn duration_ms(&self) -> u64 {
        self.end_time_ms.saturating_sub(self.start_time_ms)
    }

    /// Text with internal line breaks folded into single spaces
    pub fn flattened_text(&self) -> String {
        self.text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Whitespace-delimited word count of the text
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Collection of subtitle entries with metadata
#[derive(Debug)]
pub struct SubtitleCollection {
    /// Source filename
    pub source_file: PathBuf,

    /// List of subtitle entries
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleCollection {
    /// Read and parse a SubRip file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, InputError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(InputError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|source| InputError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let entries = Self::parse_srt_string(&content)?;
        debug!("Parsed {} entries from {:?}", entries.len(), path);

        Ok(SubtitleCollection {
            source_file: path.to_path_buf(),
            entries,
        })
    }

    /// Render the collection in SubRip syntax
    pub fn to_srt_string(&self) -> String {
        self.entries.iter().map(|entry| entry.to_string()).collect()
    }

    /// Total whitespace-delimited word count over all entries
    pub fn word_count(&self) -> usize {
        self.entries.iter().map(SubtitleEntry::word_count).sum()
    }

    /// Parse SRT format string into subtitle entries
    pub fn parse_srt_string(content: &str) -> Result<Vec<SubtitleEntry>, InputError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut entries = Vec::new();

        // State variables for parsing
        let mut current_seq_num: Option<usize> = None;
        let mut current_times: Option<(u64, u64)> = None;
        let mut current_text = String::new();
        let mut block_line = 0;

        for (idx, line) in content.lines().enumerate() {
            let line_number = idx + 1;
            let trimmed = line.trim();

            // Blank lines close the current entry
            if trimmed.is_empty() {
                if current_seq_num.is_some() {
                    Self::finish_entry(&mut entries, current_seq_num, current_times, &current_text, block_line)?;
                    current_seq_num = None;
                    current_times = None;
                    current_text.clear();
                }
                continue;
            }

            match (current_seq_num, current_times) {
                (None, _) => {
                    let num = trimmed.parse::<usize>().map_err(|_| InputError::Malformed {
                        line: line_number,
                        reason: format!("expected a sequence number, found '{}'", trimmed),
                    })?;
                    current_seq_num = Some(num);
                    block_line = line_number;
                }
                (Some(_), None) => {
                    current_times = Some(Self::parse_timing_line(trimmed, line_number)?);
                }
                (Some(_), Some(_)) => {
                    if !current_text.is_empty() {
                        current_text.push('\n');
                    }
                    current_text.push_str(trimmed);
                }
            }
        }

        // Add the last entry if there is one
        if current_seq_num.is_some() {
            Self::finish_entry(&mut entries, current_seq_num, current_times, &current_text, block_line)?;
        }

        if entries.is_empty() {
            return Err(InputError::Empty);
        }

        // Sort by start time to ensure correct order
        entries.sort_by_key(|entry| entry.start_time_ms);

        // Check for overlapping entries
        let overlap_count = entries
            .windows(2)
            .filter(|pair| pair[0].end_time_ms > pair[1].start_time_ms)
            .count();

        if overlap_count > 0 {
            warn!("Found {} overlapping subtitle entries", overlap_count);
        }

        // Renumber entries to ensure sequential order
        for (i, entry) in entries.iter_mut().enumerate() {
            entry.seq_num = i + 1;
        }

        Ok(entries)
    }

    fn finish_entry(
        entries: &mut Vec<SubtitleEntry>,
        seq_num: Option<usize>,
        times: Option<(u64, u64)>,
        text: &str,
        block_line: usize,
    ) -> Result<(), InputError> {
        let (Some(seq_num), Some((start_ms, end_ms))) = (seq_num, times) else {
            return Err(InputError::Malformed {
                line: block_line,
                reason: "entry has no timing line".to_string(),
            });
        };

        if text.trim().is_empty() {
            warn!("Skipping empty subtitle entry {}", seq_num);
            return Ok(());
        }

        entries.push(SubtitleEntry::new(seq_num, start_ms, end_ms, text.trim().to_string()));
        Ok(())
    }

    /// Parse a `start --> end` line, rejecting inverted or empty windows
    fn parse_timing_line(line: &str, line_number: usize) -> Result<(u64, u64), InputError> {
        let caps = TIMESTAMP_REGEX.captures(line).ok_or_else(|| InputError::Malformed {
            line: line_number,
            reason: format!("expected 'HH:MM:SS,mmm --> HH:MM:SS,mmm', found '{}'", line),
        })?;

        let start_ms = Self::captured_timestamp(&caps, 1, line_number)?;
        let end_ms = Self::captured_timestamp(&caps, 5, line_number)?;

        if end_ms <= start_ms {
            return Err(InputError::Malformed {
                line: line_number,
                reason: format!("end time {} is not after start time {}", end_ms, start_ms),
            });
        }

        Ok((start_ms, end_ms))
    }

    /// Milliseconds of one side of a timing line; `first` is its first capture group
    fn captured_timestamp(caps: &regex::Captures, first: usize, line_number: usize) -> Result<u64, InputError> {
        let mut values = [0u64; 4];
        for (offset, value) in values.iter_mut().enumerate() {
            // The regex only captures ASCII digits, at most three per group
            *value = caps[first + offset].parse().unwrap_or_default();
        }

        SubtitleEntry::timestamp_from_parts(values).ok_or_else(|| InputError::Malformed {
            line: line_number,
            reason: format!("timestamp out of range in '{}'", &caps[0]),
        })
    }
}
