/*!
 * Content-integrity verification.
 *
 * Every word of the source dialogue must reach the output. Words dropped by
 * duplicate collapsing are accounted for separately, so the guarantee is:
 *
 * ```text
 * original words == emitted words + collapsed words
 * ```
 */

use log::{debug, error};

use crate::app_config::IntegrityMode;
use crate::builder::ProducedLine;
use crate::errors::IntegrityError;
use crate::subtitle_processor::SubtitleEntry;

/// Words of context reported on each side of a mismatch
const CONTEXT_WORDS: usize = 5;

/// Counts gathered by a passing check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegrityReport {
    pub original_words: usize,
    pub emitted_words: usize,
    pub collapsed_words: usize,
}

/// Word-count verifier for a finished run
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegrityChecker {
    mode: IntegrityMode,
}

impl IntegrityChecker {
    pub fn new(mode: IntegrityMode) -> Self {
        Self { mode }
    }

    /// Verify that no word was lost between `original` and `emitted`
    ///
    /// `production` lists every line the builder produced, collapsed ones
    /// included, in production order.
    pub fn check(
        &self,
        original: &[SubtitleEntry],
        emitted: &[SubtitleEntry],
        production: &[ProducedLine],
    ) -> Result<IntegrityReport, IntegrityError> {
        let report = IntegrityReport {
            original_words: original.iter().map(SubtitleEntry::word_count).sum(),
            emitted_words: emitted.iter().map(SubtitleEntry::word_count).sum(),
            collapsed_words: production
                .iter()
                .filter(|line| line.collapsed)
                .map(|line| line.text.split_whitespace().count())
                .sum(),
        };

        if self.mode == IntegrityMode::Detailed {
            let original_words: Vec<&str> = original.iter().flat_map(|e| e.text.split_whitespace()).collect();
            let produced_words: Vec<&str> = production.iter().flat_map(|l| l.text.split_whitespace()).collect();
            Self::compare_sequences(&original_words, &produced_words)?;
        }

        if report.original_words != report.emitted_words + report.collapsed_words {
            error!(
                "Word count mismatch: {} original, {} emitted, {} collapsed",
                report.original_words, report.emitted_words, report.collapsed_words
            );
            return Err(IntegrityError::WordCountMismatch {
                original: report.original_words,
                emitted: report.emitted_words,
                collapsed: report.collapsed_words,
            });
        }

        debug!(
            "Integrity check passed: {} words ({} collapsed as duplicates)",
            report.original_words, report.collapsed_words
        );
        Ok(report)
    }

    /// Find the first position where the two word sequences differ
    fn compare_sequences(original: &[&str], adjusted: &[&str]) -> Result<(), IntegrityError> {
        let longest = original.len().max(adjusted.len());

        for position in 0..longest {
            let left = original.get(position).copied();
            let right = adjusted.get(position).copied();
            if left == right {
                continue;
            }

            error!("First word mismatch at position {}", position);
            return Err(IntegrityError::WordMismatch {
                position,
                original_word: left.unwrap_or("<missing>").to_string(),
                adjusted_word: right.unwrap_or("<missing>").to_string(),
                original_context: context(original, position),
                adjusted_context: context(adjusted, position),
            });
        }

        Ok(())
    }
}

/// Up to `CONTEXT_WORDS` words on each side of `position`
fn context(words: &[&str], position: usize) -> String {
    let start = position.saturating_sub(CONTEXT_WORDS);
    let end = (position + CONTEXT_WORDS + 1).min(words.len());
    if start >= end {
        return String::new();
    }
    words[start..end].join(" ")
}
