/*!
 * Deterministic English analyzer.
 *
 * Splits text on whitespace and annotates each chunk from fixed word tables.
 * Punctuation stays attached to its word, so hyphenated compounds and
 * contractions are always a single token here.
 */

use std::collections::HashSet;
use once_cell::sync::Lazy;
use log::trace;

use crate::errors::AnalyzerError;
use super::{GrammaticalRole, LinguisticAnalyzer, Token};

static COORDINATING_CONJUNCTIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["and", "but", "or", "nor", "yet", "so"].into_iter().collect()
});

static SUBORDINATING_CONJUNCTIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "because", "although", "though", "while", "whereas", "when", "whenever",
        "where", "wherever", "if", "unless", "until", "since", "whether",
        "which", "who", "whom", "whose", "that",
    ]
    .into_iter()
    .collect()
});

static PREPOSITIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "about", "above", "across", "after", "against", "along", "among", "around",
        "at", "before", "behind", "below", "beneath", "beside", "between", "beyond",
        "by", "despite", "down", "during", "except", "for", "from", "in", "inside",
        "into", "like", "near", "of", "off", "on", "onto", "out", "outside", "over",
        "past", "through", "throughout", "to", "toward", "towards", "under",
        "underneath", "upon", "with", "within", "without",
    ]
    .into_iter()
    .collect()
});

// Words ending in a period that do not end a sentence
static ABBREVIATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["mr.", "mrs.", "ms.", "dr.", "st.", "jr.", "sr.", "vs.", "e.g.", "i.e.", "etc.", "prof.", "lt.", "sgt."]
        .into_iter()
        .collect()
});

const CLOSING_MARKS: [char; 6] = ['"', '\'', '”', '’', ')', ']'];

/// Word-table analyzer for English dialogue
#[derive(Debug, Default, Clone)]
pub struct RuleBasedAnalyzer;

impl RuleBasedAnalyzer {
    /// Create a new analyzer
    pub fn new() -> Self {
        Self
    }

    /// Annotate a single whitespace-free chunk
    fn annotate(chunk: &str, trailing_whitespace: bool) -> Token {
        let core = Self::core_word(chunk);
        let lowered = core.to_lowercase();

        let role = if !chunk.chars().any(char::is_alphanumeric) {
            GrammaticalRole::Punctuation
        } else if COORDINATING_CONJUNCTIONS.contains(lowered.as_str()) {
            GrammaticalRole::CoordinatingConjunction
        } else if SUBORDINATING_CONJUNCTIONS.contains(lowered.as_str()) {
            GrammaticalRole::SubordinatingConjunction
        } else if PREPOSITIONS.contains(lowered.as_str()) {
            GrammaticalRole::Preposition
        } else {
            GrammaticalRole::Other
        };

        Token {
            surface: chunk.to_string(),
            trailing_whitespace,
            sentence_boundary: Self::ends_sentence(chunk),
            role,
            is_hyphen_compound: Self::has_inner_mark(core, &['-', '‐']),
            is_contraction: Self::has_inner_mark(core, &['\'', '’']),
        }
    }

    /// Strip leading and trailing punctuation, keeping inner marks
    fn core_word(chunk: &str) -> &str {
        chunk.trim_matches(|c: char| !c.is_alphanumeric())
    }

    /// Whether one of `marks` sits between two alphanumeric characters
    fn has_inner_mark(core: &str, marks: &[char]) -> bool {
        let chars: Vec<char> = core.chars().collect();
        chars.windows(3).any(|w| {
            w[0].is_alphanumeric() && marks.contains(&w[1]) && w[2].is_alphanumeric()
        })
    }

    fn ends_sentence(chunk: &str) -> bool {
        let stripped = chunk.trim_end_matches(CLOSING_MARKS);
        if !stripped.ends_with(['.', '!', '?', '…']) {
            return false;
        }
        !ABBREVIATIONS.contains(stripped.to_lowercase().as_str())
    }
}

impl LinguisticAnalyzer for RuleBasedAnalyzer {
    fn analyze(&self, text: &str) -> Result<Vec<Token>, AnalyzerError> {
        let chunks: Vec<&str> = text.split_whitespace().collect();
        let last = chunks.len().saturating_sub(1);

        let tokens: Vec<Token> = chunks
            .iter()
            .enumerate()
            .map(|(i, chunk)| Self::annotate(chunk, i < last))
            .collect();

        trace!("Analyzed {} tokens from {:?}", tokens.len(), text);
        Ok(tokens)
    }

    fn name(&self) -> &str {
        "rule-based"
    }
}
