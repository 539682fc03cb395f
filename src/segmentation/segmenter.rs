use log::debug;
use serde::Serialize;

use crate::app_config::Config;
use crate::linguistics::Token;
use super::breakpoints::{BoundaryKind, Breakpoint};

/// How a phrase ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhraseBoundary {
    Sentence,
    Clause,
    Conjunction,
    Preposition,
    /// Split at plain whitespace because the line was full
    ForcedLength,
    /// A single unsplittable unit longer than the line limit
    SingleTokenOverflow,
    /// Last phrase of the text
    EndOfText,
}

impl From<BoundaryKind> for PhraseBoundary {
    fn from(kind: BoundaryKind) -> Self {
        match kind {
            BoundaryKind::Sentence => PhraseBoundary::Sentence,
            BoundaryKind::Conjunction => PhraseBoundary::Conjunction,
            BoundaryKind::Clause => PhraseBoundary::Clause,
            BoundaryKind::Preposition => PhraseBoundary::Preposition,
            BoundaryKind::Whitespace => PhraseBoundary::ForcedLength,
        }
    }
}

/// One display line produced by segmentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Phrase {
    pub content: String,
    pub char_count: usize,
    pub boundary: PhraseBoundary,
}

impl Phrase {
    /// Whether the phrase is longer than the line limit
    pub fn overflows(&self, max_line_length: usize) -> bool {
        self.char_count > max_line_length
    }
}

/// Record of one overflow and how it was resolved
#[derive(Debug, Clone, Serialize)]
pub struct BreakDecision {
    /// Token that did not fit on the line
    pub overflow_token: usize,
    /// Every position considered, vetoed ones included
    pub considered: Vec<Breakpoint>,
    /// Position used, if any was eligible
    pub chosen: Option<Breakpoint>,
}

/// Output of segmenting one text block
#[derive(Debug, Clone, Default)]
pub struct Segmentation {
    pub phrases: Vec<Phrase>,
    pub decisions: Vec<BreakDecision>,
}

impl Segmentation {
    /// Line strings in display order
    pub fn lines(&self) -> Vec<String> {
        self.phrases.iter().map(|p| p.content.clone()).collect()
    }
}

/// Greedy line breaker with priority back-off
#[derive(Debug, Clone)]
pub struct Segmenter {
    max_line_length: usize,
}

impl Segmenter {
    /// Create a segmenter from the run configuration
    pub fn new(config: &Config) -> Self {
        Self::with_max_line_length(config.max_line_length)
    }

    /// Create a segmenter with an explicit line limit
    pub fn with_max_line_length(max_line_length: usize) -> Self {
        Self { max_line_length }
    }

    /// Split annotated tokens into display lines
    ///
    /// Tokens are accumulated while the line fits. On overflow the line is
    /// cut at the highest-priority eligible breakpoint at or before the
    /// overflowing token, preferring the rightmost one on ties. A lexical
    /// unit that cannot fit on any line is emitted alone.
    pub fn segment(&self, tokens: &[Token]) -> Segmentation {
        let mut result = Segmentation::default();
        let mut start = 0;

        while start < tokens.len() {
            let end = self.fitting_end(tokens, start);

            if end == tokens.len() {
                result.phrases.push(Self::phrase(tokens, start, end, PhraseBoundary::EndOfText));
                break;
            }

            let considered: Vec<Breakpoint> = (start + 1..=end)
                .map(|p| Breakpoint::between(&tokens[p - 1], &tokens[p], p, rendered_len(tokens, start, p)))
                .collect();

            let chosen = considered
                .iter()
                .filter(|bp| bp.is_eligible())
                .max_by_key(|bp| (bp.priority(), bp.token_index))
                .copied();

            let stop = match chosen {
                Some(bp) => bp.token_index,
                None => Self::unit_end(tokens, end),
            };

            let boundary = match chosen {
                Some(bp) if rendered_len(tokens, start, stop) <= self.max_line_length => bp.kind.into(),
                _ => PhraseBoundary::SingleTokenOverflow,
            };

            if boundary == PhraseBoundary::SingleTokenOverflow {
                debug!(
                    "Unit '{}' exceeds the {}-character line limit, emitting it alone",
                    render(tokens, start, stop),
                    self.max_line_length
                );
            }

            result.decisions.push(BreakDecision {
                overflow_token: end,
                considered,
                chosen,
            });
            result.phrases.push(Self::phrase(tokens, start, stop, boundary));
            start = stop;
        }

        result
    }

    /// Exclusive end of the longest prefix from `start` that fits; always takes one token
    fn fitting_end(&self, tokens: &[Token], start: usize) -> usize {
        let mut end = start + 1;
        let mut len = tokens[start].char_count();

        while end < tokens.len() {
            let separator = usize::from(tokens[end - 1].trailing_whitespace);
            let next_len = len + separator + tokens[end].char_count();
            if next_len > self.max_line_length {
                break;
            }
            len = next_len;
            end += 1;
        }

        end
    }

    /// First eligible position after `from`, or the end of the tokens
    fn unit_end(tokens: &[Token], from: usize) -> usize {
        (from + 1..tokens.len())
            .find(|&p| Breakpoint::between(&tokens[p - 1], &tokens[p], p, 0).is_eligible())
            .unwrap_or(tokens.len())
    }

    fn phrase(tokens: &[Token], start: usize, end: usize, boundary: PhraseBoundary) -> Phrase {
        let content = render(tokens, start, end);
        Phrase {
            char_count: content.chars().count(),
            content,
            boundary,
        }
    }
}

/// Text of `tokens[start..end]` with source spacing
fn render(tokens: &[Token], start: usize, end: usize) -> String {
    let mut line = String::new();
    for (i, token) in tokens[start..end].iter().enumerate() {
        line.push_str(&token.surface);
        if token.trailing_whitespace && start + i + 1 < end {
            line.push(' ');
        }
    }
    line
}

fn rendered_len(tokens: &[Token], start: usize, end: usize) -> usize {
    let words: usize = tokens[start..end].iter().map(Token::char_count).sum();
    let spaces = tokens[start..end.saturating_sub(1).max(start)]
        .iter()
        .filter(|t| t.trailing_whitespace)
        .count();
    words + spaces
}
