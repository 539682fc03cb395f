use serde::Serialize;

use crate::linguistics::{GrammaticalRole, Token};

/// Kind of boundary at a candidate split position, lowest priority first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryKind {
    Whitespace,
    Preposition,
    Clause,
    Conjunction,
    Sentence,
}

impl BoundaryKind {
    /// Priority rank; higher wins
    pub fn rank(self) -> u8 {
        match self {
            BoundaryKind::Whitespace => 0,
            BoundaryKind::Preposition => 1,
            BoundaryKind::Clause => 2,
            BoundaryKind::Conjunction => 3,
            BoundaryKind::Sentence => 4,
        }
    }
}

/// Why a position may not be used as a split point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VetoReason {
    /// Inside a hyphenated compound
    HyphenCompound,
    /// Inside a contraction
    Contraction,
    /// No whitespace between the tokens
    Unspaced,
}

/// Candidate split position between two adjacent tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Breakpoint {
    /// Index of the token that would start the next line
    pub token_index: usize,
    /// Character offset of the split within the current line
    pub offset: usize,
    /// Boundary kind at this position
    pub kind: BoundaryKind,
    /// Set when the position lies inside a lexical unit
    pub veto: Option<VetoReason>,
}

impl Breakpoint {
    /// Classify the position between `tokens[token_index - 1]` and `tokens[token_index]`
    pub fn between(left: &Token, right: &Token, token_index: usize, offset: usize) -> Self {
        Self {
            token_index,
            offset,
            kind: Self::boundary_kind(left, right),
            veto: Self::veto_reason(left, right),
        }
    }

    /// Priority rank derived from the boundary kind
    pub fn priority(&self) -> u8 {
        self.kind.rank()
    }

    /// Whether the position may be chosen
    pub fn is_eligible(&self) -> bool {
        self.veto.is_none()
    }

    fn boundary_kind(left: &Token, right: &Token) -> BoundaryKind {
        if left.sentence_boundary {
            BoundaryKind::Sentence
        } else if right.role == GrammaticalRole::CoordinatingConjunction {
            BoundaryKind::Conjunction
        } else if left.ends_clause() || right.role == GrammaticalRole::SubordinatingConjunction {
            BoundaryKind::Clause
        } else if right.role == GrammaticalRole::Preposition {
            BoundaryKind::Preposition
        } else {
            BoundaryKind::Whitespace
        }
    }

    fn veto_reason(left: &Token, right: &Token) -> Option<VetoReason> {
        let hyphen_joined = left.is_hyphen_compound
            && right.is_hyphen_compound
            && (left.surface.ends_with('-') || right.surface.starts_with('-'));
        let contraction_joined = left.is_contraction
            && right.is_contraction
            && right.surface.starts_with(['\'', '’']);

        if !left.trailing_whitespace || hyphen_joined || contraction_joined {
            if left.is_hyphen_compound && right.is_hyphen_compound {
                Some(VetoReason::HyphenCompound)
            } else if left.is_contraction && right.is_contraction {
                Some(VetoReason::Contraction)
            } else if !left.trailing_whitespace {
                Some(VetoReason::Unspaced)
            } else if hyphen_joined {
                Some(VetoReason::HyphenCompound)
            } else {
                Some(VetoReason::Contraction)
            }
        } else {
            None
        }
    }
}
