use serde::Serialize;

/// Coarse grammatical role of a token, as far as line breaking cares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GrammaticalRole {
    /// and, but, or, ...
    CoordinatingConjunction,
    /// because, when, which, ...
    SubordinatingConjunction,
    /// in, on, with, ...
    Preposition,
    /// Token made only of punctuation
    Punctuation,
    #[default]
    Other,
}

/// One annotated token of a text block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Text of the token exactly as it appears in the source
    pub surface: String,

    /// Whether whitespace follows the token in the source
    pub trailing_whitespace: bool,

    /// Whether a sentence ends after this token
    pub sentence_boundary: bool,

    /// Grammatical role
    pub role: GrammaticalRole,

    /// Part of a hyphenated compound such as "midnight-thirty"
    pub is_hyphen_compound: bool,

    /// Part of a contraction such as "can't"
    pub is_contraction: bool,
}

impl Token {
    /// Plain word token followed by whitespace
    pub fn word(surface: &str) -> Self {
        Self {
            surface: surface.to_string(),
            trailing_whitespace: true,
            sentence_boundary: false,
            role: GrammaticalRole::Other,
            is_hyphen_compound: false,
            is_contraction: false,
        }
    }

    /// Set the trailing whitespace flag
    pub fn with_trailing_whitespace(mut self, trailing_whitespace: bool) -> Self {
        self.trailing_whitespace = trailing_whitespace;
        self
    }

    /// Set the sentence boundary flag
    pub fn with_sentence_boundary(mut self, sentence_boundary: bool) -> Self {
        self.sentence_boundary = sentence_boundary;
        self
    }

    /// Set the grammatical role
    pub fn with_role(mut self, role: GrammaticalRole) -> Self {
        self.role = role;
        self
    }

    /// Mark the token as part of a hyphenated compound
    pub fn hyphen_compound(mut self) -> Self {
        self.is_hyphen_compound = true;
        self
    }

    /// Mark the token as part of a contraction
    pub fn contraction(mut self) -> Self {
        self.is_contraction = true;
        self
    }

    /// Length in characters
    pub fn char_count(&self) -> usize {
        self.surface.chars().count()
    }

    /// Whether the token closes a clause with `,`, `;` or `:`
    pub fn ends_clause(&self) -> bool {
        self.surface.trim_end_matches(['"', '\'', '”', '’', ')', ']'])
            .ends_with([',', ';', ':'])
    }

    /// Whether the token belongs to a lexical unit that must stay on one line
    pub fn is_lexical_unit(&self) -> bool {
        self.is_hyphen_compound || self.is_contraction
    }
}
