/*!
 * Linguistic annotation for subtitle text.
 *
 * The segmenter never looks at raw text; it works on tokens annotated by a
 * `LinguisticAnalyzer`. This module defines that contract:
 * - `token`: the annotated token and its coarse grammatical role
 * - `rule_based`: a deterministic English analyzer built on word tables
 */

use std::fmt::Debug;

use crate::errors::AnalyzerError;

pub mod token;
pub mod rule_based;

pub use token::{GrammaticalRole, Token};
pub use rule_based::RuleBasedAnalyzer;

/// Common trait for all linguistic analyzer backends
///
/// This trait defines the interface that every analyzer must follow,
/// allowing them to be used interchangeably by the normalization pipeline.
pub trait LinguisticAnalyzer: Debug {
    /// Annotate a block of text
    ///
    /// # Arguments
    /// * `text` - Single-line text of one subtitle entry
    ///
    /// # Returns
    /// * `Result<Vec<Token>, AnalyzerError>` - Tokens in text order, or an error
    fn analyze(&self, text: &str) -> Result<Vec<Token>, AnalyzerError>;

    /// Short name used in log messages
    fn name(&self) -> &str;
}
