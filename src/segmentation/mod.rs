/*!
 * Line segmentation for subtitle text.
 *
 * Turns one annotated text block into display lines that respect the
 * configured line length without splitting hyphenated compounds or
 * contractions.
 *
 * # Architecture
 *
 * - `breakpoints`: classification and ranking of candidate split positions
 * - `segmenter`: greedy accumulation with priority back-off
 */

pub mod breakpoints;
pub mod segmenter;

// Re-export main types
pub use breakpoints::{BoundaryKind, Breakpoint, VetoReason};
pub use segmenter::{BreakDecision, Phrase, PhraseBoundary, Segmentation, Segmenter};
