/*!
 * Re-timing of segmented subtitles.
 *
 * - `normalizer`: per-entry window allocation and the stream-wide gap pass
 * - `offset`: uniform lead-in shift of the finished stream
 */

pub mod normalizer;
pub mod offset;

// Re-export main types
pub use normalizer::{EntryTiming, TimeWindow, TimingAdjustment, TimingNormalizer};
pub use offset::OffsetApplier;
