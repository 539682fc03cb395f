/*!
 * Validation of a normalization run.
 *
 * - `integrity`: verifies no dialogue word was lost; failures abort the run
 * - `audit`: reports output timings that break a configured bound
 */

pub mod integrity;
pub mod audit;

// Re-export main types
pub use integrity::{IntegrityChecker, IntegrityReport};
pub use audit::{AuditFinding, AuditReport, TimingAudit, TimingIssue};
