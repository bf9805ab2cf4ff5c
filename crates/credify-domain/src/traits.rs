//! Trait interfaces shared by the record types

use crate::source::Source;
use crate::verdict::Verdict;

/// Read-only view over anything that carries a verdict
///
/// Both [`crate::Claim`] and [`crate::VerificationResult`] implement this,
/// so renderers do not need to know which one they hold.
pub trait Assessment {
    /// Outcome
    fn verdict(&self) -> &Verdict;

    /// Confidence percentage
    fn confidence(&self) -> f64;

    /// Reasoning, if any
    fn explanation(&self) -> Option<&str>;

    /// Merged evidence list
    fn sources(&self) -> &[Source];

    /// The claim text, when the record carries it
    fn claim_text(&self) -> Option<&str> {
        None
    }

    /// ISO-8601 creation time, when the record is persisted
    fn created_at(&self) -> Option<&str> {
        None
    }
}
