//! Verification result module - the answer to a single check request

use crate::source::Source;
use crate::traits::Assessment;
use crate::verdict::Verdict;

/// Immediate output of one verification request
///
/// Not necessarily persisted, so it carries no id or timestamp. The
/// service may spread evidence over several arrays; by the time a value of
/// this type exists they have been merged into `sources`.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationResult {
    /// Outcome
    pub verdict: Verdict,

    /// Confidence percentage, nominally in [0, 100]
    pub confidence: f64,

    /// Reasoning behind the verdict
    pub explanation: String,

    /// Evidence in service order
    pub sources: Vec<Source>,
}

impl VerificationResult {
    /// Create a result with no sources
    pub fn new(verdict: Verdict, confidence: f64, explanation: impl Into<String>) -> Self {
        Self {
            verdict,
            confidence,
            explanation: explanation.into(),
            sources: Vec::new(),
        }
    }

    /// Attach sources
    pub fn with_sources(mut self, sources: Vec<Source>) -> Self {
        self.sources = sources;
        self
    }
}

impl Assessment for VerificationResult {
    fn verdict(&self) -> &Verdict {
        &self.verdict
    }

    fn confidence(&self) -> f64 {
        self.confidence
    }

    fn explanation(&self) -> Option<&str> {
        Some(&self.explanation)
    }

    fn sources(&self) -> &[Source] {
        &self.sources
    }
}
