//! Claim module - persisted verification records

use crate::source::Source;
use crate::traits::Assessment;
use crate::verdict::Verdict;

/// A verification record as stored by the service
///
/// `id` and `created_at` are assigned remotely; the client never fills them
/// in. Claims are immutable once received.
#[derive(Debug, Clone, PartialEq)]
pub struct Claim {
    /// Record identifier (service-assigned)
    pub id: Option<String>,

    /// The claim text that was checked
    pub claim: String,

    /// Outcome
    pub verdict: Verdict,

    /// Confidence percentage, nominally in [0, 100]
    pub confidence: f64,

    /// Reasoning behind the verdict
    pub explanation: Option<String>,

    /// Evidence, already merged into one list
    pub sources: Vec<Source>,

    /// ISO-8601 creation time (service-assigned)
    pub created_at: Option<String>,
}

impl Claim {
    /// Create a claim record without persistence metadata
    pub fn new(claim: impl Into<String>, verdict: Verdict, confidence: f64) -> Self {
        Self {
            id: None,
            claim: claim.into(),
            verdict,
            confidence,
            explanation: None,
            sources: Vec::new(),
            created_at: None,
        }
    }

    /// Whether the record can be opened on its own
    pub fn is_addressable(&self) -> bool {
        self.id.as_deref().is_some_and(|id| !id.trim().is_empty())
    }
}

impl Assessment for Claim {
    fn verdict(&self) -> &Verdict {
        &self.verdict
    }

    fn confidence(&self) -> f64 {
        self.confidence
    }

    fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    fn sources(&self) -> &[Source] {
        &self.sources
    }

    fn claim_text(&self) -> Option<&str> {
        Some(&self.claim)
    }

    fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
}
