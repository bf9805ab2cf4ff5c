//! Credify Domain Layer
//!
//! Shared shapes exchanged with the verification service. This crate has no
//! external dependencies and performs no I/O; wire formats live in
//! `credify-sdk` and rendering lives in `credify-cli`.
//!
//! ## Key Concepts
//!
//! - **Claim**: a persisted verification record
//! - **VerificationResult**: the immediate answer to one check request
//! - **Verdict**: closed set of outcomes, with an explicit fallback arm
//! - **Source**: a cited piece of evidence
//! - **Confidence**: percentage certainty, classified into four tiers

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod claim;
pub mod confidence;
pub mod source;
pub mod traits;
pub mod verdict;
pub mod verification;

// Re-exports for convenience
pub use claim::Claim;
pub use confidence::ConfidenceTier;
pub use source::Source;
pub use traits::Assessment;
pub use verdict::Verdict;
pub use verification::VerificationResult;
