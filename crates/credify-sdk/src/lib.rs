//! Credify Rust SDK
//!
//! Async client for the claim verification service.
//!
//! # Example
//!
//! ```no_run
//! use credify_sdk::CredifyClient;
//!
//! # async fn run() -> Result<(), credify_sdk::ApiError> {
//! let client = CredifyClient::new("http://localhost:8000")?;
//!
//! let result = client.verify_claim("The Earth is flat").await?;
//! println!("{} ({}%)", result.verdict, result.confidence);
//!
//! for claim in client.get_recent_history().await? {
//!     println!("{}", claim.claim);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod error;
mod wire;

pub use client::{ClientConfig, CredifyClient, DEFAULT_HISTORY_LIMIT};
pub use error::ApiError;
pub use wire::HealthStatus;
