//! Rust client for the ChildSafe behavioral risk detection service.
//!
//! Callers assemble a numeric feature vector describing user interaction
//! patterns (typing cadence, touch dynamics, text statistics), tag it
//! with platform context, and submit it for either a risk assessment
//! (`detect`) or an enforcement verdict (`enforce`). Feature capture is a
//! platform concern; this crate carries only the shared client contract
//! every binding implements identically:
//!
//! ```text
//! capture module ──▶ FeaturePayload ──┐
//!                                     ├──▶ POST /v1/detect | /v1/enforce ──▶ ServiceResponse
//! platform context ──────────────────┘
//! ```
//!
//! Transport semantics are deliberately minimal: one authenticated POST
//! per call, failure classified by HTTP status alone, and success bodies
//! decoded permissively into an opaque document.
//!
//! # Example
//!
//! ```no_run
//! use childsafe_client::{Client, ClientConfig, Context, FeaturePayload, Platform};
//!
//! # async fn run() -> Result<(), childsafe_client::ClientError> {
//! let client = Client::new(ClientConfig::new("sk-example"));
//!
//! let payload = FeaturePayload::new()
//!     .with("iki_mean", 180.0)
//!     .with("typos_per_100", 9.0);
//!
//! let verdict = client.detect(&payload, &Context::new(Platform::Web)).await?;
//! if let Some(score) = verdict.score() {
//!     println!("risk score: {score}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod payload;
pub mod request;
pub mod response;

// Re-export key types at crate root for convenience
pub use client::{BlockingClient, Client, ClientConfig, DEFAULT_BASE_URL};
pub use config::{ConfigError, StoredConfig};
pub use context::{device_fingerprint, Context, Platform};
pub use error::ClientError;
pub use payload::FeaturePayload;
pub use request::{build_request, Operation, RiskRequest};
pub use response::ServiceResponse;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
