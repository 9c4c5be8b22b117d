//! netsuite_client library: resilient SuiteTalk REST/SuiteQL request engine
//!
//! This library turns a single logical operation (or an ordered batch) into a
//! sequence of HTTP exchanges that survive rate-limit rejection, transient
//! network failure, server errors, and mid-flight access-token expiry, while
//! preserving per-record ordering for related writes.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use netsuite_client::{
//!     Config, MemorySession, NetSuiteClient, RequestSpec, RetryStrategy, TokenPair,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     account_id: "1234567".into(),
//!     client_id: "my-client-id".into(),
//!     ..Default::default()
//! };
//! let session = Arc::new(MemorySession::new(TokenPair {
//!     access_token: "access".into(),
//!     refresh_token: "refresh".into(),
//! }));
//!
//! let client = NetSuiteClient::new(&config, session)?;
//! let spec = RequestSpec::get("/services/rest/record/v1/salesOrder/42");
//! let record = client.single_request(&spec, RetryStrategy::Aggressive).await?;
//! println!("{record}");
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

mod auth;
mod client;
pub mod config;
mod error_handling;
pub mod initialization;
mod rate_limit;
mod request;
mod retry;
mod session;

// Re-export public API
pub use client::{BatchOptions, ExecutionMode, NetSuiteClient};
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{EngineError, InitializationError};
pub use rate_limit::{HealthTier, RateLimitInfo, RateLimitStatus};
pub use request::{HttpMethod, RequestSpec};
pub use retry::{RetryPolicy, RetryStrategy};
pub use session::{MemorySession, SessionStore, TokenPair};
