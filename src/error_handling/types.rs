//! Error type definitions.
//!
//! This module defines the failure classes surfaced by the request engine,
//! plus the initialization errors raised during startup.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Missing or invalid configuration (account id, client id).
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Terminal failure classes for a logical request.
///
/// The executor recovers transient classes (`RateLimit`, `Server`, `Network`)
/// locally up to the policy's attempt limit; every class is terminal once it
/// reaches the caller. The batch scheduler wraps item failures in `Batch`
/// without downgrading the inner class.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Missing or unrefreshable credentials. Not retried beyond the single
    /// in-flight token refresh.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// 429 persisted through every allowed attempt.
    #[error("rate limit exceeded after {attempts} attempts")]
    RateLimit {
        /// Attempts consumed before giving up.
        attempts: u32,
    },

    /// 5xx persisted through every allowed attempt.
    #[error("server error {status} after {attempts} attempts")]
    Server {
        /// Terminal HTTP status.
        status: u16,
        /// Attempts consumed before giving up.
        attempts: u32,
    },

    /// Transport-level fault (connect, timeout, DNS, reset) persisted through
    /// every allowed attempt.
    #[error("network error after {attempts} attempts: {source}")]
    Network {
        /// Attempts consumed before giving up.
        attempts: u32,
        /// The underlying transport error from the final attempt.
        #[source]
        source: ReqwestError,
    },

    /// Any other non-success status. Never retried.
    #[error("remote error {status}: {message}")]
    Remote {
        /// HTTP status returned by the API.
        status: u16,
        /// Response body, truncated to a bounded length.
        message: String,
    },

    /// A success response whose body is not valid JSON. Never retried: a
    /// malformed success body is a contract violation, not a transient fault.
    #[error("response decode error: {0}")]
    Decode(String),

    /// A batch item failure, carrying the item's input position.
    #[error("batch item {index} ({endpoint}) failed: {source}")]
    Batch {
        /// Index of the failed item in the caller's input order.
        index: usize,
        /// Endpoint of the failed item.
        endpoint: String,
        /// The item's own failure, class preserved.
        #[source]
        source: Box<EngineError>,
    },
}

impl EngineError {
    /// The terminal HTTP status associated with this failure, if one exists.
    ///
    /// `Batch` delegates to its inner failure so callers can match on status
    /// without unwrapping positional context.
    pub fn status(&self) -> Option<u16> {
        match self {
            EngineError::RateLimit { .. } => Some(429),
            EngineError::Server { status, .. } | EngineError::Remote { status, .. } => {
                Some(*status)
            }
            EngineError::Network { source, .. } => source.status().map(|s| s.as_u16()),
            EngineError::Batch { source, .. } => source.status(),
            EngineError::Auth(_) | EngineError::Decode(_) => None,
        }
    }
}
