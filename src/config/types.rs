//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument
//! parsing and client configuration.

use clap::ValueEnum;

use crate::config::constants::{API_HOST_SUFFIX, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::error_handling::InitializationError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Client configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically, or loaded from the environment with
/// [`Config::from_env`].
///
/// # Examples
///
/// ```no_run
/// use netsuite_client::Config;
///
/// let config = Config {
///     account_id: "123456".to_string(),
///     client_id: "abcdef".to_string(),
///     ..Default::default()
/// };
/// assert!(config.api_base_url().contains("suitetalk.api.netsuite.com"));
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// NetSuite account id; forms the account-scoped API host.
    pub account_id: String,

    /// OAuth2 client id used by the token refresh exchange.
    pub client_id: String,

    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value.
    pub user_agent: String,

    /// Log level.
    pub log_level: LogLevel,

    /// Log format.
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            account_id: String::new(),
            client_id: String::new(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

impl Config {
    /// Loads account and client identifiers from the environment.
    ///
    /// Reads `NETSUITE_ACCOUNT_ID` and `NETSUITE_CLIENT_ID`; the remaining
    /// fields take their defaults. Call `dotenvy::dotenv()` first if the
    /// values live in a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::ConfigError` when either variable is
    /// absent or empty.
    pub fn from_env() -> Result<Self, InitializationError> {
        let account_id = std::env::var("NETSUITE_ACCOUNT_ID")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                InitializationError::ConfigError("NETSUITE_ACCOUNT_ID is not set".to_string())
            })?;
        let client_id = std::env::var("NETSUITE_CLIENT_ID")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                InitializationError::ConfigError("NETSUITE_CLIENT_ID is not set".to_string())
            })?;

        Ok(Self {
            account_id,
            client_id,
            ..Default::default()
        })
    }

    /// The account-scoped SuiteTalk base URL.
    pub fn api_base_url(&self) -> String {
        format!("https://{}{}", self.account_id, API_HOST_SUFFIX)
    }
}
