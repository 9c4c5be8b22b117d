//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (API paths, timing parameters, limits)
//! - Client configuration and environment loading
//! - CLI option types

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel};
