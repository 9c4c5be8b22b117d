//! Client and logger initialization.
//!
//! This module provides functions to initialize the shared resources the
//! engine needs at startup:
//! - HTTP client (timeout, User-Agent)
//! - Logger (plain or JSON format)

mod client;
mod logger;

pub use client::init_client;
pub use logger::init_logger_with;
