//! Error taxonomy for the request engine.
//!
//! A closed tagged union (`EngineError`) covers every terminal failure class;
//! `InitializationError` covers startup failures. See the type docs for the
//! retry/propagation policy per class.

mod types;

pub use types::{EngineError, InitializationError};
