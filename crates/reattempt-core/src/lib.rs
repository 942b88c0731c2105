//! # reattempt-core
//!
//! Core library for reattempt providing:
//! - Retry engine with exponential backoff and abort short-circuit
//! - Observer trait with console, tracing and counting implementations
//! - Blocking and async wait primitives
//! - Settings types and `reattempt.yaml` loading

pub mod config;
pub mod error;
pub mod retry;
pub mod types;

pub use config::ReattemptConfig;
pub use error::{Error, Result};
pub use retry::{attempt, attempt_async, AttemptError, Retry, RetryError, RetryState};

/// Version of the core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
