//! Retry observation and logging
//!
//! This module provides the `RetryObserver` trait for watching a retry session
//! and the implementations shipped with the crate:
//!
//! - [`ConsoleObserver`] prints human-readable lines to stdout (the default)
//! - [`TracingObserver`] emits structured events through `tracing`
//! - [`StatsObserver`] counts notifications
//! - [`NoOpObserver`] ignores everything

use std::fmt::Display;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::types::TimeUnit;

/// Observer trait for retry session events
///
/// Notifications are delivered synchronously from inside the retry loop.
/// A panicking observer ends the session; the engine does not catch it.
///
/// # Example
///
/// ```rust
/// use reattempt_core::retry::RetryObserver;
/// use std::fmt::Display;
///
/// struct MetricsObserver;
///
/// impl RetryObserver for MetricsObserver {
///     fn on_start_of_retry(&self, label: &str, attempt: u32) {
///         // Record retry metric
///     }
///
///     fn on_start_of_delay(&self, label: &str, delay: u64) {
///         // Record backoff histogram
///     }
///
///     fn on_error(&self, label: &str, error: &dyn Display) {
///         // Record failure metric
///     }
/// }
/// ```
pub trait RetryObserver: Send + Sync {
    /// Called before every attempt except the first
    ///
    /// # Arguments
    ///
    /// * `label` - The label the session was started with
    /// * `attempt` - Number of attempts already completed
    fn on_start_of_retry(&self, label: &str, attempt: u32);

    /// Called before each wait between attempts
    ///
    /// # Arguments
    ///
    /// * `label` - The label the session was started with
    /// * `delay` - Whole time units about to be waited
    fn on_start_of_delay(&self, label: &str, delay: u64);

    /// Called once per failed attempt that was not an abort
    ///
    /// # Arguments
    ///
    /// * `label` - The label the session was started with
    /// * `error` - The error the attempt failed with
    fn on_error(&self, label: &str, error: &dyn Display);
}

/// An observer that prints each event to stdout
///
/// Output format:
///
/// ```text
/// <label> (attempt <n>)
/// Retrying in <delay> seconds ...
/// <error>
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleObserver {
    unit: TimeUnit,
}

impl ConsoleObserver {
    /// Create a console observer that reports delays in seconds
    pub fn new() -> Self {
        Self::default()
    }

    /// Report delays in the given unit
    pub fn with_unit(unit: TimeUnit) -> Self {
        Self { unit }
    }

    /// Line printed when a retry starts
    pub fn retry_line(label: &str, attempt: u32) -> String {
        format!("{} (attempt {})", label, attempt)
    }

    /// Line printed when a delay starts
    pub fn delay_line(&self, delay: u64) -> String {
        format!("Retrying in {} {} ...", delay, self.unit)
    }
}

impl RetryObserver for ConsoleObserver {
    fn on_start_of_retry(&self, label: &str, attempt: u32) {
        println!("{}", Self::retry_line(label, attempt));
    }

    fn on_start_of_delay(&self, _label: &str, delay: u64) {
        println!("{}", self.delay_line(delay));
    }

    fn on_error(&self, _label: &str, error: &dyn Display) {
        println!("{}", error);
    }
}

/// An observer that logs retry events using the `tracing` crate
///
/// # Log Levels
///
/// - `on_start_of_retry`: INFO
/// - `on_start_of_delay`: DEBUG
/// - `on_error`: WARN
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver {
    unit: TimeUnit,
}

impl TracingObserver {
    /// Create a new tracing observer
    pub fn new() -> Self {
        Self::default()
    }

    /// Record delays in the given unit
    pub fn with_unit(unit: TimeUnit) -> Self {
        Self { unit }
    }
}

impl RetryObserver for TracingObserver {
    fn on_start_of_retry(&self, label: &str, attempt: u32) {
        tracing::info!(label = %label, attempt = attempt, "retrying");
    }

    fn on_start_of_delay(&self, label: &str, delay: u64) {
        tracing::debug!(
            label = %label,
            delay = delay,
            unit = %self.unit,
            "waiting before next attempt"
        );
    }

    fn on_error(&self, label: &str, error: &dyn Display) {
        tracing::warn!(label = %label, error = %error, "attempt failed");
    }
}

/// A no-op observer that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl RetryObserver for NoOpObserver {
    fn on_start_of_retry(&self, _label: &str, _attempt: u32) {}

    fn on_start_of_delay(&self, _label: &str, _delay: u64) {}

    fn on_error(&self, _label: &str, _error: &dyn Display) {}
}

/// An observer that counts notifications
///
/// Useful for testing and metrics collection.
#[derive(Debug, Default)]
pub struct StatsObserver {
    retries: AtomicU32,
    delays: AtomicU32,
    errors: AtomicU32,
}

impl StatsObserver {
    /// Create a new stats observer
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of retry starts
    pub fn retries(&self) -> u32 {
        self.retries.load(Ordering::SeqCst)
    }

    /// Get the number of delay starts
    pub fn delays(&self) -> u32 {
        self.delays.load(Ordering::SeqCst)
    }

    /// Get the number of errors
    pub fn errors(&self) -> u32 {
        self.errors.load(Ordering::SeqCst)
    }
}

impl RetryObserver for StatsObserver {
    fn on_start_of_retry(&self, _label: &str, _attempt: u32) {
        self.retries.fetch_add(1, Ordering::SeqCst);
    }

    fn on_start_of_delay(&self, _label: &str, _delay: u64) {
        self.delays.fetch_add(1, Ordering::SeqCst);
    }

    fn on_error(&self, _label: &str, _error: &dyn Display) {
        self.errors.fetch_add(1, Ordering::SeqCst);
    }
}

impl<T: RetryObserver + ?Sized> RetryObserver for Arc<T> {
    fn on_start_of_retry(&self, label: &str, attempt: u32) {
        (**self).on_start_of_retry(label, attempt)
    }

    fn on_start_of_delay(&self, label: &str, delay: u64) {
        (**self).on_start_of_delay(label, delay)
    }

    fn on_error(&self, label: &str, error: &dyn Display) {
        (**self).on_error(label, error)
    }
}

impl<T: RetryObserver + ?Sized> RetryObserver for Box<T> {
    fn on_start_of_retry(&self, label: &str, attempt: u32) {
        (**self).on_start_of_retry(label, attempt)
    }

    fn on_start_of_delay(&self, label: &str, delay: u64) {
        (**self).on_start_of_delay(label, delay)
    }

    fn on_error(&self, label: &str, error: &dyn Display) {
        (**self).on_error(label, error)
    }
}

impl<T: RetryObserver + ?Sized> RetryObserver for &T {
    fn on_start_of_retry(&self, label: &str, attempt: u32) {
        (**self).on_start_of_retry(label, attempt)
    }

    fn on_start_of_delay(&self, label: &str, delay: u64) {
        (**self).on_start_of_delay(label, delay)
    }

    fn on_error(&self, label: &str, error: &dyn Display) {
        (**self).on_error(label, error)
    }
}
