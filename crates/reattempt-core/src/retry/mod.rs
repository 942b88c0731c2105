//! Retry execution engine with exponential backoff
//!
//! Work is re-run until it succeeds, aborts or runs out of retries. Between
//! attempts the engine waits `base_delay × 2^(attempt - 1)` whole time units
//! and reports what it is doing to a [`RetryObserver`].
//!
//! # Features
//!
//! - Blocking and async entry points, with or without access to the [`RetryState`]
//! - `AttemptError::abort` to stop retrying immediately
//! - Console, tracing, counting and no-op observers
//! - Injectable wait primitive for tests or custom clocks
//!
//! # Example
//!
//! ```rust,no_run
//! use reattempt_core::retry::{AttemptError, Retry, RetryError, TracingObserver};
//!
//! async fn example() -> Result<String, RetryError<std::io::Error>> {
//!     Retry::new("fetch index")
//!         .with_delay(1.0)
//!         .with_retries(3)
//!         .with_observer(TracingObserver::new())
//!         .attempt_async_with_state(|state| {
//!             let quick = state.is_first_iteration();
//!             async move {
//!                 if quick {
//!                     return Err(AttemptError::transient(std::io::Error::other("cold cache")));
//!                 }
//!                 Ok("index".to_string())
//!             }
//!         })
//!         .await
//! }
//! ```

mod backoff;
mod error;
mod executor;
mod observer;
mod sleep;
mod state;

pub use backoff::backed_off_delay;
pub use error::{AttemptError, RetryError};
pub use executor::{attempt, attempt_async, Retry, DEFAULT_BASE_DELAY, DEFAULT_RETRIES};
pub use observer::{ConsoleObserver, NoOpObserver, RetryObserver, StatsObserver, TracingObserver};
pub use sleep::{AsyncSleep, Sleep, SystemSleep};
pub use state::RetryState;
