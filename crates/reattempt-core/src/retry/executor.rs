//! Retry execution engine
//!
//! One loop drives every session: run the work, return on success or abort,
//! otherwise report the error, back off and try again until the budget runs
//! out. The four entry points only differ in whether the work sees the
//! [`RetryState`] and whether the work and the wait block or suspend.

use std::fmt::Display;
use std::future::Future;

use crate::types::AttemptSettings;

use super::backoff::backed_off_delay;
use super::error::{AttemptError, RetryError};
use super::observer::{ConsoleObserver, RetryObserver};
use super::sleep::{AsyncSleep, Sleep, SystemSleep};
use super::state::RetryState;

/// Base delay used when none is configured
pub const DEFAULT_BASE_DELAY: f64 = 5.0;

/// Retry budget used when none is configured
pub const DEFAULT_RETRIES: u32 = 5;

/// Run blocking work with the default settings
///
/// Five retries, a five second base delay and console output. For more
/// control, build a [`Retry`].
///
/// # Example
///
/// ```rust,no_run
/// use reattempt_core::retry::{attempt, AttemptError};
///
/// let body = attempt("read config", || {
///     let text = std::fs::read_to_string("app.toml")?;
///     Ok::<_, AttemptError<std::io::Error>>(text)
/// });
/// ```
pub fn attempt<T, E, F>(label: &str, work: F) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Result<T, AttemptError<E>>,
    E: Display,
{
    Retry::new(label).attempt(work)
}

/// Run async work with the default settings
///
/// Async counterpart of [`attempt`]; waits with the tokio timer.
pub async fn attempt_async<T, E, F, Fut>(label: &str, work: F) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AttemptError<E>>>,
    E: Display,
{
    Retry::new(label).attempt_async(work).await
}

/// A retry executor with configurable delay, budget, observer and sleeper
///
/// The executor holds no per-session state, so one instance can drive any
/// number of sessions, including concurrent ones.
///
/// # Example
///
/// ```rust
/// use reattempt_core::retry::{AttemptError, NoOpObserver, Retry};
///
/// let mut calls = 0;
/// let result: Result<u32, _> = Retry::new("flaky")
///     .with_delay(0.0)
///     .with_retries(3)
///     .with_observer(NoOpObserver)
///     .attempt(|| {
///         calls += 1;
///         if calls < 3 {
///             Err(AttemptError::transient("not yet"))
///         } else {
///             Ok(calls)
///         }
///     });
///
/// assert_eq!(result.unwrap(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Retry<O = ConsoleObserver, S = SystemSleep> {
    label: String,
    base_delay: f64,
    retries: u32,
    observer: O,
    sleeper: S,
}

impl Retry {
    /// Create an executor with the default settings
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            base_delay: DEFAULT_BASE_DELAY,
            retries: DEFAULT_RETRIES,
            observer: ConsoleObserver::new(),
            sleeper: SystemSleep::default(),
        }
    }

    /// Create an executor from configured settings
    ///
    /// The time unit applies to both the console output and the sleeper.
    pub fn from_settings(label: impl Into<String>, settings: &AttemptSettings) -> Self {
        Self {
            label: label.into(),
            base_delay: settings.base_delay,
            retries: settings.retries,
            observer: ConsoleObserver::with_unit(settings.time_unit),
            sleeper: SystemSleep::new(settings.time_unit),
        }
    }
}

impl<O, S> Retry<O, S> {
    /// Set the base delay fed into the backoff calculation
    pub fn with_delay(mut self, base_delay: f64) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Set the number of retries after the first attempt
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Set the observer
    pub fn with_observer<O2>(self, observer: O2) -> Retry<O2, S> {
        Retry {
            label: self.label,
            base_delay: self.base_delay,
            retries: self.retries,
            observer,
            sleeper: self.sleeper,
        }
    }

    /// Set the wait primitive
    pub fn with_sleeper<S2>(self, sleeper: S2) -> Retry<O, S2> {
        Retry {
            label: self.label,
            base_delay: self.base_delay,
            retries: self.retries,
            observer: self.observer,
            sleeper,
        }
    }

    /// Get the label passed to the observer
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the base delay
    pub fn base_delay(&self) -> f64 {
        self.base_delay
    }

    /// Get the retry budget
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Get the observer
    pub fn observer(&self) -> &O {
        &self.observer
    }
}

impl<O: RetryObserver, S> Retry<O, S> {
    fn begin_attempt<E>(&self, state: &RetryState<E>) {
        if !state.is_first_iteration() {
            self.observer
                .on_start_of_retry(&self.label, state.current_try());
        }
    }

    /// Record a transient failure and return the delay before the next
    /// attempt, or `None` once the budget is spent
    fn handle_failure<E: Display>(&self, state: &mut RetryState<E>, error: E) -> Option<u64> {
        self.observer.on_error(&self.label, &error);
        state.record_error(error);

        if !state.has_retries_left() {
            return None;
        }

        let delay = backed_off_delay(self.base_delay, i64::from(state.current_try()) + 1);
        self.observer.on_start_of_delay(&self.label, delay);
        Some(delay)
    }

    fn exhausted<E>(state: RetryState<E>) -> RetryError<E> {
        let attempts = state.current_try().saturating_add(1);
        RetryError::retry_limit_exceeded(attempts, state.into_last_error())
    }
}

impl<O: RetryObserver, S: Sleep> Retry<O, S> {
    /// Execute blocking work with retry logic
    ///
    /// # Returns
    ///
    /// The value of the first successful attempt, `RetryError::Abort` if the
    /// work aborted, or `RetryError::RetryLimitExceeded` once `retries + 1`
    /// attempts have failed.
    pub fn attempt<T, E, F>(&self, mut work: F) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Result<T, AttemptError<E>>,
        E: Display,
    {
        self.attempt_with_state(|_| work())
    }

    /// Execute blocking work that inspects the session state
    pub fn attempt_with_state<T, E, F>(&self, mut work: F) -> Result<T, RetryError<E>>
    where
        F: FnMut(&RetryState<E>) -> Result<T, AttemptError<E>>,
        E: Display,
    {
        let mut state = RetryState::new(self.retries);

        loop {
            self.begin_attempt(&state);

            match work(&state) {
                Ok(value) => return Ok(value),
                Err(AttemptError::Abort(cause)) => return Err(RetryError::Abort(cause)),
                Err(AttemptError::Transient(error)) => {
                    match self.handle_failure(&mut state, error) {
                        Some(delay) => {
                            Sleep::sleep(&self.sleeper, delay);
                            state.advance();
                        }
                        None => break,
                    }
                }
            }
        }

        Err(Self::exhausted(state))
    }
}

impl<O: RetryObserver, S: AsyncSleep> Retry<O, S> {
    /// Execute async work with retry logic
    ///
    /// Same semantics as [`Retry::attempt`], but the work and the wait
    /// suspend the task instead of blocking the thread. Dropping the returned
    /// future cancels the session at its current await point.
    pub async fn attempt_async<T, E, F, Fut>(&self, mut work: F) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, AttemptError<E>>>,
        E: Display,
    {
        self.attempt_async_with_state(|_| work()).await
    }

    /// Execute async work that inspects the session state
    ///
    /// The work receives the state by reference when it is called and should
    /// copy out what the returned future needs.
    pub async fn attempt_async_with_state<T, E, F, Fut>(
        &self,
        mut work: F,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut(&RetryState<E>) -> Fut,
        Fut: Future<Output = Result<T, AttemptError<E>>>,
        E: Display,
    {
        let mut state = RetryState::new(self.retries);

        loop {
            self.begin_attempt(&state);

            match work(&state).await {
                Ok(value) => return Ok(value),
                Err(AttemptError::Abort(cause)) => return Err(RetryError::Abort(cause)),
                Err(AttemptError::Transient(error)) => {
                    match self.handle_failure(&mut state, error) {
                        Some(delay) => {
                            AsyncSleep::sleep(&self.sleeper, delay).await;
                            state.advance();
                        }
                        None => break,
                    }
                }
            }
        }

        Err(Self::exhausted(state))
    }
}
