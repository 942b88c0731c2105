//! Error types for the retry engine
//!
//! [`AttemptError`] is what a unit of work fails with; it tells the engine
//! whether the failure is worth retrying. [`RetryError`] is what the engine
//! hands back to the caller once it stops.

use std::error::Error;
use std::fmt;

/// Failure of a single attempt
///
/// Any `E` converts into `AttemptError::Transient`, so `?` inside the work
/// marks a failure as retryable. Use [`AttemptError::abort`] to stop retrying.
#[derive(Debug)]
pub enum AttemptError<E> {
    /// Retrying is pointless; surface the cause immediately
    Abort(E),

    /// The failure may go away on a later attempt
    Transient(E),
}

impl<E> AttemptError<E> {
    /// Create an abort that stops the session
    pub fn abort(cause: E) -> Self {
        AttemptError::Abort(cause)
    }

    /// Create a retryable failure
    pub fn transient(error: E) -> Self {
        AttemptError::Transient(error)
    }

    /// Check if this failure aborts the session
    pub fn is_abort(&self) -> bool {
        matches!(self, AttemptError::Abort(_))
    }

    /// Get the underlying error, consuming this error
    pub fn into_inner(self) -> E {
        match self {
            AttemptError::Abort(e) | AttemptError::Transient(e) => e,
        }
    }
}

impl<E> From<E> for AttemptError<E> {
    fn from(error: E) -> Self {
        AttemptError::Transient(error)
    }
}

impl<E: fmt::Display> fmt::Display for AttemptError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptError::Abort(cause) => write!(f, "aborted: {}", cause),
            AttemptError::Transient(error) => write!(f, "{}", error),
        }
    }
}

impl<E: Error + 'static> Error for AttemptError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AttemptError::Abort(e) | AttemptError::Transient(e) => Some(e),
        }
    }
}

/// Errors returned by the retry engine
///
/// Generic over `E`, the error type of the work being retried.
#[derive(Debug)]
pub enum RetryError<E> {
    /// The work signalled that retrying is pointless
    ///
    /// Carries the cause exactly as the work produced it.
    Abort(E),

    /// The retry budget ran out
    RetryLimitExceeded {
        /// Number of times the work was invoked
        attempts: u32,
        /// The error from the final attempt
        ///
        /// Always populated by the engine, since at least one attempt runs.
        last_error: Option<E>,
    },
}

impl<E: fmt::Display> fmt::Display for RetryError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetryError::Abort(cause) => write!(f, "aborted: {}", cause),
            RetryError::RetryLimitExceeded {
                attempts,
                last_error,
            } => {
                if let Some(err) = last_error {
                    write!(f, "retry limit exceeded after {} attempts: {}", attempts, err)
                } else {
                    write!(f, "retry limit exceeded after {} attempts", attempts)
                }
            }
        }
    }
}

impl<E: Error + 'static> Error for RetryError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RetryError::Abort(cause) => Some(cause),
            RetryError::RetryLimitExceeded {
                last_error: Some(err),
                ..
            } => Some(err),
            RetryError::RetryLimitExceeded {
                last_error: None, ..
            } => None,
        }
    }
}

impl<E> RetryError<E> {
    /// Create a retry limit exceeded error
    pub fn retry_limit_exceeded(attempts: u32, last_error: Option<E>) -> Self {
        RetryError::RetryLimitExceeded {
            attempts,
            last_error,
        }
    }

    /// Check if the work aborted the session
    pub fn is_abort(&self) -> bool {
        matches!(self, RetryError::Abort(_))
    }

    /// Check if the retry budget was exhausted
    pub fn is_retry_limit_exceeded(&self) -> bool {
        matches!(self, RetryError::RetryLimitExceeded { .. })
    }

    /// Get the number of attempts made, `None` for an abort
    pub fn attempts(&self) -> Option<u32> {
        match self {
            RetryError::Abort(_) => None,
            RetryError::RetryLimitExceeded { attempts, .. } => Some(*attempts),
        }
    }

    /// Get a reference to the underlying error
    pub fn source_ref(&self) -> Option<&E> {
        match self {
            RetryError::Abort(cause) => Some(cause),
            RetryError::RetryLimitExceeded { last_error, .. } => last_error.as_ref(),
        }
    }

    /// Get the underlying error, consuming this error
    pub fn into_source(self) -> Option<E> {
        match self {
            RetryError::Abort(cause) => Some(cause),
            RetryError::RetryLimitExceeded { last_error, .. } => last_error,
        }
    }

    /// Map the error type using a closure
    pub fn map_err<F, E2>(self, f: F) -> RetryError<E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            RetryError::Abort(cause) => RetryError::Abort(f(cause)),
            RetryError::RetryLimitExceeded {
                attempts,
                last_error,
            } => RetryError::RetryLimitExceeded {
                attempts,
                last_error: last_error.map(f),
            },
        }
    }
}
