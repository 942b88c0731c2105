//! Per-session retry bookkeeping

/// Mutable record threaded through one retry session
///
/// The engine creates one per call and is the only writer. Work that wants to
/// adapt to the attempt it is on (shorter timeouts, a different mirror, ...)
/// receives a shared reference to it.
#[derive(Debug, Clone)]
pub struct RetryState<E> {
    retries_left: u32,
    current_try: u32,
    last_error: Option<E>,
}

impl<E> RetryState<E> {
    /// Create the state for a session with the given retry budget
    pub fn new(retries: u32) -> Self {
        Self {
            retries_left: retries,
            current_try: 0,
            last_error: None,
        }
    }

    /// Attempts still permitted after the current one
    pub fn retries_left(&self) -> u32 {
        self.retries_left
    }

    /// Number of attempts already completed (0 before the first)
    pub fn current_try(&self) -> u32 {
        self.current_try
    }

    /// Error from the most recent failed attempt
    pub fn last_error(&self) -> Option<&E> {
        self.last_error.as_ref()
    }

    /// Whether no attempt has completed yet
    pub fn is_first_iteration(&self) -> bool {
        self.current_try == 0
    }

    /// Whether another attempt is allowed after the current one
    pub fn has_retries_left(&self) -> bool {
        self.retries_left > 0
    }

    pub(crate) fn record_error(&mut self, error: E) {
        self.last_error = Some(error);
    }

    pub(crate) fn advance(&mut self) {
        self.current_try += 1;
        self.retries_left = self.retries_left.saturating_sub(1);
    }

    pub(crate) fn into_last_error(self) -> Option<E> {
        self.last_error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state: RetryState<String> = RetryState::new(3);
        assert_eq!(state.retries_left(), 3);
        assert_eq!(state.current_try(), 0);
        assert!(state.last_error().is_none());
        assert!(state.is_first_iteration());
        assert!(state.has_retries_left());
    }

    #[test]
    fn test_advance() {
        let mut state: RetryState<String> = RetryState::new(2);
        state.record_error("boom".to_string());
        state.advance();

        assert_eq!(state.current_try(), 1);
        assert_eq!(state.retries_left(), 1);
        assert!(!state.is_first_iteration());
        assert_eq!(state.last_error().map(String::as_str), Some("boom"));

        state.advance();
        assert!(!state.has_retries_left());
    }

    #[test]
    fn test_zero_budget() {
        let state: RetryState<String> = RetryState::new(0);
        assert!(!state.has_retries_left());
        assert!(state.is_first_iteration());
    }
}
