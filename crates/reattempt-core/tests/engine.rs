//! Public API tests for the retry engine

use std::fmt::Display;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reattempt_core::retry::{
    backed_off_delay, AsyncSleep, AttemptError, Retry, RetryError, RetryObserver, Sleep,
    StatsObserver,
};
use reattempt_core::types::{AttemptSettings, TimeUnit};
use reattempt_core::ReattemptConfig;

#[derive(Default)]
struct Waits(Mutex<Vec<u64>>);

impl Waits {
    fn taken(&self) -> Vec<u64> {
        self.0.lock().unwrap().clone()
    }
}

impl Sleep for Waits {
    fn sleep(&self, units: u64) {
        self.0.lock().unwrap().push(units);
    }
}

#[async_trait]
impl AsyncSleep for Waits {
    async fn sleep(&self, units: u64) {
        self.0.lock().unwrap().push(units);
    }
}

#[derive(Default)]
struct Transcript(Mutex<Vec<String>>);

impl RetryObserver for Transcript {
    fn on_start_of_retry(&self, label: &str, attempt: u32) {
        self.0.lock().unwrap().push(format!("{} (attempt {})", label, attempt));
    }

    fn on_start_of_delay(&self, _label: &str, delay: u64) {
        self.0.lock().unwrap().push(format!("wait {}", delay));
    }

    fn on_error(&self, _label: &str, error: &dyn Display) {
        self.0.lock().unwrap().push(error.to_string());
    }
}

#[test]
fn backoff_table() {
    let table: Vec<u64> = (0..=4).map(|n| backed_off_delay(1.0, n)).collect();
    assert_eq!(table, vec![1, 1, 2, 4, 8]);
    assert_eq!(backed_off_delay(5.0, 3), 20);
}

#[test]
fn flaky_work_reports_a_full_transcript() {
    let transcript = Arc::new(Transcript::default());
    let waits = Arc::new(Waits::default());
    let mut calls = 0;

    let result: Result<&str, RetryError<String>> = Retry::new("sync")
        .with_delay(2.0)
        .with_retries(4)
        .with_observer(transcript.clone())
        .with_sleeper(waits.clone())
        .attempt(|| {
            calls += 1;
            if calls < 3 {
                Err(AttemptError::transient(format!("refused #{}", calls)))
            } else {
                Ok("done")
            }
        });

    assert_eq!(result.unwrap(), "done");
    assert_eq!(waits.taken(), vec![2, 4]);
    assert_eq!(
        *transcript.0.lock().unwrap(),
        vec![
            "refused #1",
            "wait 2",
            "sync (attempt 1)",
            "refused #2",
            "wait 4",
            "sync (attempt 2)",
        ]
    );
}

#[test]
fn budget_exhaustion_keeps_last_error() {
    let waits = Arc::new(Waits::default());
    let stats = Arc::new(StatsObserver::new());

    let err = Retry::new("exhaust")
        .with_delay(1.0)
        .with_retries(2)
        .with_observer(stats.clone())
        .with_sleeper(waits.clone())
        .attempt_with_state(|state| -> Result<(), AttemptError<u32>> {
            Err(AttemptError::transient(state.current_try()))
        })
        .unwrap_err();

    assert_eq!(err.attempts(), Some(3));
    assert_eq!(err.source_ref(), Some(&2));
    assert_eq!(waits.taken(), vec![1, 2]);
    assert_eq!(stats.errors(), 3);
    assert_eq!(stats.delays(), 2);
    assert_eq!(stats.retries(), 2);
}

#[test]
fn abort_skips_the_budget() {
    let waits = Arc::new(Waits::default());
    let mut calls = 0;

    let err = Retry::new("abort")
        .with_retries(10)
        .with_observer(Transcript::default())
        .with_sleeper(waits.clone())
        .attempt(|| -> Result<(), AttemptError<&str>> {
            calls += 1;
            Err(AttemptError::abort("unauthorized"))
        })
        .unwrap_err();

    assert!(err.is_abort());
    assert_eq!(err.to_string(), "aborted: unauthorized");
    assert_eq!(calls, 1);
    assert!(waits.taken().is_empty());
}

#[tokio::test]
async fn async_session_from_config() {
    let config = ReattemptConfig::from_yaml(
        "labels:\n  fetch:\n    base-delay: 3.0\n    retries: 1\n    time-unit: milliseconds\n",
    )
    .unwrap();
    let settings: AttemptSettings = *config.settings_for("fetch");
    assert_eq!(settings.time_unit, TimeUnit::Milliseconds);

    let waits = Arc::new(Waits::default());
    let stats = Arc::new(StatsObserver::new());
    let retry = Retry::from_settings("fetch", &settings)
        .with_observer(stats.clone())
        .with_sleeper(waits.clone());

    let err = retry
        .attempt_async(|| async { Err::<(), _>(AttemptError::transient("offline")) })
        .await
        .unwrap_err();

    assert_eq!(err.attempts(), Some(2));
    assert_eq!(waits.taken(), vec![3]);
    assert_eq!(stats.errors(), 2);
}
