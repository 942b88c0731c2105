//! Wait primitives used between attempts
//!
//! The engine only ever asks to "wait N whole units". [`Sleep`] blocks the
//! calling thread, [`AsyncSleep`] suspends the calling task. [`SystemSleep`]
//! implements both on top of `std::thread::sleep` and `tokio::time::sleep`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::types::TimeUnit;

/// Blocking wait primitive
pub trait Sleep: Send + Sync {
    /// Block the current thread for `units` whole time units
    fn sleep(&self, units: u64);
}

/// Suspending wait primitive for async sessions
#[async_trait]
pub trait AsyncSleep: Send + Sync {
    /// Suspend the current task for `units` whole time units
    async fn sleep(&self, units: u64);
}

/// Real-clock sleeper backed by the OS and the tokio timer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemSleep {
    unit: TimeUnit,
}

impl SystemSleep {
    /// Create a sleeper that waits in the given unit
    pub fn new(unit: TimeUnit) -> Self {
        Self { unit }
    }

    /// Get the unit this sleeper waits in
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }
}

impl Sleep for SystemSleep {
    fn sleep(&self, units: u64) {
        if units > 0 {
            std::thread::sleep(self.unit.duration(units));
        }
    }
}

#[async_trait]
impl AsyncSleep for SystemSleep {
    async fn sleep(&self, units: u64) {
        if units > 0 {
            tokio::time::sleep(self.unit.duration(units)).await;
        }
    }
}

impl<T: Sleep + ?Sized> Sleep for Arc<T> {
    fn sleep(&self, units: u64) {
        (**self).sleep(units)
    }
}

#[async_trait]
impl<T: AsyncSleep + ?Sized> AsyncSleep for Arc<T> {
    async fn sleep(&self, units: u64) {
        (**self).sleep(units).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_zero_units_returns_immediately() {
        let sleeper = SystemSleep::default();
        let start = Instant::now();
        Sleep::sleep(&sleeper, 0);
        assert!(start.elapsed() < Duration::from_millis(500));
    }

    #[test]
    fn test_blocking_sleep_waits() {
        let sleeper = SystemSleep::new(TimeUnit::Milliseconds);
        let start = Instant::now();
        Sleep::sleep(&sleeper, 20);
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_async_sleep_waits() {
        let sleeper = SystemSleep::new(TimeUnit::Milliseconds);
        let start = Instant::now();
        AsyncSleep::sleep(&sleeper, 20).await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_default_unit_is_seconds() {
        assert_eq!(SystemSleep::default().unit(), TimeUnit::Seconds);
    }
}
