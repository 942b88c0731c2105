//! Backoff command

use anyhow::Result;
use reattempt_core::retry::backed_off_delay;
use reattempt_core::types::TimeUnit;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::BackoffArgs;

/// Most rows printed by `reattempt backoff`
pub const MAX_ROWS: u32 = 64;

/// One wait in a retry session
#[derive(Debug, Tabled, PartialEq, Eq)]
pub struct BackoffRow {
    #[tabled(rename = "Retry")]
    pub retry: u32,
    #[tabled(rename = "Delay")]
    pub delay: u64,
    #[tabled(rename = "Total waited")]
    pub total: u64,
}

pub fn run(args: BackoffArgs) -> Result<()> {
    let unit: TimeUnit = args.unit.into();
    let rows = schedule(args.delay, args.retries);

    if rows.is_empty() {
        println!("No retries, the command runs once.");
        return Ok(());
    }

    let shown = rows.last().map_or(0, |row| row.retry);
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{}", table);

    if shown < args.retries {
        println!("{} more retries not shown.", args.retries - shown);
    }
    println!("Delays are in {}.", unit);

    Ok(())
}

/// Delays waited before each retry, as the engine computes them
///
/// Stops after [`MAX_ROWS`] rows or at the first row whose total saturates.
pub fn schedule(base_delay: f64, retries: u32) -> Vec<BackoffRow> {
    let mut rows = Vec::new();
    let mut total: u64 = 0;

    for retry in 1..=retries.min(MAX_ROWS) {
        let delay = backed_off_delay(base_delay, i64::from(retry));
        total = total.saturating_add(delay);
        rows.push(BackoffRow {
            retry,
            delay,
            total,
        });
        if total == u64::MAX {
            break;
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_doubles() {
        let rows = schedule(1.0, 4);
        let delays: Vec<u64> = rows.iter().map(|r| r.delay).collect();
        let totals: Vec<u64> = rows.iter().map(|r| r.total).collect();

        assert_eq!(delays, vec![1, 2, 4, 8]);
        assert_eq!(totals, vec![1, 3, 7, 15]);
    }

    #[test]
    fn test_schedule_default_settings() {
        let rows = schedule(5.0, 5);
        assert_eq!(rows.last().map(|r| r.delay), Some(80));
        assert_eq!(rows.last().map(|r| r.total), Some(155));
    }

    #[test]
    fn test_schedule_zero_retries() {
        assert!(schedule(5.0, 0).is_empty());
    }

    #[test]
    fn test_stops_once_total_saturates() {
        let rows = schedule(f64::MAX, 3);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total, u64::MAX);

        let rows = schedule(1.0, u32::MAX);
        assert_eq!(rows.last().map(|r| r.total), Some(u64::MAX));
        assert!(rows.len() <= MAX_ROWS as usize);
    }

    #[test]
    fn test_row_count_is_capped() {
        let rows = schedule(0.0, u32::MAX);
        assert_eq!(rows.len(), MAX_ROWS as usize);
        assert!(rows.iter().all(|r| r.total == 0));
    }
}
