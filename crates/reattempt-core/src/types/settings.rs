//! Retry settings types
//!
//! These types describe the knobs a retry session is started with: the base
//! delay fed into the backoff calculation, the retry budget and the unit the
//! computed delays are expressed in.

use crate::retry::{DEFAULT_BASE_DELAY, DEFAULT_RETRIES};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// Complete settings file contents
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct SettingsFile {
    /// Settings used for any label without an override
    #[serde(default)]
    pub defaults: AttemptSettings,

    /// Per-label overrides
    #[serde(default)]
    pub labels: HashMap<String, AttemptSettings>,
}

impl SettingsFile {
    /// Resolve the settings for a label, falling back to the defaults
    pub fn settings_for(&self, label: &str) -> &AttemptSettings {
        self.labels.get(label).unwrap_or(&self.defaults)
    }
}

/// Settings for a single retry session
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct AttemptSettings {
    /// Base delay, scaled by `2^(attempt - 1)` before each retry
    #[serde(default = "default_base_delay")]
    pub base_delay: f64,

    /// Number of retries after the first attempt
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Unit of the computed delays
    #[serde(default)]
    pub time_unit: TimeUnit,
}

impl Default for AttemptSettings {
    fn default() -> Self {
        Self {
            base_delay: default_base_delay(),
            retries: default_retries(),
            time_unit: TimeUnit::default(),
        }
    }
}

fn default_base_delay() -> f64 {
    DEFAULT_BASE_DELAY
}
fn default_retries() -> u32 {
    DEFAULT_RETRIES
}

/// Unit that whole-number delays are measured in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TimeUnit {
    /// Seconds (default)
    #[default]
    Seconds,

    /// Milliseconds
    Milliseconds,
}

impl TimeUnit {
    /// Convert a whole number of units into a `Duration`
    pub fn duration(self, units: u64) -> Duration {
        match self {
            TimeUnit::Seconds => Duration::from_secs(units),
            TimeUnit::Milliseconds => Duration::from_millis(units),
        }
    }

    /// Plural name used in human-readable output
    pub fn label(self) -> &'static str {
        match self {
            TimeUnit::Seconds => "seconds",
            TimeUnit::Milliseconds => "milliseconds",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
