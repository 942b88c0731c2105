//! Configuration loading for reattempt.yaml

mod loader;

pub use loader::{ReattemptConfig, CONFIG_FILE_NAMES};
