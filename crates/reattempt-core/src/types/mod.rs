//! Type definitions for reattempt configuration

mod settings;

pub use settings::*;
