//! Command implementations

pub mod backoff;
pub mod config;
pub mod run;
pub mod version;
