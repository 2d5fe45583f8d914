//! WebNN Test Common Library
//!
//! Shared types, configuration, and utilities for the WebNN sample
//! harness: the combination space read from `config.json`, the nested
//! result record the runner builds, and the time-metric normalization
//! helpers.

pub mod config;
pub mod error;
pub mod results;
pub mod timefmt;
pub mod types;

// Re-export commonly used types
pub use config::{BrowserSettings, CombinationMatrix, Config};
pub use error::{Error, Result};
pub use results::{CombinationOutcome, ResultEntry, ResultRecord};
pub use types::{Backend, Combination, PageMetrics};

/// Harness version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
