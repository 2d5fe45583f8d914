//! WebNN Sample Harness
//!
//! Browser-driven runner that exercises a WebNN sample page across
//! backend/dataType/model combinations and scrapes the reported timing
//! metrics into a nested result record.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  SampleRunner (runner)                   │
//! │    run(RunMode) -> ResultRecord                          │
//! │      ├── enumerate combinations from configuration       │
//! │      └── per combination: launch → navigate → select     │
//! │          controls → await results → scrape → record      │
//! ├──────────────────────────────────────────────────────────┤
//! │  Driver / PageSession (driver)     selectors (elements)  │
//! │    └── ChromeDriver (browser): chromiumoxide sessions    │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Combinations run strictly one after another; no two browser
//! sessions are ever open concurrently. A failed combination records
//! its error and the run continues.

pub mod browser;
pub mod driver;
pub mod elements;
pub mod runner;

pub use browser::ChromeDriver;
pub use driver::{Driver, PageSession, SessionOptions};
pub use runner::{RunMode, SampleRunner, SAMPLE, SOURCE};
