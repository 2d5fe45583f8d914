//! Browser automation seam
//!
//! The sample runner talks to the browser through these traits so the
//! orchestration logic can be exercised against a mock in tests. The
//! production implementation lives in [`crate::browser`].

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;

use webnn_test_common::Result;

/// Options for one browser session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub headless: bool,
    /// Browser executable; None lets the implementation auto-detect.
    pub executable: Option<PathBuf>,
    pub user_data_dir: Option<PathBuf>,
    /// Command-line flags for the launch.
    pub args: Vec<String>,
    /// Uniform timeout applied to every page operation.
    pub timeout: Duration,
    /// Failure screenshots are written here.
    pub screenshot_dir: PathBuf,
}

/// One open page in a launched browser.
///
/// Every operation is bounded by the session's operation timeout.
#[async_trait]
pub trait PageSession: Send {
    /// Navigate and wait for the load to settle.
    async fn goto(&mut self, url: &str) -> Result<()>;

    /// Wait until an element matching the selector is present.
    async fn wait_for(&mut self, selector: &str) -> Result<()>;

    /// Wait until an element matching the selector is visible.
    async fn wait_visible(&mut self, selector: &str) -> Result<()>;

    /// Click the element unless it is disabled. Returns whether a
    /// click happened; a disabled control is skipped silently.
    async fn click_if_enabled(&mut self, selector: &str) -> Result<bool>;

    /// Text content of the first element matching the selector.
    async fn text_content(&mut self, selector: &str) -> Result<String>;

    /// Save a full-page screenshot as `<name>.png` under the session's
    /// screenshot directory.
    async fn save_screenshot(&mut self, name: &str) -> Result<PathBuf>;

    /// Text of the on-page alert, when one is present.
    async fn alert_text(&mut self, selector: &str) -> Result<Option<String>>;

    /// Shut the session down. Idempotent.
    async fn close(&mut self) -> Result<()>;
}

/// Launches browser sessions.
#[async_trait]
pub trait Driver: Send + Sync {
    async fn launch(&self, options: &SessionOptions) -> Result<Box<dyn PageSession>>;
}
