//! chromiumoxide-backed browser sessions

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::{Page, ScreenshotParams};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, warn};

use webnn_test_common::{Backend, Error, Result};

use crate::driver::{Driver, PageSession, SessionOptions};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Chromium flags for a WebNN sample run on the given backend.
pub fn browser_args(backend: Backend, extra: &[String]) -> Vec<String> {
    let mut args = vec![
        "--enable-features=WebMachineLearningNeuralNetwork".to_string(),
        "--enable-experimental-web-platform-features".to_string(),
        "--ignore-certificate-errors".to_string(),
        "--no-first-run".to_string(),
    ];
    match backend {
        Backend::Cpu => {}
        // device-backed runs must not be blocked by the GPU allowlist
        Backend::Gpu | Backend::Npu => args.push("--ignore-gpu-blocklist".to_string()),
    }
    args.extend(extra.iter().cloned());
    args
}

/// Launches real Chrome sessions over the DevTools protocol.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeDriver;

#[async_trait]
impl Driver for ChromeDriver {
    async fn launch(&self, options: &SessionOptions) -> Result<Box<dyn PageSession>> {
        let mut builder = BrowserConfig::builder()
            .args(options.args.clone())
            .request_timeout(options.timeout);
        if !options.headless {
            builder = builder.with_head();
        }
        if let Some(executable) = &options.executable {
            builder = builder.chrome_executable(executable);
        }
        if let Some(dir) = &options.user_data_dir {
            builder = builder.user_data_dir(dir);
        }
        let config = builder.build().map_err(Error::Launch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| Error::Launch(e.to_string()))?;
        let events = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                let mut browser = browser;
                let _ = browser.close().await;
                let _ = browser.wait().await;
                events.abort();
                return Err(Error::Launch(e.to_string()));
            }
        };

        Ok(Box::new(ChromeSession {
            browser,
            page,
            events,
            timeout: options.timeout,
            screenshot_dir: options.screenshot_dir.clone(),
            closed: false,
        }))
    }
}

/// One launched browser with a single page.
pub struct ChromeSession {
    browser: Browser,
    page: Page,
    events: JoinHandle<()>,
    timeout: Duration,
    screenshot_dir: PathBuf,
    closed: bool,
}

impl ChromeSession {
    async fn element_visible(&self, selector: &str) -> Result<bool> {
        let sel = serde_json::to_string(selector).unwrap_or_default();
        let expr = format!(
            "(() => {{ const el = document.querySelector({sel}); \
             if (!el) return false; \
             const style = window.getComputedStyle(el); \
             return style.display !== 'none' && style.visibility !== 'hidden' \
                 && el.offsetParent !== null; }})()"
        );
        self.page
            .evaluate(expr)
            .await
            .map_err(|e| Error::Evaluate(e.to_string()))?
            .into_value::<bool>()
            .map_err(|e| Error::Evaluate(e.to_string()))
    }

    fn wait_timeout(&self, selector: &str) -> Error {
        Error::WaitTimeout {
            selector: selector.to_string(),
            ms: self.timeout.as_millis() as u64,
        }
    }
}

#[async_trait]
impl PageSession for ChromeSession {
    async fn goto(&mut self, url: &str) -> Result<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| Error::Navigation(e.to_string()))?;
        self.page
            .wait_for_navigation()
            .await
            .map_err(|e| Error::Navigation(e.to_string()))?;
        Ok(())
    }

    async fn wait_for(&mut self, selector: &str) -> Result<()> {
        tokio::time::timeout(self.timeout, async {
            loop {
                if self.page.find_element(selector).await.is_ok() {
                    return;
                }
                sleep(POLL_INTERVAL).await;
            }
        })
        .await
        .map_err(|_| self.wait_timeout(selector))
    }

    async fn wait_visible(&mut self, selector: &str) -> Result<()> {
        tokio::time::timeout(self.timeout, async {
            loop {
                match self.element_visible(selector).await {
                    Ok(true) => return,
                    Ok(false) => {}
                    // probes can race a navigating page; keep polling
                    Err(err) => debug!("visibility probe failed for {selector}: {err}"),
                }
                sleep(POLL_INTERVAL).await;
            }
        })
        .await
        .map_err(|_| self.wait_timeout(selector))
    }

    async fn click_if_enabled(&mut self, selector: &str) -> Result<bool> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|e| Error::Cdp(format!("{selector}: {e}")))?;
        let disabled = element
            .attribute("disabled")
            .await
            .map_err(|e| Error::Cdp(e.to_string()))?;
        if disabled.is_some() {
            debug!("control disabled, skipping click: {selector}");
            return Ok(false);
        }
        element
            .click()
            .await
            .map_err(|e| Error::Cdp(format!("click {selector}: {e}")))?;
        Ok(true)
    }

    async fn text_content(&mut self, selector: &str) -> Result<String> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|e| Error::Cdp(format!("{selector}: {e}")))?;
        let text = element
            .inner_text()
            .await
            .map_err(|e| Error::Cdp(e.to_string()))?;
        Ok(text.unwrap_or_default())
    }

    async fn save_screenshot(&mut self, name: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.screenshot_dir)?;
        let path = self.screenshot_dir.join(format!("{name}.png"));
        self.page
            .save_screenshot(
                ScreenshotParams::builder()
                    .format(CaptureScreenshotFormat::Png)
                    .full_page(true)
                    .build(),
                &path,
            )
            .await
            .map_err(|e| Error::Screenshot(e.to_string()))?;
        Ok(path)
    }

    async fn alert_text(&mut self, selector: &str) -> Result<Option<String>> {
        match self.page.find_element(selector).await {
            Ok(element) => {
                let text = element
                    .inner_text()
                    .await
                    .map_err(|e| Error::Cdp(e.to_string()))?;
                Ok(text.filter(|t| !t.trim().is_empty()))
            }
            Err(_) => Ok(None),
        }
    }

    async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        let result = self.browser.close().await;
        let _ = self.browser.wait().await;
        self.events.abort();
        result.map(|_| ()).map_err(|e| Error::Cdp(e.to_string()))
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        if !self.closed {
            warn!("browser session dropped without close");
        }
        self.events.abort();
    }
}
