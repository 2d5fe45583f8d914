//! Sample runner
//!
//! Drives the semantic segmentation sample page across
//! backend/dataType/model combinations: one browser session per
//! combination, launched, exercised, scraped, and closed in sequence.
//! Failures are recorded per combination and never abort the run.

use tracing::{info, warn};

use webnn_test_common::timefmt::{format_time_result, truncate_chars};
use webnn_test_common::{
    Backend, Combination, Config, Error, PageMetrics, Result, ResultRecord,
};

use crate::browser::browser_args;
use crate::driver::{Driver, PageSession, SessionOptions};
use crate::elements;

/// Test-case source this runner belongs to.
pub const SOURCE: &str = "samples";

/// Sample name: key into the URL table, the combination matrix, and
/// the result record.
pub const SAMPLE: &str = "semanticSegmentation";

/// How a run was requested, decided once at entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// Exactly one explicitly requested combination. The backend is
    /// kept as the raw identifier so an unrecognized value can be
    /// warned about and skipped instead of rejected up front.
    Single {
        backend: String,
        data_type: String,
        model: String,
    },
    /// Every combination enumerated from configuration.
    All,
}

impl RunMode {
    /// Build a run mode from optional arguments. All three must be
    /// present for a single run; a partial triple falls back to
    /// enumeration with a warning.
    pub fn from_args(
        backend: Option<String>,
        data_type: Option<String>,
        model: Option<String>,
    ) -> Self {
        match (backend, data_type, model) {
            (Some(backend), Some(data_type), Some(model)) => RunMode::Single {
                backend,
                data_type,
                model,
            },
            (None, None, None) => RunMode::All,
            _ => {
                warn!("partial combination ignored; enumerating all configured combinations");
                RunMode::All
            }
        }
    }
}

/// Drives the semantic segmentation sample page.
pub struct SampleRunner<'a> {
    config: &'a Config,
    driver: &'a dyn Driver,
}

impl<'a> SampleRunner<'a> {
    pub fn new(config: &'a Config, driver: &'a dyn Driver) -> Self {
        Self { config, driver }
    }

    /// Run the requested combinations sequentially and return one
    /// result leaf per attempted combination.
    pub async fn run(&self, mode: RunMode) -> ResultRecord {
        let mut results = ResultRecord::new();
        match mode {
            RunMode::Single {
                backend,
                data_type,
                model,
            } => match backend.parse::<Backend>() {
                Ok(backend) => {
                    let combination = Combination {
                        backend,
                        data_type,
                        model,
                    };
                    self.run_combination(&mut results, &combination).await;
                }
                Err(_) => warn!("Invalid backend: {backend}"),
            },
            RunMode::All => {
                let combinations = match self.config.matrix(SAMPLE) {
                    Some(matrix) => matrix.combinations(),
                    None => {
                        warn!("no combinations configured for sample: {SAMPLE}");
                        Vec::new()
                    }
                };
                for combination in &combinations {
                    self.run_combination(&mut results, combination).await;
                }
            }
        }
        results
    }

    /// One isolated browser session for one combination. The error
    /// leaf is always written; the session is closed on every exit
    /// path once it launched.
    async fn run_combination(&self, results: &mut ResultRecord, combination: &Combination) {
        info!("{SOURCE} {SAMPLE} {combination} testing...");

        let screenshot_name = format!(
            "{SOURCE}_{SAMPLE}_{}_{}_{}",
            combination.backend, combination.data_type, combination.model
        );
        let options = self.session_options(combination.backend);
        let mut error_msg = String::new();

        match self.driver.launch(&options).await {
            Err(err) => {
                error_msg = err.to_string();
                warn!("{error_msg}");
            }
            Ok(mut page) => {
                match self.exercise(&mut *page, combination).await {
                    Ok(metrics) => {
                        results.set_inference_time(
                            SAMPLE,
                            combination.backend.as_str(),
                            &combination.data_type,
                            &combination.model,
                            metrics.inference_time.clone(),
                        );
                        info!("Test results: {metrics:?}");
                    }
                    Err(err) => {
                        error_msg = err.to_string();
                        self.capture_diagnostics(&mut *page, &screenshot_name, &mut error_msg)
                            .await;
                        warn!("{error_msg}");
                    }
                }
                if let Err(err) = page.close().await {
                    warn!("failed to close browser session: {err}");
                }
            }
        }

        results.set_error(
            SAMPLE,
            combination.backend.as_str(),
            &combination.data_type,
            &combination.model,
            truncate_chars(&error_msg, self.config.error_msg_max_length),
        );
    }

    /// Navigate, select controls, await results, then scrape and
    /// normalize the timing metrics.
    async fn exercise(
        &self,
        page: &mut dyn PageSession,
        combination: &Combination,
    ) -> Result<PageMetrics> {
        let url = self
            .config
            .sample_url(SAMPLE)
            .ok_or_else(|| Error::UnknownSample(SAMPLE.to_string()))?;
        page.goto(&url).await?;

        page.wait_for(elements::selector("backendButtons")?).await?;

        // unsupported combinations leave a control disabled; the click
        // is skipped and the page keeps its current selection
        let backend_selector = elements::selector(combination.backend.as_str())?.to_string();
        let model_selector = elements::model_selector(&combination.model);
        for selector in [backend_selector, model_selector] {
            page.click_if_enabled(&selector).await?;
        }

        let compute_time_selector = elements::selector("computeTime")?;
        if let Err(err) = page.wait_visible(compute_time_selector).await {
            return Err(Error::PageTimeout(err.to_string()));
        }

        let load_time = page.text_content(elements::selector("loadTime")?).await?;
        let build_time = page.text_content(elements::selector("buildTime")?).await?;
        let compute_time = page.text_content(compute_time_selector).await?;

        let mut metrics = PageMetrics {
            load_time: format_time_result(&load_time),
            build_time: format_time_result(&build_time),
            inference_time: format_time_result(&compute_time),
        };
        metrics.replace_empty(&self.config.empty_data_placeholder);
        Ok(metrics)
    }

    /// Best-effort failure diagnostics. Their own failures are logged
    /// and swallowed so error recording always proceeds.
    async fn capture_diagnostics(
        &self,
        page: &mut dyn PageSession,
        screenshot_name: &str,
        error_msg: &mut String,
    ) {
        match page.save_screenshot(screenshot_name).await {
            Ok(path) => info!("saved failure screenshot: {}", path.display()),
            Err(err) => warn!("failed to save screenshot: {err}"),
        }
        match elements::selector("alertWarning") {
            Ok(selector) => match page.alert_text(selector).await {
                Ok(Some(alert)) => error_msg.push_str(&alert),
                Ok(None) => {}
                Err(err) => warn!("failed to read alert text: {err}"),
            },
            Err(err) => warn!("{err}"),
        }
    }

    fn session_options(&self, backend: Backend) -> SessionOptions {
        SessionOptions {
            headless: self.config.headless,
            executable: self.config.browser.executable.clone(),
            user_data_dir: self.config.browser.user_data_dir.clone(),
            args: browser_args(backend, &self.config.browser.extra_args),
            timeout: self.config.timeout(),
            screenshot_dir: self.config.screenshot_dir.clone(),
        }
    }
}
