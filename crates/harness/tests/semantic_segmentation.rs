//! Sample-runner tests against a scripted mock automation layer

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use webnn_test_common::{Config, Error, Result};
use webnn_test_harness::{
    elements, Driver, PageSession, RunMode, SampleRunner, SessionOptions, SAMPLE,
};

/// Scripted behavior for a mock session.
#[derive(Debug, Clone, Default)]
struct Script {
    launch_error: Option<String>,
    goto_error: Option<String>,
    /// Fails the wait on the results indicator.
    results_wait_error: bool,
    /// Text content by selector; missing selectors read as empty.
    text: HashMap<String, String>,
    /// Fails every text extraction.
    text_error: Option<String>,
    /// Selectors whose controls are disabled.
    disabled: HashSet<String>,
    alert: Option<String>,
    screenshot_error: Option<String>,
}

/// Everything the runner did, recorded for assertions.
#[derive(Debug, Default)]
struct Log {
    launches: usize,
    gotos: Vec<String>,
    waits: Vec<String>,
    clicks: Vec<String>,
    skipped_clicks: Vec<String>,
    screenshots: Vec<String>,
    closes: usize,
}

struct MockDriver {
    script: Script,
    log: Arc<Mutex<Log>>,
}

impl MockDriver {
    fn new(script: Script) -> Self {
        Self {
            script,
            log: Arc::new(Mutex::new(Log::default())),
        }
    }

    fn log(&self) -> std::sync::MutexGuard<'_, Log> {
        self.log.lock().unwrap()
    }
}

#[async_trait]
impl Driver for MockDriver {
    async fn launch(&self, _options: &SessionOptions) -> Result<Box<dyn PageSession>> {
        if let Some(msg) = &self.script.launch_error {
            return Err(Error::Launch(msg.clone()));
        }
        self.log.lock().unwrap().launches += 1;
        Ok(Box::new(MockSession {
            script: self.script.clone(),
            log: self.log.clone(),
        }))
    }
}

struct MockSession {
    script: Script,
    log: Arc<Mutex<Log>>,
}

#[async_trait]
impl PageSession for MockSession {
    async fn goto(&mut self, url: &str) -> Result<()> {
        if let Some(msg) = &self.script.goto_error {
            return Err(Error::Navigation(msg.clone()));
        }
        self.log.lock().unwrap().gotos.push(url.to_string());
        Ok(())
    }

    async fn wait_for(&mut self, selector: &str) -> Result<()> {
        self.log.lock().unwrap().waits.push(selector.to_string());
        Ok(())
    }

    async fn wait_visible(&mut self, selector: &str) -> Result<()> {
        self.log.lock().unwrap().waits.push(selector.to_string());
        if self.script.results_wait_error {
            return Err(Error::WaitTimeout {
                selector: selector.to_string(),
                ms: 5000,
            });
        }
        Ok(())
    }

    async fn click_if_enabled(&mut self, selector: &str) -> Result<bool> {
        let mut log = self.log.lock().unwrap();
        if self.script.disabled.contains(selector) {
            log.skipped_clicks.push(selector.to_string());
            return Ok(false);
        }
        log.clicks.push(selector.to_string());
        Ok(true)
    }

    async fn text_content(&mut self, selector: &str) -> Result<String> {
        if let Some(msg) = &self.script.text_error {
            return Err(Error::Evaluate(msg.clone()));
        }
        Ok(self.script.text.get(selector).cloned().unwrap_or_default())
    }

    async fn save_screenshot(&mut self, name: &str) -> Result<PathBuf> {
        if let Some(msg) = &self.script.screenshot_error {
            return Err(Error::Screenshot(msg.clone()));
        }
        self.log.lock().unwrap().screenshots.push(name.to_string());
        Ok(PathBuf::from(format!("{name}.png")))
    }

    async fn alert_text(&mut self, _selector: &str) -> Result<Option<String>> {
        Ok(self.script.alert.clone())
    }

    async fn close(&mut self) -> Result<()> {
        self.log.lock().unwrap().closes += 1;
        Ok(())
    }
}

fn test_config() -> Config {
    let mut config = Config::default();
    config.samples_basic_url = "http://localhost:8000/".to_string();
    config
}

fn config_with_matrix(matrix: serde_json::Value) -> Config {
    let mut config = test_config();
    config
        .samples
        .insert(SAMPLE.to_string(), serde_json::from_value(matrix).unwrap());
    config
}

fn timing_script() -> Script {
    let mut script = Script::default();
    script.text.insert(
        elements::selector("loadTime").unwrap().to_string(),
        "30.1 ms".to_string(),
    );
    script.text.insert(
        elements::selector("buildTime").unwrap().to_string(),
        "40 ms".to_string(),
    );
    script.text.insert(
        elements::selector("computeTime").unwrap().to_string(),
        "12ms".to_string(),
    );
    script
}

fn single(backend: &str, data_type: &str, model: &str) -> RunMode {
    RunMode::Single {
        backend: backend.to_string(),
        data_type: data_type.to_string(),
        model: model.to_string(),
    }
}

#[tokio::test]
async fn explicit_combination_records_inference_time() {
    let config = test_config();
    let driver = MockDriver::new(timing_script());
    let runner = SampleRunner::new(&config, &driver);

    let results = runner.run(single("cpu", "fp32", "resnet50")).await;

    assert_eq!(
        serde_json::to_value(&results).unwrap(),
        serde_json::json!({
            "semanticSegmentation": {
                "cpu": { "fp32": { "resnet50": { "inferenceTime": "12", "error": "" } } }
            }
        })
    );

    let log = driver.log();
    assert_eq!(log.launches, 1);
    assert_eq!(log.closes, 1);
    assert_eq!(
        log.gotos,
        vec!["http://localhost:8000/semantic_segmentation/".to_string()]
    );
    assert_eq!(
        log.clicks,
        vec!["#webnn_cpu".to_string(), "#resnet50".to_string()]
    );
}

#[tokio::test]
async fn results_timeout_is_tagged_and_leaf_has_no_inference_time() {
    let config = test_config();
    let mut script = timing_script();
    script.results_wait_error = true;
    let driver = MockDriver::new(script);
    let runner = SampleRunner::new(&config, &driver);

    let results = runner.run(single("cpu", "fp32", "resnet50")).await;

    let outcome = results.get(SAMPLE, "cpu", "fp32", "resnet50").unwrap();
    assert!(outcome.error.starts_with("[PageTimeout]"));
    assert!(outcome.inference_time.is_none());

    let log = driver.log();
    assert_eq!(log.closes, 1);
    assert_eq!(
        log.screenshots,
        vec!["samples_semanticSegmentation_cpu_fp32_resnet50".to_string()]
    );
}

#[tokio::test]
async fn invalid_backend_is_skipped_without_entry() {
    let config = test_config();
    let driver = MockDriver::new(timing_script());
    let runner = SampleRunner::new(&config, &driver);

    let results = runner.run(single("dsp", "fp32", "resnet50")).await;

    assert!(results.is_empty());
    assert_eq!(driver.log().launches, 0);
}

#[tokio::test]
async fn enumeration_skips_unrecognized_backends() {
    let config = config_with_matrix(serde_json::json!({
        "cpu": { "fp32": ["m1", "m2"] },
        "invalidBackend": { "fp32": ["m9"] }
    }));
    let driver = MockDriver::new(timing_script());
    let runner = SampleRunner::new(&config, &driver);

    let results = runner.run(RunMode::All).await;

    assert_eq!(results.len(), 2);
    assert!(results.get(SAMPLE, "cpu", "fp32", "m1").is_some());
    assert!(results.get(SAMPLE, "cpu", "fp32", "m2").is_some());
    assert!(results.get(SAMPLE, "invalidBackend", "fp32", "m9").is_none());

    let log = driver.log();
    assert_eq!(log.launches, 2);
    assert_eq!(log.closes, 2);
    // configured order: m1 before m2
    assert_eq!(
        log.clicks,
        vec!["#webnn_cpu", "#m1", "#webnn_cpu", "#m2"]
    );
}

#[tokio::test]
async fn unconfigured_sample_enumerates_nothing() {
    let config = test_config();
    let driver = MockDriver::new(timing_script());
    let runner = SampleRunner::new(&config, &driver);

    let results = runner.run(RunMode::All).await;

    assert!(results.is_empty());
    assert_eq!(driver.log().launches, 0);
}

#[tokio::test]
async fn launch_failure_records_error_without_close() {
    let config = test_config();
    let mut script = Script::default();
    script.launch_error = Some("no chrome binary".to_string());
    let driver = MockDriver::new(script);
    let runner = SampleRunner::new(&config, &driver);

    let results = runner.run(single("cpu", "fp32", "resnet50")).await;

    let outcome = results.get(SAMPLE, "cpu", "fp32", "resnet50").unwrap();
    assert!(outcome.error.contains("no chrome binary"));
    assert!(outcome.inference_time.is_none());

    let log = driver.log();
    assert_eq!(log.launches, 0);
    assert_eq!(log.closes, 0);
}

#[tokio::test]
async fn recorded_error_is_truncated_to_configured_length() {
    let mut config = test_config();
    config.error_msg_max_length = 10;
    let mut script = Script::default();
    script.launch_error = Some("x".repeat(300));
    let driver = MockDriver::new(script);
    let runner = SampleRunner::new(&config, &driver);

    let results = runner.run(single("cpu", "fp32", "resnet50")).await;

    let outcome = results.get(SAMPLE, "cpu", "fp32", "resnet50").unwrap();
    assert_eq!(outcome.error.chars().count(), 10);
}

#[tokio::test]
async fn empty_metric_is_stored_as_placeholder() {
    let config = test_config();
    let mut script = timing_script();
    script.text.insert(
        elements::selector("computeTime").unwrap().to_string(),
        String::new(),
    );
    let driver = MockDriver::new(script);
    let runner = SampleRunner::new(&config, &driver);

    let results = runner.run(single("cpu", "fp32", "resnet50")).await;

    let outcome = results.get(SAMPLE, "cpu", "fp32", "resnet50").unwrap();
    assert_eq!(outcome.inference_time.as_deref(), Some("NA"));
    assert_eq!(outcome.error, "");
}

#[tokio::test]
async fn disabled_control_is_skipped_silently() {
    let config = test_config();
    let mut script = timing_script();
    script.disabled.insert("#resnet50".to_string());
    let driver = MockDriver::new(script);
    let runner = SampleRunner::new(&config, &driver);

    let results = runner.run(single("cpu", "fp32", "resnet50")).await;

    let outcome = results.get(SAMPLE, "cpu", "fp32", "resnet50").unwrap();
    assert_eq!(outcome.error, "");
    assert_eq!(outcome.inference_time.as_deref(), Some("12"));

    let log = driver.log();
    assert_eq!(log.clicks, vec!["#webnn_cpu"]);
    assert_eq!(log.skipped_clicks, vec!["#resnet50"]);
}

#[tokio::test]
async fn alert_text_is_appended_to_error() {
    let config = test_config();
    let mut script = timing_script();
    script.text_error = Some("lost page".to_string());
    script.alert = Some(" Alert: model failed to build".to_string());
    let driver = MockDriver::new(script);
    let runner = SampleRunner::new(&config, &driver);

    let results = runner.run(single("gpu", "fp16", "resnet50")).await;

    let outcome = results.get(SAMPLE, "gpu", "fp16", "resnet50").unwrap();
    assert!(outcome.error.contains("lost page"));
    assert!(outcome.error.ends_with("Alert: model failed to build"));

    let log = driver.log();
    assert_eq!(
        log.screenshots,
        vec!["samples_semanticSegmentation_gpu_fp16_resnet50".to_string()]
    );
    assert_eq!(log.closes, 1);
}

#[tokio::test]
async fn screenshot_failure_does_not_block_error_recording() {
    let config = test_config();
    let mut script = timing_script();
    script.text_error = Some("lost page".to_string());
    script.screenshot_error = Some("disk full".to_string());
    let driver = MockDriver::new(script);
    let runner = SampleRunner::new(&config, &driver);

    let results = runner.run(single("cpu", "fp32", "resnet50")).await;

    let outcome = results.get(SAMPLE, "cpu", "fp32", "resnet50").unwrap();
    assert!(outcome.error.contains("lost page"));
    assert_eq!(driver.log().closes, 1);
}

#[tokio::test]
async fn navigation_failure_still_closes_session() {
    let config = test_config();
    let mut script = Script::default();
    script.goto_error = Some("dns failure".to_string());
    let driver = MockDriver::new(script);
    let runner = SampleRunner::new(&config, &driver);

    let results = runner.run(single("cpu", "fp32", "resnet50")).await;

    let outcome = results.get(SAMPLE, "cpu", "fp32", "resnet50").unwrap();
    assert!(outcome.error.contains("dns failure"));
    assert_eq!(driver.log().launches, 1);
    assert_eq!(driver.log().closes, 1);
}

#[test]
fn run_mode_is_decided_once_from_arguments() {
    assert_eq!(
        RunMode::from_args(
            Some("cpu".to_string()),
            Some("fp32".to_string()),
            Some("m1".to_string())
        ),
        single("cpu", "fp32", "m1")
    );
    assert_eq!(RunMode::from_args(None, None, None), RunMode::All);
    // partial triples fall back to enumeration
    assert_eq!(
        RunMode::from_args(Some("cpu".to_string()), None, None),
        RunMode::All
    );
}
