//! Harness configuration
//!
//! Read-only input loaded from a JSON file (camelCase keys). The
//! combination space lives under `samples` as a
//! `backend → dataType → [models]` tree whose declaration order drives
//! enumeration order; `serde_json`'s `preserve_order` feature keeps the
//! file's key order intact.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::types::{Backend, Combination};

/// Harness configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Run the browser headless
    pub headless: bool,

    /// Uniform operation timeout applied to every page operation
    pub timeout_ms: u64,

    /// Base URL of the sample site
    pub samples_basic_url: String,

    /// Per-sample URL path, appended to the base URL
    pub samples_url: BTreeMap<String, String>,

    /// Recorded error strings are truncated to this many characters
    pub error_msg_max_length: usize,

    /// Sentinel stored in place of an empty scraped metric
    pub empty_data_placeholder: String,

    /// Failure screenshots are written here
    pub screenshot_dir: PathBuf,

    /// Browser binary settings
    pub browser: BrowserSettings,

    /// Combination space, per sample
    pub samples: BTreeMap<String, CombinationMatrix>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            headless: true,
            timeout_ms: 600_000,
            samples_basic_url: "https://webmachinelearning.github.io/webnn-samples/".to_string(),
            samples_url: BTreeMap::from([(
                "semanticSegmentation".to_string(),
                "semantic_segmentation/".to_string(),
            )]),
            error_msg_max_length: 200,
            empty_data_placeholder: "NA".to_string(),
            screenshot_dir: PathBuf::from("screenshots"),
            browser: BrowserSettings::default(),
            samples: BTreeMap::new(),
        }
    }
}

/// Browser binary settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrowserSettings {
    /// Browser executable; None lets the automation layer auto-detect
    pub executable: Option<PathBuf>,

    /// Profile directory for the launched browser
    pub user_data_dir: Option<PathBuf>,

    /// Extra command-line flags appended to every launch
    pub extra_args: Vec<String>,
}

impl Config {
    /// Load configuration from a JSON file, falling back to defaults
    /// when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = serde_json::from_str(&content)
                .map_err(|e| Error::InvalidConfig(format!("{}: {e}", path.display())))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Operation timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// URL of a sample page, when one is configured.
    pub fn sample_url(&self, sample: &str) -> Option<String> {
        self.samples_url
            .get(sample)
            .map(|path| format!("{}{}", self.samples_basic_url, path))
    }

    /// Combination matrix for a sample; empty when unconfigured.
    pub fn matrix(&self, sample: &str) -> Option<&CombinationMatrix> {
        self.samples.get(sample)
    }
}

/// Combination space for one sample: `backend → dataType → [models]`.
///
/// Kept as a raw JSON map so enumeration follows the configuration
/// file's key order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CombinationMatrix(pub serde_json::Map<String, serde_json::Value>);

impl CombinationMatrix {
    /// Enumerate (backend, dataType, model) triples in declaration
    /// order. Keys that do not name a recognized backend are skipped,
    /// as are malformed subtrees.
    pub fn combinations(&self) -> Vec<Combination> {
        let mut out = Vec::new();
        for (backend_key, data_types) in &self.0 {
            let Ok(backend) = backend_key.parse::<Backend>() else {
                warn!("skipping unrecognized backend in config: {backend_key}");
                continue;
            };
            let Some(data_types) = data_types.as_object() else {
                warn!("skipping malformed data type map for backend: {backend_key}");
                continue;
            };
            for (data_type, models) in data_types {
                let Some(models) = models.as_array() else {
                    warn!("skipping malformed model list for {backend_key}/{data_type}");
                    continue;
                };
                for model in models {
                    let Some(model) = model.as_str() else {
                        warn!("skipping non-string model under {backend_key}/{data_type}");
                        continue;
                    };
                    out.push(Combination {
                        backend,
                        data_type: data_type.clone(),
                        model: model.to_string(),
                    });
                }
            }
        }
        out
    }
}
