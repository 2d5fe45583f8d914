//! Core types shared across the harness

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Compute backend a sample page can run on.
///
/// Only these three identifiers are recognized; configuration keys or
/// command-line arguments naming anything else are skipped with a
/// warning rather than executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Cpu,
    Gpu,
    Npu,
}

impl Backend {
    pub const ALL: [Backend; 3] = [Backend::Cpu, Backend::Gpu, Backend::Npu];

    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Cpu => "cpu",
            Backend::Gpu => "gpu",
            Backend::Npu => "npu",
        }
    }
}

impl FromStr for Backend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cpu" => Ok(Backend::Cpu),
            "gpu" => Ok(Backend::Gpu),
            "npu" => Ok(Backend::Npu),
            other => Err(Error::UnknownBackend(other.to_string())),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One (backend, data type, model) triple to exercise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combination {
    pub backend: Backend,
    pub data_type: String,
    pub model: String,
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.backend, self.data_type, self.model)
    }
}

/// Timing metrics scraped from a sample page, normalized to bare
/// numeric strings. Only `inference_time` survives into the result
/// record; the full triple is logged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetrics {
    pub load_time: String,
    pub build_time: String,
    pub inference_time: String,
}

impl PageMetrics {
    /// Substitute the configured sentinel for any empty field.
    pub fn replace_empty(&mut self, placeholder: &str) {
        for field in [
            &mut self.load_time,
            &mut self.build_time,
            &mut self.inference_time,
        ] {
            if field.is_empty() {
                *field = placeholder.to_string();
            }
        }
    }
}
