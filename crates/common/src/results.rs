//! Nested result record built by the sample runner
//!
//! One leaf per attempted combination, keyed
//! `sample → backend → dataType → model`. Absent keys mean the
//! combination was never attempted; intermediate levels are created on
//! first write.

use std::collections::BTreeMap;

use serde::Serialize;

/// Outcome of a single combination run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CombinationOutcome {
    /// Normalized inference time; unset when the run failed before
    /// extraction.
    #[serde(rename = "inferenceTime", skip_serializing_if = "Option::is_none")]
    pub inference_time: Option<String>,

    /// Captured error text, empty on success. Always written.
    pub error: String,
}

type ModelMap = BTreeMap<String, CombinationOutcome>;
type DataTypeMap = BTreeMap<String, ModelMap>;
type BackendMap = BTreeMap<String, DataTypeMap>;

/// Result record for one runner invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultRecord {
    samples: BTreeMap<String, BackendMap>,
}

/// Flattened view of one record leaf, for tables and reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEntry {
    pub sample: String,
    pub backend: String,
    pub data_type: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inference_time: Option<String>,
    pub error: String,
}

impl ResultRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leaf access, creating intermediate levels when absent.
    pub fn outcome_mut(
        &mut self,
        sample: &str,
        backend: &str,
        data_type: &str,
        model: &str,
    ) -> &mut CombinationOutcome {
        self.samples
            .entry(sample.to_string())
            .or_default()
            .entry(backend.to_string())
            .or_default()
            .entry(data_type.to_string())
            .or_default()
            .entry(model.to_string())
            .or_default()
    }

    pub fn get(
        &self,
        sample: &str,
        backend: &str,
        data_type: &str,
        model: &str,
    ) -> Option<&CombinationOutcome> {
        self.samples
            .get(sample)?
            .get(backend)?
            .get(data_type)?
            .get(model)
    }

    pub fn set_inference_time(
        &mut self,
        sample: &str,
        backend: &str,
        data_type: &str,
        model: &str,
        value: String,
    ) {
        self.outcome_mut(sample, backend, data_type, model).inference_time = Some(value);
    }

    pub fn set_error(
        &mut self,
        sample: &str,
        backend: &str,
        data_type: &str,
        model: &str,
        error: &str,
    ) {
        self.outcome_mut(sample, backend, data_type, model).error = error.to_string();
    }

    /// Number of attempted combinations.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Whether any combination recorded a non-empty error.
    pub fn has_failures(&self) -> bool {
        self.entries().iter().any(|e| !e.error.is_empty())
    }

    /// Flatten the record into one row per leaf.
    pub fn entries(&self) -> Vec<ResultEntry> {
        let mut rows = Vec::new();
        for (sample, backends) in &self.samples {
            for (backend, data_types) in backends {
                for (data_type, models) in data_types {
                    for (model, outcome) in models {
                        rows.push(ResultEntry {
                            sample: sample.clone(),
                            backend: backend.clone(),
                            data_type: data_type.clone(),
                            model: model.clone(),
                            inference_time: outcome.inference_time.clone(),
                            error: outcome.error.clone(),
                        });
                    }
                }
            }
        }
        rows
    }
}
