//! Page-element registry for the sample pages
//!
//! CSS selectors keyed by logical control name, matching the markup of
//! the WebNN sample site.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use webnn_test_common::{Error, Result};

static SAMPLE_ELEMENTS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // backend button group, rendered once the page has booted
        ("backendButtons", "#backendBtns"),
        // backend controls
        ("cpu", "#webnn_cpu"),
        ("gpu", "#webnn_gpu"),
        ("npu", "#webnn_npu"),
        // model controls on the semantic segmentation page
        ("deeplabv3mnv2nchw", "#deeplabv3mnv2nchw"),
        ("deeplabv3mnv2nhwc", "#deeplabv3mnv2nhwc"),
        // timing readouts
        ("loadTime", "#loadTime"),
        ("buildTime", "#buildTime"),
        ("computeTime", "#computeTime"),
        // on-page alert banner surfaced on model failures
        ("alertWarning", ".alert-warning"),
    ])
});

/// Selector for a logical element name.
pub fn selector(name: &str) -> Result<&'static str> {
    SAMPLE_ELEMENTS
        .get(name)
        .copied()
        .ok_or_else(|| Error::UnknownElement(name.to_string()))
}

/// Selector for a model control. Known aliases come from the registry;
/// anything else addresses the control by element id, so explicitly
/// requested models resolve without a registry entry.
pub fn model_selector(model: &str) -> String {
    selector(model)
        .map(str::to_string)
        .unwrap_or_else(|_| format!("#{model}"))
}
