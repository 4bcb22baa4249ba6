//! Aggregated output rendering.

use crate::error::{MkError, Result};
use serde_json::Value;
use std::collections::BTreeMap;

/// JSON output format name.
pub const JSON: &str = "json";
/// YAML output format name.
pub const YAML: &str = "yaml";

/// Rejects output formats other than json/yaml.
///
/// Runs before discovery, so a typo never spawns a process.
pub fn validate(format: &str) -> Result<()> {
    match format {
        JSON | YAML => Ok(()),
        other => Err(MkError::UnknownOutput(other.to_string())),
    }
}

/// Renders the collected results as one JSON document keyed by context (or
/// "context: namespace"), 2-space indented with sorted keys, or as the YAML
/// rendering of that same document.
///
/// Every payload must itself parse as JSON. `api::run` guarantees that by
/// forcing `-o json` onto the wrapped command; a task that failed (its
/// payload is error text) still breaks aggregation, which is the documented
/// fatal case.
pub fn render(results: &BTreeMap<String, Vec<u8>>, format: &str) -> Result<String> {
    let mut document: BTreeMap<&String, Value> = BTreeMap::new();
    for (key, payload) in results {
        let value = serde_json::from_slice(payload).map_err(MkError::Aggregation)?;
        document.insert(key, value);
    }

    match format {
        YAML => Ok(serde_yaml::to_string(&document)?),
        _ => serde_json::to_string_pretty(&document).map_err(MkError::Aggregation),
    }
}
