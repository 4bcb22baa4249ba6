//! Context discovery and filtering.

use crate::error::{MkError, Result};
use crate::runner::CommandRunner;
use log::debug;
use regex::Regex;

/// Argument vector of the discovery invocation:
/// `kubectl config get-contexts -o name`.
pub const LIST_CONTEXTS_ARGS: [&str; 4] = ["config", "get-contexts", "-o", "name"];

/// Lists the kubeconfig context names matching `regex` and, when
/// `negative_regex` is non-empty, not matching it.
///
/// The order of the kubectl listing is preserved. An empty `regex` matches
/// every context; an empty `negative_regex` excludes nothing.
pub fn list_contexts(
    runner: &dyn CommandRunner,
    regex: &str,
    negative_regex: &str,
) -> Result<Vec<String>> {
    let include = Regex::new(regex)?;
    let exclude = Regex::new(negative_regex)?;

    let args: Vec<String> = LIST_CONTEXTS_ARGS.iter().map(|s| s.to_string()).collect();
    let listing = runner
        .invoke(&args)
        .map_err(|e| MkError::Discovery(e.to_string()))?;

    let text = String::from_utf8_lossy(&listing);
    let mut contexts = Vec::new();
    for line in text.lines() {
        if !include.is_match(line) {
            continue;
        }
        // An empty exclude pattern would match every line; it means "no
        // exclusion", not "exclude everything".
        if !negative_regex.is_empty() && exclude.is_match(line) {
            continue;
        }
        contexts.push(line.to_string());
    }
    debug!("matched {} context(s)", contexts.len());

    Ok(contexts)
}
