use thiserror::Error;

/// Errors that abort a whole run.
///
/// A single context's kubectl failure is deliberately absent here: the
/// scheduler captures it as that task's result payload and the batch
/// continues.
#[derive(Error, Debug)]
pub enum MkError {
    #[error("invalid context filter regex: {0}")]
    Regex(#[from] regex::Error),

    #[error("failed to list contexts: {0}")]
    Discovery(String),

    #[error("unknown output format {0:?}. Choose one of json|yaml")]
    UnknownOutput(String),

    #[error(
        "couldn't parse the collected output. Are you sure your kubectl command allows for json output? Run with -d to see debug output"
    )]
    Aggregation(#[source] serde_json::Error),

    #[error("failed to convert aggregated output to YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MkError>;
