use std::path::PathBuf;

/// Conditions that abort the whole run.
#[derive(thiserror::Error, Debug)]
pub enum TaggerError {
    #[error("object {0} not a supported object in this version")]
    UnsupportedObject(String),
    #[error("invalid action: {0}")]
    InvalidAction(String),
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("{0}")]
    Authentication(String),
    #[error("unable to cache {label}")]
    Listing { label: String, detail: String },
    #[error("unable to write report to {}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl TaggerError {
    /// Remote diagnostic text, when the failure came from a controller call.
    pub fn detail(&self) -> Option<&str> {
        match self {
            TaggerError::Listing { detail, .. } => Some(detail),
            _ => None,
        }
    }
}

/// A per-object failure that is reported and skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub message: String,
    pub detail: Option<String>,
}

impl Warning {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: Some(detail.into()),
        }
    }
}

/// Result of one per-object step. Fatal conditions travel separately as
/// `Err(TaggerError)`.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Done(T),
    Recoverable(Warning),
}
