use std::path::PathBuf;
use thiserror::Error;

/// Problems found while loading or checking a schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read schema file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML schema: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON schema: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported schema file extension '{0}' (expected .yaml, .yml or .json)")]
    UnsupportedFormat(String),

    #[error("schema declares no fields")]
    Empty,

    #[error("field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    #[error("field '{field}': invalid pattern: {source}")]
    Pattern {
        field: String,
        #[source]
        source: regex::Error,
    },
}

impl SchemaError {
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
