use std::fmt;

use thiserror::Error;

/// Errors raised while assembling a workflow document.
///
/// `Display` is implemented by hand because the `UnknownConnectionTarget`
/// variant has a field named `source`, which `thiserror` would otherwise
/// treat as the error's `source()` — and `String` is not an `Error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    EmptyWorkflow,
    DuplicateNodeId(String),
    DuplicateNodeName(String),
    UnknownConnectionSource(String),
    UnknownConnectionTarget { source: String, target: String },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyWorkflow => {
                write!(f, "Workflow must contain at least one node")
            }
            Self::DuplicateNodeId(id) => write!(f, "Duplicate node id '{id}'"),
            Self::DuplicateNodeName(name) => write!(f, "Duplicate node name '{name}'"),
            Self::UnknownConnectionSource(source) => {
                write!(f, "Connection source '{source}' does not match any node name")
            }
            Self::UnknownConnectionTarget { source, target } => {
                write!(
                    f,
                    "Connection target '{target}' from '{source}' does not match any node name"
                )
            }
        }
    }
}

impl std::error::Error for BuildError {}

/// Errors raised when serializing or writing a finished document.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to serialize workflow JSON: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write workflow file: {0}")]
    Io(#[from] std::io::Error),
}
