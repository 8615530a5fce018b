use crate::error::DocumentError;
use crate::workflow::builder::WorkflowBuilder;
use crate::workflow::connection::ConnectionMap;
use crate::workflow::node::Node;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

/// The complete workflow document, ready to import into n8n.
///
/// Created once by [`WorkflowBuilder::build`] and never mutated afterwards.
/// Top-level key order and the shape of `nodes`/`connections` follow the n8n
/// export format.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDocument {
    pub name: String,
    pub nodes: Vec<Node>,
    pub connections: ConnectionMap,
    pub active: bool,
    pub settings: IndexMap<String, Value>,
    pub version_id: String,
}

impl WorkflowDocument {
    /// Starts a builder for a document with the given display name.
    pub fn builder(name: impl Into<String>) -> WorkflowBuilder {
        WorkflowBuilder::new(name)
    }

    /// Looks a node up by its display name.
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Pretty-printed JSON with two-space indentation. Key order is the
    /// construction order throughout, never sorted.
    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The document as a JSON value, for validation and comparisons.
    pub fn to_value(&self) -> Result<Value, DocumentError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Writes the pretty-printed document to a file, with a trailing newline.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        let mut json = self.to_json_pretty()?;
        json.push('\n');
        std::fs::write(path, json)?;
        Ok(())
    }
}
