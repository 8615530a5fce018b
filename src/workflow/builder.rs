use crate::error::BuildError;
use crate::workflow::connection::{ConnectionMap, ConnectionTarget};
use crate::workflow::document::WorkflowDocument;
use crate::workflow::node::Node;
use ahash::AHashSet;
use indexmap::IndexMap;
use serde_json::Value;

/// Fluent builder for [`WorkflowDocument`].
///
/// The builder is a pure value: every call consumes and returns it, and the
/// final aggregate is produced once by [`build`](Self::build). Connections
/// are recorded by source node display name and output branch index;
/// [`build`](Self::build) verifies that every referenced name matches a node,
/// closing the silent-dangling-edge gap a hand-written document has.
///
/// # Example
///
/// ```
/// use kaifuku::prelude::*;
/// use kaifuku::workflow::{NodeParameters, Position, WebhookParameters, MergeParameters, MergeMode};
///
/// let doc = WorkflowDocument::builder("Demo")
///     .add_node(Node::new(
///         "hook", "Hook", Position(100, 300),
///         NodeParameters::Webhook(WebhookParameters::post("demo")),
///     ))
///     .add_node(Node::new(
///         "merge", "Merge", Position(300, 300),
///         NodeParameters::Merge(MergeParameters { mode: MergeMode::Append }),
///     ))
///     .connect("Hook", "Merge")
///     .build()?;
/// assert_eq!(doc.nodes.len(), 2);
/// # Ok::<(), kaifuku::error::BuildError>(())
/// ```
#[derive(Debug, Clone)]
pub struct WorkflowBuilder {
    name: String,
    nodes: Vec<Node>,
    connections: ConnectionMap,
    active: bool,
    settings: IndexMap<String, Value>,
    version_id: String,
}

impl WorkflowBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
            connections: ConnectionMap::new(),
            active: true,
            settings: IndexMap::new(),
            version_id: "1".to_string(),
        }
    }

    /// Appends a node; document order is insertion order.
    #[must_use]
    pub fn add_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    /// Connects branch 0 of `from` to the main input of `to`. Both are
    /// display names.
    #[must_use]
    pub fn connect(self, from: &str, to: &str) -> Self {
        self.connect_branch(from, 0, to)
    }

    /// Connects the given output branch of `from` to the main input of `to`.
    /// Skipped branch indices are padded with empty branches so the branch
    /// numbering stays aligned with the node's declared outputs.
    #[must_use]
    pub fn connect_branch(mut self, from: &str, branch: usize, to: &str) -> Self {
        self.connections
            .entry(from.to_string())
            .or_default()
            .push_target(branch, ConnectionTarget::main(to));
        self
    }

    /// Sets the `active` flag (defaults to true).
    #[must_use]
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Adds one entry to the `settings` mapping (defaults to empty).
    #[must_use]
    pub fn setting(mut self, key: impl Into<String>, value: Value) -> Self {
        self.settings.insert(key.into(), value);
        self
    }

    /// Overrides the version identifier (defaults to "1").
    #[must_use]
    pub fn version_id(mut self, version_id: impl Into<String>) -> Self {
        self.version_id = version_id.into();
        self
    }

    /// Validates the assembled graph and produces the immutable document.
    ///
    /// # Errors
    ///
    /// - [`BuildError::EmptyWorkflow`] when no node was added
    /// - [`BuildError::DuplicateNodeId`] / [`BuildError::DuplicateNodeName`]
    ///   when identifiers collide
    /// - [`BuildError::UnknownConnectionSource`] /
    ///   [`BuildError::UnknownConnectionTarget`] when an edge references a
    ///   display name no node carries
    pub fn build(self) -> Result<WorkflowDocument, BuildError> {
        if self.nodes.is_empty() {
            return Err(BuildError::EmptyWorkflow);
        }

        let mut ids = AHashSet::new();
        let mut names = AHashSet::new();
        for node in &self.nodes {
            if !ids.insert(node.id.as_str()) {
                return Err(BuildError::DuplicateNodeId(node.id.clone()));
            }
            if !names.insert(node.name.as_str()) {
                return Err(BuildError::DuplicateNodeName(node.name.clone()));
            }
        }

        for (source, ports) in &self.connections {
            if !names.contains(source.as_str()) {
                return Err(BuildError::UnknownConnectionSource(source.clone()));
            }
            for branch in &ports.main {
                for target in branch {
                    if !names.contains(target.node.as_str()) {
                        return Err(BuildError::UnknownConnectionTarget {
                            source: source.clone(),
                            target: target.node.clone(),
                        });
                    }
                }
            }
        }

        Ok(WorkflowDocument {
            name: self.name,
            nodes: self.nodes,
            connections: self.connections,
            active: self.active,
            settings: self.settings,
            version_id: self.version_id,
        })
    }
}
