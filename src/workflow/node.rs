use crate::workflow::parameters::NodeParameters;
use serde::{Serialize, Serializer};
use std::fmt;

/// Canvas position of a node. Layout only, no semantic effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position(pub i64, pub i64);

/// The n8n node type tag identifying which handler interprets a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeType {
    Webhook,
    Set,
    If,
    Switch,
    HttpRequest,
    Merge,
    RespondToWebhook,
    Other(String),
}

impl NodeType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Webhook => "n8n-nodes-base.webhook",
            Self::Set => "n8n-nodes-base.set",
            Self::If => "n8n-nodes-base.if",
            Self::Switch => "n8n-nodes-base.switch",
            Self::HttpRequest => "n8n-nodes-base.httpRequest",
            Self::Merge => "n8n-nodes-base.merge",
            Self::RespondToWebhook => "n8n-nodes-base.respondToWebhook",
            Self::Other(tag) => tag,
        }
    }

    /// Whether this type is a workflow entry point.
    pub fn is_trigger(&self) -> bool {
        match self {
            Self::Webhook => true,
            Self::Other(tag) => {
                tag == "n8n-nodes-base.cron" || tag == "n8n-nodes-base.start"
            }
            _ => false,
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NodeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A node type version. Serializes as an integer when fractionless so the
/// document matches what the n8n editor itself exports (`2`, not `2.0`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeVersion(pub f64);

impl Serialize for TypeVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.fract() == 0.0 {
            serializer.serialize_u64(self.0 as u64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

/// One step in the workflow graph.
///
/// Field order mirrors the n8n export format: parameters first, then
/// identity, type, version and layout position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub parameters: NodeParameters,
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(rename = "typeVersion")]
    pub type_version: TypeVersion,
    pub position: Position,
}

impl Node {
    /// Creates a node from a typed parameter block. The type tag and default
    /// typeVersion derive from the parameter variant, so a node can never
    /// carry parameters of the wrong shape for its type.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        position: Position,
        parameters: NodeParameters,
    ) -> Self {
        let node_type = parameters.node_type();
        let type_version = TypeVersion(parameters.default_type_version());
        Self {
            parameters,
            id: id.into(),
            name: name.into(),
            node_type,
            type_version,
            position,
        }
    }

    /// Creates a node of an arbitrary type tag with an empty parameter
    /// mapping. Use for node types without a dedicated schema.
    pub fn custom(
        id: impl Into<String>,
        name: impl Into<String>,
        type_tag: impl Into<String>,
        position: Position,
    ) -> Self {
        Self::new(id, name, position, NodeParameters::custom(type_tag))
    }

    /// Overrides the typeVersion, for pinning a node to an older handler.
    pub fn with_type_version(mut self, version: f64) -> Self {
        self.type_version = TypeVersion(version);
        self
    }
}
