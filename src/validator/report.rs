use std::fmt;

/// How serious a validation finding is. Errors make a document invalid;
/// warnings only lower the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A single finding raised while validating a workflow document.
///
/// `Display` is implemented by hand because several connection variants have
/// a field named `source`, which `thiserror` would otherwise treat as the
/// error's `source()` — and `String` is not an `Error`.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationIssue {
    // Structure
    NotAnObject,
    MissingField(&'static str),
    WrongFieldType {
        field: &'static str,
        expected: &'static str,
    },
    EmptyName,
    MissingSettings,

    // Nodes
    NoNodes,
    NodeMissingField { index: usize, field: &'static str },
    DuplicateNodeId { index: usize, id: String },
    DuplicateNodeName { index: usize, name: String },
    UnknownNodeType { index: usize, type_tag: String },
    BadPosition { index: usize },
    MissingParameters { index: usize },
    MissingTypeVersion { index: usize },

    // Connections
    UnknownConnectionSource { source: String },
    MalformedConnection { source: String },
    ConnectionMissingNode { source: String, branch: usize },
    UnknownConnectionTarget { source: String, target: String },
    ConnectionMissingType { source: String, target: String },
    ConnectionMissingIndex { source: String, target: String },
    OrphanedNode { name: String },
    NoTriggerNodes,

    // Webhooks
    WebhookMissingMethod { name: String },
    WebhookInvalidMethod { name: String, method: String },
    WebhookMissingPath { name: String },
    DuplicateWebhookPath {
        name: String,
        method: String,
        path: String,
    },
    WebhookInvalidResponseMode { name: String, mode: String },
    WebhookMissingResponseMode { name: String },
    UnauthenticatedWebhook { name: String },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "Workflow must be a valid object"),
            Self::MissingField(field) => write!(f, "Missing required field: {field}"),
            Self::WrongFieldType { field, expected } => {
                write!(f, "Workflow {field} must be {expected}")
            }
            Self::EmptyName => write!(f, "Workflow name cannot be empty"),
            Self::MissingSettings => {
                write!(f, "Missing settings object (optional but recommended)")
            }
            Self::NoNodes => write!(f, "Workflow must contain at least one node"),
            Self::NodeMissingField { index, field } => {
                write!(f, "Node[{index}]: missing required field '{field}'")
            }
            Self::DuplicateNodeId { index, id } => {
                write!(f, "Node[{index}]: duplicate node ID '{id}'")
            }
            Self::DuplicateNodeName { index, name } => {
                write!(f, "Node[{index}]: duplicate node name '{name}'")
            }
            Self::UnknownNodeType { index, type_tag } => {
                write!(
                    f,
                    "Node[{index}]: unknown node type '{type_tag}' (may be valid but not in known types list)"
                )
            }
            Self::BadPosition { index } => {
                write!(
                    f,
                    "Node[{index}]: position must be an array of two [x, y] numbers"
                )
            }
            Self::MissingParameters { index } => {
                write!(f, "Node[{index}]: missing parameters object")
            }
            Self::MissingTypeVersion { index } => {
                write!(f, "Node[{index}]: missing typeVersion (recommended)")
            }
            Self::UnknownConnectionSource { source } => {
                write!(
                    f,
                    "Connection source '{source}' does not match any node name"
                )
            }
            Self::MalformedConnection { source } => {
                write!(
                    f,
                    "Connection outputs for '{source}' must be nested arrays of targets"
                )
            }
            Self::ConnectionMissingNode { source, branch } => {
                write!(
                    f,
                    "Connection from '{source}' (branch {branch}) missing 'node' field"
                )
            }
            Self::UnknownConnectionTarget { source, target } => {
                write!(
                    f,
                    "Connection target '{target}' from '{source}' does not match any node name"
                )
            }
            Self::ConnectionMissingType { source, target } => {
                write!(f, "Connection '{source}' -> '{target}' missing 'type' field")
            }
            Self::ConnectionMissingIndex { source, target } => {
                write!(
                    f,
                    "Connection '{source}' -> '{target}' missing 'index' field"
                )
            }
            Self::OrphanedNode { name } => {
                write!(
                    f,
                    "Orphaned node detected: '{name}' has no incoming connections and is not a trigger"
                )
            }
            Self::NoTriggerNodes => {
                write!(
                    f,
                    "No trigger nodes found (webhook, cron, or start). Workflow may not execute."
                )
            }
            Self::WebhookMissingMethod { name } => {
                write!(f, "Webhook '{name}': missing httpMethod")
            }
            Self::WebhookInvalidMethod { name, method } => {
                write!(f, "Webhook '{name}': invalid httpMethod '{method}'")
            }
            Self::WebhookMissingPath { name } => write!(f, "Webhook '{name}': missing path"),
            Self::DuplicateWebhookPath { name, method, path } => {
                write!(
                    f,
                    "Webhook '{name}': duplicate webhook path '{method} {path}'"
                )
            }
            Self::WebhookInvalidResponseMode { name, mode } => {
                write!(f, "Webhook '{name}': invalid responseMode '{mode}'")
            }
            Self::WebhookMissingResponseMode { name } => {
                write!(
                    f,
                    "Webhook '{name}': missing responseMode (defaults to 'onReceived')"
                )
            }
            Self::UnauthenticatedWebhook { name } => {
                write!(
                    f,
                    "Webhook '{name}': has no authentication. Consider adding security."
                )
            }
        }
    }
}

impl std::error::Error for ValidationIssue {}

impl ValidationIssue {
    pub fn severity(&self) -> Severity {
        match self {
            Self::MissingSettings
            | Self::UnknownNodeType { .. }
            | Self::MissingParameters { .. }
            | Self::MissingTypeVersion { .. }
            | Self::ConnectionMissingType { .. }
            | Self::ConnectionMissingIndex { .. }
            | Self::OrphanedNode { .. }
            | Self::NoTriggerNodes
            | Self::DuplicateWebhookPath { .. }
            | Self::WebhookMissingResponseMode { .. }
            | Self::UnauthenticatedWebhook { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// Aggregate counts gathered during validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationStats {
    pub total_nodes: usize,
    pub total_connections: usize,
    pub total_webhooks: usize,
    pub trigger_nodes: Vec<String>,
    pub orphaned_nodes: Vec<String>,
}

/// The full validation outcome for one workflow document.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub workflow_name: String,
    pub issues: Vec<ValidationIssue>,
    pub stats: ValidationStats,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity() == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity() == Severity::Warning)
    }

    /// A document is valid when no error-severity issue was found.
    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }

    /// Health score out of 100: each error costs 5 points, each warning 2.5,
    /// floored at 0.
    pub fn score(&self) -> u32 {
        let errors = self.errors().count() as f64;
        let warnings = self.warnings().count() as f64;
        let score = 100.0 - (errors + warnings * 0.5) * 5.0;
        score.max(0.0).round() as u32
    }
}
