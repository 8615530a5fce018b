//! Structural validation for workflow documents.
//!
//! Operates on plain JSON values, so it accepts documents built by this crate
//! as well as hand-written or engine-exported workflow files. Validation is a
//! report, not a hard failure: findings are collected with a severity each,
//! and a document counts as valid when no error-severity issue remains.

mod graph;
mod report;

pub use graph::render_graph;
pub use report::{Severity, ValidationIssue, ValidationReport, ValidationStats};

use ahash::{AHashMap, AHashSet};
use serde_json::Value;

/// Node types the validator recognizes. Unknown types are a warning, not an
/// error, since custom engine extensions are legitimate.
pub const KNOWN_NODE_TYPES: &[&str] = &[
    "n8n-nodes-base.httpRequest",
    "n8n-nodes-base.webhook",
    "n8n-nodes-base.set",
    "n8n-nodes-base.merge",
    "n8n-nodes-base.if",
    "n8n-nodes-base.switch",
    "n8n-nodes-base.code",
    "n8n-nodes-base.function",
    "n8n-nodes-base.cron",
    "n8n-nodes-base.start",
    "n8n-nodes-base.executeWorkflow",
    "n8n-nodes-base.splitInBatches",
    "n8n-nodes-base.loop",
    "n8n-nodes-base.aggregate",
    "n8n-nodes-base.filter",
    "n8n-nodes-base.noOp",
    "n8n-nodes-base.respondToWebhook",
];

/// HTTP methods a webhook node may declare.
pub const VALID_HTTP_METHODS: &[&str] =
    &["GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS"];

/// Response modes a webhook node may declare.
pub const VALID_RESPONSE_MODES: &[&str] = &["onReceived", "lastNode", "responseNode"];

/// Node types that act as workflow entry points.
const TRIGGER_TYPES: &[&str] = &[
    "n8n-nodes-base.webhook",
    "n8n-nodes-base.cron",
    "n8n-nodes-base.start",
];

/// Runs every validation pass over the document and collects the findings.
pub fn validate(workflow: &Value) -> ValidationReport {
    let mut report = ValidationReport {
        workflow_name: workflow
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("Unknown")
            .to_string(),
        ..ValidationReport::default()
    };

    if !check_structure(workflow, &mut report.issues) {
        return report;
    }

    if let Some(nodes) = workflow.get("nodes").and_then(Value::as_array) {
        check_nodes(nodes, &mut report.issues, &mut report.stats);

        if let Some(connections) = workflow.get("connections").and_then(Value::as_object) {
            check_connections(connections, nodes, &mut report.issues, &mut report.stats);
        }

        check_webhooks(nodes, &mut report.issues, &mut report.stats);
    }

    report
}

/// Shorthand for callers that only need a verdict.
pub fn is_valid(workflow: &Value) -> bool {
    validate(workflow).is_valid()
}

/// Top-level shape checks. Returns false when the value is so malformed that
/// the remaining passes cannot run.
fn check_structure(workflow: &Value, issues: &mut Vec<ValidationIssue>) -> bool {
    let Some(doc) = workflow.as_object() else {
        issues.push(ValidationIssue::NotAnObject);
        return false;
    };

    for field in ["name", "nodes", "connections"] {
        if !doc.contains_key(field) {
            issues.push(ValidationIssue::MissingField(field));
        }
    }

    match doc.get("name") {
        Some(Value::String(name)) if name.trim().is_empty() => {
            issues.push(ValidationIssue::EmptyName);
        }
        Some(Value::String(_)) | None => {}
        Some(_) => issues.push(ValidationIssue::WrongFieldType {
            field: "name",
            expected: "a string",
        }),
    }

    if let Some(nodes) = doc.get("nodes") {
        if !nodes.is_array() {
            issues.push(ValidationIssue::WrongFieldType {
                field: "nodes",
                expected: "an array",
            });
        }
    }

    if let Some(connections) = doc.get("connections") {
        if !connections.is_object() {
            issues.push(ValidationIssue::WrongFieldType {
                field: "connections",
                expected: "an object",
            });
        }
    }

    match doc.get("settings") {
        None => issues.push(ValidationIssue::MissingSettings),
        Some(settings) if !settings.is_object() => {
            issues.push(ValidationIssue::WrongFieldType {
                field: "settings",
                expected: "an object",
            });
        }
        Some(_) => {}
    }

    true
}

/// Per-node checks: required fields, identifier uniqueness, type tag,
/// position shape.
fn check_nodes(nodes: &[Value], issues: &mut Vec<ValidationIssue>, stats: &mut ValidationStats) {
    stats.total_nodes = nodes.len();

    if nodes.is_empty() {
        issues.push(ValidationIssue::NoNodes);
        return;
    }

    let mut seen_ids = AHashSet::new();
    let mut seen_names = AHashSet::new();

    for (index, node) in nodes.iter().enumerate() {
        for field in ["id", "name", "type", "position"] {
            if node.get(field).is_none() {
                issues.push(ValidationIssue::NodeMissingField { index, field });
            }
        }

        if let Some(id) = node.get("id").and_then(Value::as_str) {
            if !seen_ids.insert(id.to_string()) {
                issues.push(ValidationIssue::DuplicateNodeId {
                    index,
                    id: id.to_string(),
                });
            }
        }

        if let Some(name) = node.get("name").and_then(Value::as_str) {
            if !seen_names.insert(name.to_string()) {
                issues.push(ValidationIssue::DuplicateNodeName {
                    index,
                    name: name.to_string(),
                });
            }
        }

        match node.get("type") {
            Some(Value::String(type_tag)) => {
                if !KNOWN_NODE_TYPES.contains(&type_tag.as_str()) {
                    issues.push(ValidationIssue::UnknownNodeType {
                        index,
                        type_tag: type_tag.clone(),
                    });
                }
            }
            Some(_) => issues.push(ValidationIssue::WrongFieldType {
                field: "type",
                expected: "a string",
            }),
            None => {}
        }

        if let Some(position) = node.get("position") {
            let coords = position.as_array();
            let well_formed = coords
                .is_some_and(|c| c.len() == 2 && c.iter().all(Value::is_number));
            if !well_formed {
                issues.push(ValidationIssue::BadPosition { index });
            }
        }

        match node.get("parameters") {
            None => issues.push(ValidationIssue::MissingParameters { index }),
            Some(params) if !params.is_object() => {
                issues.push(ValidationIssue::WrongFieldType {
                    field: "parameters",
                    expected: "an object",
                });
            }
            Some(_) => {}
        }

        if node.get("typeVersion").is_none() {
            issues.push(ValidationIssue::MissingTypeVersion { index });
        }
    }
}

/// Edge checks: every source and target must name a node, and every
/// non-trigger node needs at least one incoming edge.
fn check_connections(
    connections: &serde_json::Map<String, Value>,
    nodes: &[Value],
    issues: &mut Vec<ValidationIssue>,
    stats: &mut ValidationStats,
) {
    stats.total_connections = connections.len();

    let mut node_names = AHashMap::new();
    for node in nodes {
        let Some(name) = node.get("name").and_then(Value::as_str) else {
            continue;
        };
        let node_type = node.get("type").and_then(Value::as_str).unwrap_or("");
        node_names.insert(name.to_string(), node_type.to_string());
        if TRIGGER_TYPES.contains(&node_type) {
            stats.trigger_nodes.push(name.to_string());
        }
    }

    let mut has_incoming = AHashSet::new();

    for (source, ports) in connections {
        if !node_names.contains_key(source.as_str()) {
            issues.push(ValidationIssue::UnknownConnectionSource {
                source: source.clone(),
            });
            continue;
        }

        let Some(ports) = ports.as_object() else {
            issues.push(ValidationIssue::MalformedConnection {
                source: source.clone(),
            });
            continue;
        };

        for branches in ports.values() {
            let Some(branches) = branches.as_array() else {
                issues.push(ValidationIssue::MalformedConnection {
                    source: source.clone(),
                });
                continue;
            };

            for (branch_index, branch) in branches.iter().enumerate() {
                let Some(targets) = branch.as_array() else {
                    issues.push(ValidationIssue::MalformedConnection {
                        source: source.clone(),
                    });
                    continue;
                };

                for target in targets {
                    let Some(target_name) = target.get("node").and_then(Value::as_str) else {
                        issues.push(ValidationIssue::ConnectionMissingNode {
                            source: source.clone(),
                            branch: branch_index,
                        });
                        continue;
                    };

                    if node_names.contains_key(target_name) {
                        has_incoming.insert(target_name.to_string());
                    } else {
                        issues.push(ValidationIssue::UnknownConnectionTarget {
                            source: source.clone(),
                            target: target_name.to_string(),
                        });
                    }

                    if target.get("type").is_none() {
                        issues.push(ValidationIssue::ConnectionMissingType {
                            source: source.clone(),
                            target: target_name.to_string(),
                        });
                    }
                    if target.get("index").is_none() {
                        issues.push(ValidationIssue::ConnectionMissingIndex {
                            source: source.clone(),
                            target: target_name.to_string(),
                        });
                    }
                }
            }
        }
    }

    for (name, node_type) in &node_names {
        if !TRIGGER_TYPES.contains(&node_type.as_str()) && !has_incoming.contains(name.as_str()) {
            stats.orphaned_nodes.push(name.clone());
            issues.push(ValidationIssue::OrphanedNode { name: name.clone() });
        }
    }
    stats.orphaned_nodes.sort();

    if stats.trigger_nodes.is_empty() {
        issues.push(ValidationIssue::NoTriggerNodes);
    }
}

/// Webhook-specific parameter checks.
fn check_webhooks(nodes: &[Value], issues: &mut Vec<ValidationIssue>, stats: &mut ValidationStats) {
    let mut seen_paths = AHashSet::new();

    for (index, node) in nodes.iter().enumerate() {
        if node.get("type").and_then(Value::as_str) != Some("n8n-nodes-base.webhook") {
            continue;
        }
        stats.total_webhooks += 1;

        let name = node
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{index}"));
        let params = node.get("parameters").cloned().unwrap_or(Value::Null);

        let method = params.get("httpMethod").and_then(Value::as_str);
        match method {
            None => issues.push(ValidationIssue::WebhookMissingMethod { name: name.clone() }),
            Some(m) if !VALID_HTTP_METHODS.contains(&m) => {
                issues.push(ValidationIssue::WebhookInvalidMethod {
                    name: name.clone(),
                    method: m.to_string(),
                });
            }
            Some(_) => {}
        }

        match params.get("path").and_then(Value::as_str) {
            None => issues.push(ValidationIssue::WebhookMissingPath { name: name.clone() }),
            Some(path) => {
                // Different methods may legitimately share a path.
                let key = format!("{}:{}", method.unwrap_or(""), path);
                if !seen_paths.insert(key) {
                    issues.push(ValidationIssue::DuplicateWebhookPath {
                        name: name.clone(),
                        method: method.unwrap_or("").to_string(),
                        path: path.to_string(),
                    });
                }
            }
        }

        match params.get("responseMode").and_then(Value::as_str) {
            None => {
                issues.push(ValidationIssue::WebhookMissingResponseMode { name: name.clone() })
            }
            Some(mode) if !VALID_RESPONSE_MODES.contains(&mode) => {
                issues.push(ValidationIssue::WebhookInvalidResponseMode {
                    name: name.clone(),
                    mode: mode.to_string(),
                });
            }
            Some(_) => {}
        }

        if params.get("authentication").and_then(Value::as_str) == Some("none") {
            issues.push(ValidationIssue::UnauthenticatedWebhook { name });
        }
    }
}
