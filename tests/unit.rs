//! Unit tests for the workflow data model and builder.
mod common;
use common::*;
use kaifuku::prelude::*;
use kaifuku::workflow::{
    Authentication, HttpMethod, HttpRequestParameters, IfParameters, Position, SwitchParameters,
    TypeVersion, WebhookParameters,
};
use serde_json::json;

#[test]
fn test_node_type_display() {
    assert_eq!(NodeType::Webhook.to_string(), "n8n-nodes-base.webhook");
    assert_eq!(
        NodeType::HttpRequest.to_string(),
        "n8n-nodes-base.httpRequest"
    );
    assert_eq!(NodeType::Other("custom.thing".into()).to_string(), "custom.thing");
}

#[test]
fn test_node_type_trigger_detection() {
    assert!(NodeType::Webhook.is_trigger());
    assert!(NodeType::Other("n8n-nodes-base.cron".into()).is_trigger());
    assert!(!NodeType::Merge.is_trigger());
    assert!(!NodeType::Other("custom.thing".into()).is_trigger());
}

#[test]
fn test_type_version_serializes_integers_without_fraction() {
    assert_eq!(serde_json::to_string(&TypeVersion(2.0)).unwrap(), "2");
    assert_eq!(serde_json::to_string(&TypeVersion(3.4)).unwrap(), "3.4");
    assert_eq!(serde_json::to_string(&TypeVersion(2.1)).unwrap(), "2.1");
}

#[test]
fn test_node_derives_type_and_version_from_parameters() {
    let node = Node::new(
        "hook",
        "Hook",
        Position(0, 0),
        NodeParameters::Webhook(WebhookParameters::post("p")),
    );
    assert_eq!(node.node_type, NodeType::Webhook);
    assert_eq!(node.type_version, TypeVersion(2.0));

    let pinned = node.with_type_version(1.0);
    assert_eq!(pinned.type_version, TypeVersion(1.0));
}

#[test]
fn test_custom_node_has_empty_parameters() {
    let node = Node::custom("x", "X", "custom.thing", Position(0, 0));
    assert_eq!(node.node_type, NodeType::Other("custom.thing".into()));
    let value = serde_json::to_value(&node).unwrap();
    assert_eq!(value["parameters"], json!({}));
    assert_eq!(value["typeVersion"], json!(1));
}

#[test]
fn test_node_serializes_with_n8n_field_order_and_names() {
    let node = Node::new(
        "hook",
        "Hook",
        Position(100, 300),
        NodeParameters::Webhook(WebhookParameters::post("incidents")),
    );
    let json = serde_json::to_string(&node).unwrap();

    // Renamed fields use the engine's casing.
    assert!(json.contains("\"type\":\"n8n-nodes-base.webhook\""));
    assert!(json.contains("\"typeVersion\":2"));
    assert!(json.contains("\"position\":[100,300]"));

    // Parameters lead, identity follows, matching the engine export order.
    let params_at = json.find("\"parameters\"").unwrap();
    let id_at = json.find("\"id\"").unwrap();
    assert!(params_at < id_at);
}

#[test]
fn test_webhook_parameters_shape() {
    let value =
        serde_json::to_value(WebhookParameters::post("sbqc-n4-4-self-healing-trigger")).unwrap();
    assert_eq!(
        value,
        json!({
            "path": "sbqc-n4-4-self-healing-trigger",
            "options": {},
            "httpMethod": "POST",
            "responseMode": "responseNode"
        })
    );
}

#[test]
fn test_http_request_header_auth() {
    let params = HttpRequestParameters::post("http://localhost:3080/api/alerts", json!({}))
        .with_header_auth("agentx-api-key");
    assert_eq!(params.authentication, Authentication::PredefinedCredentialType);
    assert_eq!(params.method, HttpMethod::Post);

    let value = serde_json::to_value(&params).unwrap();
    assert_eq!(value["authentication"], json!("predefinedCredentialType"));
    assert_eq!(value["nodeCredentialType"], json!("httpHeaderAuth"));
    assert_eq!(value["credentialId"], json!("agentx-api-key"));
}

#[test]
fn test_http_request_without_credentials_omits_fields() {
    let params = HttpRequestParameters::post("http://example.test", json!({"a": 1}));
    let value = serde_json::to_value(&params).unwrap();
    assert_eq!(value["authentication"], json!("none"));
    assert!(value.get("nodeCredentialType").is_none());
    assert!(value.get("credentialId").is_none());
}

#[test]
fn test_boolean_gate_condition_shape() {
    let value = serde_json::to_value(IfParameters::boolean_gate("={{ $json.ok }}")).unwrap();
    assert_eq!(
        value,
        json!({
            "conditions": {
                "conditions": [{
                    "leftValue": "={{ $json.ok }}",
                    "rightValue": true,
                    "operator": { "type": "boolean", "operation": "true" }
                }]
            }
        })
    );
}

#[test]
fn test_switch_rules_numbered_in_order() {
    let params = SwitchParameters::on_string("={{ $json.action }}", &["a", "b", "c"]);
    let value = serde_json::to_value(&params).unwrap();
    assert_eq!(
        value,
        json!({
            "rules": {
                "rules": [
                    { "value": "a", "output": 0 },
                    { "value": "b", "output": 1 },
                    { "value": "c", "output": 2 }
                ]
            },
            "dataType": "string",
            "value1": "={{ $json.action }}"
        })
    );
}

#[test]
fn test_builder_rejects_empty_workflow() {
    let result = WorkflowDocument::builder("Empty").build();
    assert_eq!(result.unwrap_err(), BuildError::EmptyWorkflow);
}

#[test]
fn test_builder_rejects_duplicate_ids() {
    let result = WorkflowDocument::builder("Dup")
        .add_node(Node::custom("same", "First", "custom.a", Position(0, 0)))
        .add_node(Node::custom("same", "Second", "custom.b", Position(0, 0)))
        .build();
    assert_eq!(result.unwrap_err(), BuildError::DuplicateNodeId("same".into()));
}

#[test]
fn test_builder_rejects_duplicate_names() {
    let result = WorkflowDocument::builder("Dup")
        .add_node(Node::custom("a", "Same", "custom.a", Position(0, 0)))
        .add_node(Node::custom("b", "Same", "custom.b", Position(0, 0)))
        .build();
    assert_eq!(
        result.unwrap_err(),
        BuildError::DuplicateNodeName("Same".into())
    );
}

#[test]
fn test_builder_rejects_dangling_target() {
    let result = WorkflowDocument::builder("Dangling")
        .add_node(Node::custom("a", "A", "custom.a", Position(0, 0)))
        .connect("A", "Missing")
        .build();
    assert_eq!(
        result.unwrap_err(),
        BuildError::UnknownConnectionTarget {
            source: "A".into(),
            target: "Missing".into(),
        }
    );
}

#[test]
fn test_builder_rejects_dangling_source() {
    let result = WorkflowDocument::builder("Dangling")
        .add_node(Node::custom("a", "A", "custom.a", Position(0, 0)))
        .connect("Missing", "A")
        .build();
    assert_eq!(
        result.unwrap_err(),
        BuildError::UnknownConnectionSource("Missing".into())
    );
}

#[test]
fn test_connect_branch_pads_skipped_branches() {
    let doc = WorkflowDocument::builder("Branches")
        .add_node(Node::custom("a", "A", "custom.a", Position(0, 0)))
        .add_node(Node::custom("b", "B", "custom.b", Position(0, 0)))
        .connect_branch("A", 2, "B")
        .build()
        .unwrap();

    let ports = &doc.connections["A"];
    assert_eq!(ports.branch_count(), 3);
    assert!(ports.main[0].is_empty());
    assert!(ports.main[1].is_empty());
    assert_eq!(ports.main[2], vec![ConnectionTarget::main("B")]);
}

#[test]
fn test_document_node_lookup_by_display_name() {
    let doc = simple_document();
    assert!(doc.node("Merge").is_some());
    assert!(doc.node("merge").is_none()); // ids are not display names
}

#[test]
fn test_builder_defaults() {
    let doc = simple_document();
    assert!(doc.active);
    assert_eq!(doc.version_id, "1");
    assert!(doc.settings.is_empty());
}

#[test]
fn test_error_display() {
    let err = BuildError::UnknownConnectionTarget {
        source: "A".into(),
        target: "B".into(),
    };
    assert!(err.to_string().contains('A'));
    assert!(err.to_string().contains('B'));

    let err = BuildError::DuplicateNodeId("node-1".into());
    assert!(err.to_string().contains("node-1"));
}
