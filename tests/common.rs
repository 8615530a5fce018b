//! Common test utilities for building workflow documents and fixtures.
use kaifuku::prelude::*;
use kaifuku::workflow::{
    MergeMode, MergeParameters, Position, RespondParameters, WebhookParameters,
};

/// A minimal three-node document: webhook -> merge -> respond.
#[allow(dead_code)]
pub fn simple_document() -> WorkflowDocument {
    WorkflowDocument::builder("Test Workflow")
        .add_node(Node::new(
            "hook",
            "Hook",
            Position(100, 300),
            NodeParameters::Webhook(WebhookParameters::post("test-hook")),
        ))
        .add_node(Node::new(
            "merge",
            "Merge",
            Position(300, 300),
            NodeParameters::Merge(MergeParameters {
                mode: MergeMode::Append,
            }),
        ))
        .add_node(Node::new(
            "respond",
            "Respond",
            Position(500, 300),
            NodeParameters::RespondToWebhook(RespondParameters::json("={{ $json }}")),
        ))
        .connect("Hook", "Merge")
        .connect("Merge", "Respond")
        .build()
        .expect("simple document should build")
}

/// A hand-written workflow value with a dangling connection target.
#[allow(dead_code)]
pub fn dangling_target_workflow() -> serde_json::Value {
    serde_json::json!({
        "name": "Broken",
        "nodes": [
            {
                "parameters": { "path": "x", "httpMethod": "POST", "responseMode": "lastNode" },
                "id": "a",
                "name": "A",
                "type": "n8n-nodes-base.webhook",
                "typeVersion": 2,
                "position": [0, 0]
            }
        ],
        "connections": {
            "A": { "main": [[{ "node": "Ghost", "type": "main", "index": 0 }]] }
        },
        "active": false,
        "settings": {},
        "versionId": "1"
    })
}
