//! End-to-end tests for the self-healing orchestrator generator.
mod common;
use kaifuku::prelude::*;
use kaifuku::workflow::{MergeMode, MergeParameters, NodeParameters};
use serde_json::Value;
use std::collections::HashSet;

const REMEDIATION_NODES: [&str; 5] = [
    "Model Failover",
    "Prompt Rollback",
    "Service Restart",
    "Throttle Requests",
    "Alert Only",
];

fn default_document() -> WorkflowDocument {
    self_healing_workflow(&OrchestratorOptions::default()).expect("orchestrator should build")
}

#[test]
fn test_document_shape() {
    let doc = default_document();
    assert_eq!(doc.name, "SBQC - N4.4 Self-Healing Orchestrator");
    assert_eq!(doc.nodes.len(), 13);
    assert!(doc.active);
    assert_eq!(doc.version_id, "1");
    assert!(doc.settings.is_empty());
}

#[test]
fn test_node_ids_are_unique() {
    let doc = default_document();
    let ids: HashSet<_> = doc.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids.len(), doc.nodes.len());
}

#[test]
fn test_every_connection_references_existing_nodes() {
    let doc = default_document();
    let names: HashSet<_> = doc.nodes.iter().map(|n| n.name.as_str()).collect();

    for (source, ports) in &doc.connections {
        assert!(names.contains(source.as_str()), "dangling source {source}");
        for branch in &ports.main {
            for target in branch {
                assert!(
                    names.contains(target.node.as_str()),
                    "dangling target {} from {}",
                    target.node,
                    source
                );
            }
        }
    }
}

#[test]
fn test_approval_gate_has_two_branches() {
    let doc = default_document();
    let gate = &doc.connections["Approval Required?"];
    assert_eq!(gate.branch_count(), 2);
    assert_eq!(
        gate.main[0],
        vec![ConnectionTarget::main("Request Approval (Slack)")]
    );
    assert_eq!(gate.main[1], vec![ConnectionTarget::main("Route Action")]);
}

#[test]
fn test_router_has_five_branches_in_action_order() {
    let doc = default_document();
    let router = &doc.connections["Route Action"];
    assert_eq!(router.branch_count(), 5);
    for (branch, expected) in router.main.iter().zip(REMEDIATION_NODES) {
        assert_eq!(branch, &vec![ConnectionTarget::main(expected)]);
    }

    // The switch rules carry the action literals in the same branch order.
    let route_node = doc.node("Route Action").unwrap();
    let NodeParameters::Switch(params) = &route_node.parameters else {
        panic!("Route Action should be a switch node");
    };
    let values: Vec<_> = params.rules.rules.iter().map(|r| r.value.as_str()).collect();
    assert_eq!(values, actions::ALL);
    for (i, rule) in params.rules.rules.iter().enumerate() {
        assert_eq!(rule.output, i as u32);
    }
}

#[test]
fn test_all_remediations_converge_on_merge() {
    let doc = default_document();
    let fan_in = REMEDIATION_NODES
        .iter()
        .filter(|name| {
            doc.connections[**name].main[0]
                .iter()
                .any(|t| t.node == "Merge Results")
        })
        .count();
    assert_eq!(fan_in, 5);

    let merge = doc.node("Merge Results").unwrap();
    assert_eq!(
        merge.parameters,
        NodeParameters::Merge(MergeParameters {
            mode: MergeMode::Append
        })
    );
}

#[test]
fn test_tail_of_the_pipeline() {
    let doc = default_document();
    assert_eq!(
        doc.connections["Merge Results"].main[0],
        vec![ConnectionTarget::main("Update Status")]
    );
    assert_eq!(
        doc.connections["Update Status"].main[0],
        vec![ConnectionTarget::main("Respond to Webhook")]
    );
    // The respond node is terminal.
    assert!(!doc.connections.contains_key("Respond to Webhook"));
}

#[test]
fn test_restart_action_targets_restart_endpoint() {
    let doc = default_document();
    let router = doc.node("Route Action").unwrap();
    let NodeParameters::Switch(params) = &router.parameters else {
        panic!("Route Action should be a switch node");
    };
    let rule = params
        .rules
        .rules
        .iter()
        .find(|r| r.value == actions::PM2_RESTART_AGENTX)
        .unwrap();

    let target = &doc.connections["Route Action"].main[rule.output as usize][0];
    let node = doc.node(&target.node).unwrap();
    let NodeParameters::HttpRequest(request) = &node.parameters else {
        panic!("remediation should be an HTTP request node");
    };
    assert_eq!(request.url, "http://localhost:3080/api/system/restart");
}

#[test]
fn test_serialization_round_trip() {
    let doc = default_document();
    let json = doc.to_json_pretty().unwrap();
    let parsed: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, doc.to_value().unwrap());
}

#[test]
fn test_serialized_type_versions_match_engine_expectations() {
    let json = default_document().to_json_pretty().unwrap();
    // Fractionless versions serialize as integers, fractional ones keep the
    // fraction; the engine is picky about both.
    assert!(json.contains("\"typeVersion\": 2,"));
    assert!(json.contains("\"typeVersion\": 3.4"));
    assert!(json.contains("\"typeVersion\": 2.1"));
    assert!(json.contains("\"typeVersion\": 4.2"));
    assert!(json.contains("\"typeVersion\": 1.1"));
    assert!(!json.contains("\"typeVersion\": 2.0"));
}

#[test]
fn test_generated_document_validates_cleanly() {
    let doc = default_document();
    let report = validate(&doc.to_value().unwrap());
    assert!(report.is_valid(), "unexpected errors: {:?}", report.issues);
    assert_eq!(report.score(), 100);
    assert_eq!(report.stats.total_nodes, 13);
    assert_eq!(
        report.stats.trigger_nodes,
        vec!["Webhook Trigger".to_string()]
    );
    assert!(report.stats.orphaned_nodes.is_empty());
}

#[test]
fn test_options_substitute_deployment_literals() {
    let options = OrchestratorOptions {
        base_url: "https://ops.example".to_string(),
        credential_id: "ops-key".to_string(),
        webhook_path: "ops-trigger".to_string(),
        name: "Ops Healing".to_string(),
        ..OrchestratorOptions::default()
    };
    let doc = self_healing_workflow(&options).unwrap();

    assert_eq!(doc.name, "Ops Healing");

    let restart = doc.node("Service Restart").unwrap();
    let NodeParameters::HttpRequest(request) = &restart.parameters else {
        panic!("Service Restart should be an HTTP request node");
    };
    assert_eq!(request.url, "https://ops.example/api/system/restart");
    assert_eq!(request.credential_id.as_deref(), Some("ops-key"));

    let hook = doc.node("Webhook Trigger").unwrap();
    let NodeParameters::Webhook(params) = &hook.parameters else {
        panic!("Webhook Trigger should be a webhook node");
    };
    assert_eq!(params.path, "ops-trigger");
}

#[test]
fn test_graph_rendering_of_generated_document() {
    let doc = default_document();
    let graph = render_graph(&doc.to_value().unwrap());
    assert!(graph.contains("[trigger] Webhook Trigger (webhook)"));
    for name in REMEDIATION_NODES {
        assert!(graph.contains(name), "graph missing {name}");
    }
    assert!(!graph.contains("orphaned"));
}
