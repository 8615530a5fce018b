//! The self-healing orchestrator workflow.
//!
//! Assembles the fixed thirteen-node topology: webhook trigger →
//! extract/validate → approval gate → {approval notification | action
//! router} → one of five remediation calls → merge → status update →
//! webhook response. The shape is hard-coded; [`OrchestratorOptions`] only
//! substitutes the deployment-specific literals (endpoints, credential,
//! webhook path).

use crate::error::BuildError;
use crate::workflow::{
    Assignment, AssignmentType, HttpRequestParameters, IfParameters, MergeMode, MergeParameters,
    Node, NodeParameters, Position, RespondParameters, SetParameters, SwitchParameters,
    WebhookParameters, WorkflowDocument,
};
use serde_json::json;

/// Remediation action names the router matches on, in output-branch order.
pub mod actions {
    pub const SWITCH_TO_BACKUP_HOST: &str = "switch_to_backup_host";
    pub const ROLLBACK_TO_PREVIOUS_VERSION: &str = "rollback_to_previous_version";
    pub const PM2_RESTART_AGENTX: &str = "pm2_restart_agentx";
    pub const ENABLE_RATE_LIMITING: &str = "enable_rate_limiting";
    pub const SEND_ALERT: &str = "send_alert";

    /// All action names in router branch order (branches 0 through 4).
    pub const ALL: [&str; 5] = [
        SWITCH_TO_BACKUP_HOST,
        ROLLBACK_TO_PREVIOUS_VERSION,
        PM2_RESTART_AGENTX,
        ENABLE_RATE_LIMITING,
        SEND_ALERT,
    ];
}

/// Deployment-specific values substituted into the orchestrator document.
///
/// Defaults reproduce the canonical deployment verbatim.
#[derive(Debug, Clone)]
pub struct OrchestratorOptions {
    /// Display name of the workflow.
    pub name: String,
    /// Webhook path the incident reports arrive on.
    pub webhook_path: String,
    /// Base URL of the service exposing the remediation endpoints.
    pub base_url: String,
    /// Stored header-auth credential id used by every remediation call.
    pub credential_id: String,
    /// URL (or engine expression) the approval notification is posted to.
    pub approval_webhook_url: String,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            name: "SBQC - N4.4 Self-Healing Orchestrator".to_string(),
            webhook_path: "sbqc-n4-4-self-healing-trigger".to_string(),
            base_url: "http://localhost:3080".to_string(),
            credential_id: "agentx-api-key".to_string(),
            approval_webhook_url: "={{$env.SLACK_WEBHOOK_URL}}".to_string(),
        }
    }
}

impl OrchestratorOptions {
    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Builds the self-healing orchestrator document.
///
/// The topology is fixed: the approval gate's branch 0 (true) leads to the
/// approval notification and branch 1 (false) to the action router; the
/// router's branches 0-4 map to the five remediation calls in
/// [`actions::ALL`] order; all five converge on the append-mode merge node.
pub fn self_healing_workflow(options: &OrchestratorOptions) -> Result<WorkflowDocument, BuildError> {
    let remediation = |url_path: &str, body: serde_json::Value| {
        NodeParameters::HttpRequest(
            HttpRequestParameters::post(options.endpoint(url_path), body)
                .with_header_auth(&options.credential_id),
        )
    };

    WorkflowDocument::builder(&options.name)
        .add_node(Node::new(
            "webhook-trigger",
            "Webhook Trigger",
            Position(100, 300),
            NodeParameters::Webhook(WebhookParameters::post(&options.webhook_path)),
        ))
        .add_node(Node::new(
            "extract-data",
            "Extract & Validate",
            Position(300, 300),
            NodeParameters::Set(SetParameters::new(vec![
                Assignment::expression(
                    "ruleName",
                    "={{ $json.body.ruleName }}",
                    AssignmentType::String,
                ),
                Assignment::expression(
                    "component",
                    "={{ $json.body.component }}",
                    AssignmentType::String,
                ),
                Assignment::expression(
                    "action",
                    "={{ $json.body.remediationAction }}",
                    AssignmentType::String,
                ),
                Assignment::expression(
                    "requiresApproval",
                    "={{ $json.body.requiresApproval }}",
                    AssignmentType::Boolean,
                ),
                Assignment::expression(
                    "detectedIssue",
                    "={{ $json.body.detectedIssue }}",
                    AssignmentType::Object,
                ),
                Assignment::expression("startTime", "={{ $now }}", AssignmentType::String),
            ])),
        ))
        .add_node(Node::new(
            "check-approval",
            "Approval Required?",
            Position(500, 300),
            NodeParameters::If(IfParameters::boolean_gate("={{ $json.requiresApproval }}")),
        ))
        .add_node(Node::new(
            "request-approval",
            "Request Approval (Slack)",
            Position(700, 100),
            NodeParameters::HttpRequest(HttpRequestParameters::post(
                &options.approval_webhook_url,
                json!({
                    "text": "Approval required for self-healing action: {{$json.action}} on {{$json.component}}"
                }),
            )),
        ))
        .add_node(Node::new(
            "route-action",
            "Route Action",
            Position(700, 500),
            NodeParameters::Switch(SwitchParameters::on_string(
                "={{ $json.action }}",
                &actions::ALL,
            )),
        ))
        .add_node(Node::new(
            "action-failover",
            "Model Failover",
            Position(1000, 300),
            remediation(
                "/api/models/failover",
                json!({ "component": "={{ $json.component }}" }),
            ),
        ))
        .add_node(Node::new(
            "action-rollback",
            "Prompt Rollback",
            Position(1000, 450),
            remediation(
                "/api/prompts/rollback",
                json!({ "component": "={{ $json.component }}" }),
            ),
        ))
        .add_node(Node::new(
            "action-restart",
            "Service Restart",
            Position(1000, 600),
            remediation("/api/system/restart", json!({ "service": "agentx" })),
        ))
        .add_node(Node::new(
            "action-throttle",
            "Throttle Requests",
            Position(1000, 750),
            remediation("/api/system/throttle", json!({ "enabled": true })),
        ))
        .add_node(Node::new(
            "action-alert",
            "Alert Only",
            Position(1000, 900),
            remediation(
                "/api/alerts",
                json!({
                    "title": "Self-Healing Alert",
                    "message": "Rule triggered: {{$json.ruleName}}",
                    "severity": "warning",
                    "source": "self-healing-workflow",
                    "context": { "component": "={{$json.component}}" }
                }),
            ),
        ))
        .add_node(Node::new(
            "merge-results",
            "Merge Results",
            Position(1300, 500),
            NodeParameters::Merge(MergeParameters {
                mode: MergeMode::Append,
            }),
        ))
        .add_node(Node::new(
            "update-status",
            "Update Status",
            Position(1500, 500),
            remediation(
                "/api/self-healing/executions",
                json!({
                    "ruleName": "={{ $json.ruleName }}",
                    "action": "={{ $json.action }}",
                    "status": "success",
                    "startTime": "={{ $json.startTime }}",
                    "endTime": "={{ $now }}"
                }),
            ),
        ))
        .add_node(Node::new(
            "respond-webhook",
            "Respond to Webhook",
            Position(1700, 500),
            NodeParameters::RespondToWebhook(RespondParameters::json(
                "={{ JSON.stringify({ status: 'success', result: $json }) }}",
            )),
        ))
        .connect("Webhook Trigger", "Extract & Validate")
        .connect("Extract & Validate", "Approval Required?")
        // Gate branch 0 = approval required, branch 1 = straight to routing.
        .connect_branch("Approval Required?", 0, "Request Approval (Slack)")
        .connect_branch("Approval Required?", 1, "Route Action")
        .connect_branch("Route Action", 0, "Model Failover")
        .connect_branch("Route Action", 1, "Prompt Rollback")
        .connect_branch("Route Action", 2, "Service Restart")
        .connect_branch("Route Action", 3, "Throttle Requests")
        .connect_branch("Route Action", 4, "Alert Only")
        .connect("Model Failover", "Merge Results")
        .connect("Prompt Rollback", "Merge Results")
        .connect("Service Restart", "Merge Results")
        .connect("Throttle Requests", "Merge Results")
        .connect("Alert Only", "Merge Results")
        .connect("Merge Results", "Update Status")
        .connect("Update Status", "Respond to Webhook")
        .build()
}
