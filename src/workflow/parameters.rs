use crate::workflow::node::NodeType;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Node parameters as a tagged union keyed by node type.
///
/// Each variant declares the parameter schema of one n8n node type, so a
/// malformed parameter block is rejected by the compiler at construction time
/// instead of surfacing when the engine tries to load the document. The
/// serialized form is only the inner parameter object; the node type tag is
/// carried by the [`Node`](crate::workflow::Node) itself.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeParameters {
    Webhook(WebhookParameters),
    Set(SetParameters),
    If(IfParameters),
    Switch(SwitchParameters),
    HttpRequest(HttpRequestParameters),
    Merge(MergeParameters),
    RespondToWebhook(RespondParameters),
    /// Escape hatch for node types without a dedicated schema. Carries the
    /// raw type tag and a free-form parameter mapping (empty by default).
    Custom {
        type_tag: String,
        values: IndexMap<String, Value>,
    },
}

impl NodeParameters {
    /// The node type tag this parameter block belongs to.
    pub fn node_type(&self) -> NodeType {
        match self {
            Self::Webhook(_) => NodeType::Webhook,
            Self::Set(_) => NodeType::Set,
            Self::If(_) => NodeType::If,
            Self::Switch(_) => NodeType::Switch,
            Self::HttpRequest(_) => NodeType::HttpRequest,
            Self::Merge(_) => NodeType::Merge,
            Self::RespondToWebhook(_) => NodeType::RespondToWebhook,
            Self::Custom { type_tag, .. } => NodeType::Other(type_tag.clone()),
        }
    }

    /// The current typeVersion of the matching n8n node implementation.
    pub fn default_type_version(&self) -> f64 {
        match self {
            Self::Webhook(_) => 2.0,
            Self::Set(_) => 3.4,
            Self::If(_) => 2.1,
            Self::Switch(_) => 3.0,
            Self::HttpRequest(_) => 4.2,
            Self::Merge(_) => 3.0,
            Self::RespondToWebhook(_) => 1.1,
            Self::Custom { .. } => 1.0,
        }
    }

    /// An empty parameter mapping for the given raw node type tag.
    pub fn custom(type_tag: impl Into<String>) -> Self {
        Self::Custom {
            type_tag: type_tag.into(),
            values: IndexMap::new(),
        }
    }
}

// The union serializes transparently as its payload; the document keeps its
// type tag in the node's `type` field, matching the n8n wire format.
impl Serialize for NodeParameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Webhook(p) => p.serialize(serializer),
            Self::Set(p) => p.serialize(serializer),
            Self::If(p) => p.serialize(serializer),
            Self::Switch(p) => p.serialize(serializer),
            Self::HttpRequest(p) => p.serialize(serializer),
            Self::Merge(p) => p.serialize(serializer),
            Self::RespondToWebhook(p) => p.serialize(serializer),
            Self::Custom { values, .. } => values.serialize(serializer),
        }
    }
}

/// HTTP methods accepted by webhook and HTTP-request nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

/// How a webhook node answers the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ResponseMode {
    OnReceived,
    LastNode,
    ResponseNode,
}

/// Parameters of an `n8n-nodes-base.webhook` trigger node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookParameters {
    pub path: String,
    pub options: IndexMap<String, Value>,
    pub http_method: HttpMethod,
    pub response_mode: ResponseMode,
}

impl WebhookParameters {
    /// A POST webhook that defers its response to a respond-to-webhook node.
    pub fn post(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            options: IndexMap::new(),
            http_method: HttpMethod::Post,
            response_mode: ResponseMode::ResponseNode,
        }
    }
}

/// Value type of a single assignment in a set node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentType {
    String,
    Number,
    Boolean,
    Object,
}

/// One field assignment performed by a set node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub name: String,
    pub value: Value,
    #[serde(rename = "type")]
    pub value_type: AssignmentType,
}

impl Assignment {
    /// An assignment whose value is an n8n `={{ ... }}` expression.
    pub fn expression(
        name: impl Into<String>,
        expr: impl Into<String>,
        value_type: AssignmentType,
    ) -> Self {
        Self {
            name: name.into(),
            value: Value::String(expr.into()),
            value_type,
        }
    }
}

/// Parameters of an `n8n-nodes-base.set` (assignments) node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetParameters {
    pub assignments: AssignmentSet,
}

/// The nested assignment collection as n8n expects it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentSet {
    pub assignments: Vec<Assignment>,
}

impl SetParameters {
    pub fn new(assignments: Vec<Assignment>) -> Self {
        Self {
            assignments: AssignmentSet { assignments },
        }
    }
}

/// Operator applied by an if-node condition, e.g. `boolean`/`true`.
///
/// The operator vocabulary belongs to the engine and is open-ended, so both
/// halves stay strings; helpers cover the combinations this crate emits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionOperator {
    #[serde(rename = "type")]
    pub value_type: String,
    pub operation: String,
}

impl ConditionOperator {
    /// `boolean`/`true`: the condition passes when the left value is true.
    pub fn boolean_true() -> Self {
        Self {
            value_type: "boolean".to_string(),
            operation: "true".to_string(),
        }
    }
}

/// One condition evaluated by an if node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub left_value: Value,
    pub right_value: Value,
    pub operator: ConditionOperator,
}

/// Parameters of an `n8n-nodes-base.if` node. Branch 0 is the true output,
/// branch 1 the false output; branch order is fixed at construction time and
/// only interpreted by the engine at run time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfParameters {
    pub conditions: ConditionSet,
}

/// The nested condition collection as n8n expects it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionSet {
    pub conditions: Vec<Condition>,
}

impl IfParameters {
    /// A single-condition gate testing whether `expr` evaluates to true.
    pub fn boolean_gate(expr: impl Into<String>) -> Self {
        Self {
            conditions: ConditionSet {
                conditions: vec![Condition {
                    left_value: Value::String(expr.into()),
                    right_value: Value::Bool(true),
                    operator: ConditionOperator::boolean_true(),
                }],
            },
        }
    }
}

/// Data type a switch node compares against its rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchDataType {
    String,
    Number,
    Boolean,
}

/// One value-to-output rule of a switch node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchRule {
    pub value: String,
    pub output: u32,
}

/// Parameters of an `n8n-nodes-base.switch` node routing on a string value.
///
/// No fallback output is declared; a value matching none of the rules is left
/// to the engine's default handling.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchParameters {
    pub rules: RuleSet,
    pub data_type: SwitchDataType,
    pub value1: String,
}

/// The nested rule collection as n8n expects it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleSet {
    pub rules: Vec<SwitchRule>,
}

impl SwitchParameters {
    /// A string switch over `expr` with one output per listed value, numbered
    /// in order starting at 0.
    pub fn on_string(expr: impl Into<String>, values: &[&str]) -> Self {
        Self {
            rules: RuleSet {
                rules: values
                    .iter()
                    .enumerate()
                    .map(|(output, value)| SwitchRule {
                        value: (*value).to_string(),
                        output: output as u32,
                    })
                    .collect(),
            },
            data_type: SwitchDataType::String,
            value1: expr.into(),
        }
    }
}

/// Credential handling of an HTTP-request node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Authentication {
    None,
    PredefinedCredentialType,
}

/// Parameters of an `n8n-nodes-base.httpRequest` node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRequestParameters {
    pub url: String,
    pub method: HttpMethod,
    pub authentication: Authentication,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_credential_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_id: Option<String>,
    pub body: Value,
}

impl HttpRequestParameters {
    /// An unauthenticated POST with a JSON body.
    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::Post,
            authentication: Authentication::None,
            node_credential_type: None,
            credential_id: None,
            body,
        }
    }

    /// Switches the request to a stored header-auth credential.
    pub fn with_header_auth(mut self, credential_id: impl Into<String>) -> Self {
        self.authentication = Authentication::PredefinedCredentialType;
        self.node_credential_type = Some("httpHeaderAuth".to_string());
        self.credential_id = Some(credential_id.into());
        self
    }
}

/// Fan-in behavior of a merge node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MergeMode {
    /// Concatenate whatever arrived on any input branch.
    Append,
    Combine,
    ChooseBranch,
}

/// Parameters of an `n8n-nodes-base.merge` node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeParameters {
    pub mode: MergeMode,
}

/// What a respond-to-webhook node sends back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RespondWith {
    Json,
    Text,
    FirstIncomingItem,
}

/// Parameters of an `n8n-nodes-base.respondToWebhook` node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondParameters {
    pub respond_with: RespondWith,
    pub response_body: String,
}

impl RespondParameters {
    /// Respond with a JSON body built from the given expression.
    pub fn json(response_body: impl Into<String>) -> Self {
        Self {
            respond_with: RespondWith::Json,
            response_body: response_body.into(),
        }
    }
}
