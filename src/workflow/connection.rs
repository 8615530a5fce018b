use indexmap::IndexMap;
use serde::Serialize;

/// Port kind on a connection. n8n only defines `main` data ports today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PortKind {
    Main,
}

/// A directed reference to a target node's input port.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionTarget {
    /// Display name of the target node.
    pub node: String,
    #[serde(rename = "type")]
    pub kind: PortKind,
    /// Input port index on the target.
    pub index: u32,
}

impl ConnectionTarget {
    /// A target on the main input port 0, the common case.
    pub fn main(node: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            kind: PortKind::Main,
            index: 0,
        }
    }
}

/// Outbound edges of one source node, grouped by output branch.
///
/// The outer index of `main` is the output branch number: an if node has
/// branches 0 (true) and 1 (false), a switch one branch per rule. Each branch
/// may fan out to several targets.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OutboundPorts {
    pub main: Vec<Vec<ConnectionTarget>>,
}

impl OutboundPorts {
    /// Appends a target to the given branch, growing the branch list with
    /// empty branches as needed so indices stay aligned with the node's
    /// declared outputs.
    pub fn push_target(&mut self, branch: usize, target: ConnectionTarget) {
        while self.main.len() <= branch {
            self.main.push(Vec::new());
        }
        self.main[branch].push(target);
    }

    /// Number of output branches, including empty ones.
    pub fn branch_count(&self) -> usize {
        self.main.len()
    }
}

/// The connection mapping keyed by source node display name, in insertion
/// order.
pub type ConnectionMap = IndexMap<String, OutboundPorts>;
