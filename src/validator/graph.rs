use super::TRIGGER_TYPES;
use ahash::AHashMap;
use itertools::Itertools;
use serde_json::Value;

/// Renders a plain-text view of the workflow graph: one entry per node in
/// document order, its outgoing edges indented below it, with triggers and
/// orphaned nodes marked.
pub fn render_graph(workflow: &Value) -> String {
    let (Some(nodes), Some(connections)) = (
        workflow.get("nodes").and_then(Value::as_array),
        workflow.get("connections").and_then(Value::as_object),
    ) else {
        return "Unable to generate graph: missing nodes or connections".to_string();
    };

    // Outgoing and incoming adjacency by display name.
    let mut outgoing: AHashMap<&str, Vec<&str>> = AHashMap::new();
    let mut incoming: AHashMap<&str, Vec<&str>> = AHashMap::new();
    for (source, ports) in connections {
        let branches = ports
            .as_object()
            .into_iter()
            .flat_map(|p| p.values())
            .filter_map(Value::as_array)
            .flatten()
            .filter_map(Value::as_array)
            .flatten();
        for target in branches {
            if let Some(target_name) = target.get("node").and_then(Value::as_str) {
                outgoing.entry(source.as_str()).or_default().push(target_name);
                incoming.entry(target_name).or_default().push(source.as_str());
            }
        }
    }

    let mut lines = Vec::new();
    lines.push(String::new());
    lines.push("Workflow Graph:".to_string());
    lines.push("=".repeat(60));
    lines.push(String::new());
    lines.push("Nodes:".to_string());

    for node in nodes {
        let name = node.get("name").and_then(Value::as_str).unwrap_or("?");
        let node_type = node.get("type").and_then(Value::as_str).unwrap_or("");
        let is_trigger = TRIGGER_TYPES.contains(&node_type);
        let type_short = node_type.rsplit('.').next().unwrap_or("unknown");
        let marker = if is_trigger { "[trigger]" } else { "[node]" };
        lines.push(format!("  {marker} {name} ({type_short})"));

        for target in outgoing.get(name).into_iter().flatten() {
            lines.push(format!("    -> {target}"));
        }
        if !is_trigger && !incoming.contains_key(name) {
            lines.push("    !! orphaned (no incoming connections)".to_string());
        }
    }

    lines.push(String::new());
    lines.push("Legend: [trigger] = entry point, -> = connection".to_string());
    lines.push("=".repeat(60));
    lines.push(String::new());

    lines.iter().join("\n")
}
