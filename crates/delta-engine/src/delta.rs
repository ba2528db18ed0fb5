//! Structured graph-edit instructions
//!
//! The wire shape matches what the AI layer emits: a `type` tag with
//! snake_case delta kinds and camelCase payload fields. Patches carry
//! only the fields to change; absent fields keep their prior values.

use flowcraft_graph_contracts::{
    EdgeData, EdgeId, EdgeKind, GraphEdge, GraphNode, NodeData, NodeId, NodeKind, Position,
    WorkflowGraph, WorkflowStatus,
};
use serde::{Deserialize, Serialize};

/// A single structured edit to a workflow graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum WorkflowDelta {
    /// Append a node to the graph
    AddNode { node: GraphNode },
    /// Merge updates into an existing node
    ModifyNode { node_id: NodeId, updates: NodePatch },
    /// Remove a node, cascading to its incident edges
    RemoveNode { node_id: NodeId },
    /// Connect two existing nodes
    AddEdge { edge: GraphEdge },
    /// Merge updates into an existing edge
    ModifyEdge { edge_id: EdgeId, updates: EdgePatch },
    /// Remove a single edge
    RemoveEdge { edge_id: EdgeId },
    /// Overwrite graph-level metadata fields
    UpdateMetadata { updates: MetadataPatch },
}

/// Partial update for a node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<NodeKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<NodeDataPatch>,
}

impl NodePatch {
    /// Merge this patch into a node
    pub fn apply_to(&self, node: &mut GraphNode) {
        if let Some(kind) = self.kind {
            node.kind = kind;
        }
        if let Some(position) = self.position {
            node.position = position;
        }
        if let Some(data) = &self.data {
            data.apply_to(&mut node.data);
        }
    }
}

/// Partial update for a node's data
///
/// Merged field-by-field so a label change does not erase an unrelated
/// config; a supplied `config` map replaces the previous one wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDataPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
}

impl NodeDataPatch {
    /// Merge this patch into node data
    pub fn apply_to(&self, data: &mut NodeData) {
        if let Some(label) = &self.label {
            data.label = label.clone();
        }
        if let Some(description) = &self.description {
            data.description = Some(description.clone());
        }
        if let Some(config) = &self.config {
            data.config = config.clone();
        }
        if let Some(service) = &self.service {
            data.service = Some(service.clone());
        }
        if let Some(operation) = &self.operation {
            data.operation = Some(operation.clone());
        }
    }
}

/// Partial update for an edge
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<EdgeKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<EdgeData>,
}

impl EdgePatch {
    /// Merge this patch into an edge
    pub fn apply_to(&self, edge: &mut GraphEdge) {
        if let Some(source) = &self.source {
            edge.source = source.clone();
        }
        if let Some(target) = &self.target {
            edge.target = target.clone();
        }
        if let Some(kind) = self.kind {
            edge.kind = kind;
        }
        if let Some(label) = &self.label {
            edge.label = Some(label.clone());
        }
        if let Some(data) = &self.data {
            edge.data = Some(data.clone());
        }
    }
}

/// Partial update for graph-level metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<WorkflowStatus>,
}

impl MetadataPatch {
    /// Overwrite only the supplied fields
    pub fn apply_to(&self, graph: &mut WorkflowGraph) {
        if let Some(name) = &self.name {
            graph.name = name.clone();
        }
        if let Some(description) = &self.description {
            graph.description = description.clone();
        }
        if let Some(status) = self.status {
            graph.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_wire_shape() {
        let json = serde_json::json!({
            "type": "add_node",
            "node": {
                "id": "t1",
                "kind": "trigger",
                "data": {"label": "On schedule"}
            }
        });
        let delta: WorkflowDelta = serde_json::from_value(json).unwrap();
        assert!(matches!(delta, WorkflowDelta::AddNode { ref node } if node.id == "t1"));
    }

    #[test]
    fn test_modify_node_camel_case_fields() {
        let json = serde_json::json!({
            "type": "modify_node",
            "nodeId": "a1",
            "updates": {"data": {"label": "Renamed"}}
        });
        let delta: WorkflowDelta = serde_json::from_value(json).unwrap();
        let WorkflowDelta::ModifyNode { node_id, updates } = delta else {
            panic!("wrong variant");
        };
        assert_eq!(node_id, "a1");
        assert_eq!(updates.data.unwrap().label.as_deref(), Some("Renamed"));
    }

    #[test]
    fn test_unknown_kind_fails_to_parse() {
        let json = serde_json::json!({"type": "explode_node", "nodeId": "a1"});
        assert!(serde_json::from_value::<WorkflowDelta>(json).is_err());
    }

    #[test]
    fn test_missing_required_field_fails_to_parse() {
        let json = serde_json::json!({"type": "remove_node"});
        assert!(serde_json::from_value::<WorkflowDelta>(json).is_err());
    }

    #[test]
    fn test_node_data_patch_merges() {
        let mut data = NodeData::labeled("Old");
        data.description = Some("Keep me".to_string());
        data.config
            .insert("channel".to_string(), serde_json::json!("#ops"));

        let patch = NodeDataPatch {
            label: Some("New".to_string()),
            ..NodeDataPatch::default()
        };
        patch.apply_to(&mut data);

        assert_eq!(data.label, "New");
        assert_eq!(data.description.as_deref(), Some("Keep me"));
        assert_eq!(data.config["channel"], "#ops");
    }

    #[test]
    fn test_config_replaced_wholesale() {
        let mut data = NodeData::labeled("n");
        data.config.insert("a".to_string(), serde_json::json!(1));

        let mut new_config = serde_json::Map::new();
        new_config.insert("b".to_string(), serde_json::json!(2));
        let patch = NodeDataPatch {
            config: Some(new_config),
            ..NodeDataPatch::default()
        };
        patch.apply_to(&mut data);

        assert!(data.config.get("a").is_none());
        assert_eq!(data.config["b"], 2);
    }

    #[test]
    fn test_metadata_patch_partial() {
        let mut graph = WorkflowGraph::new("Original");
        graph.description = "Stays".to_string();

        MetadataPatch {
            name: Some("Renamed".to_string()),
            ..MetadataPatch::default()
        }
        .apply_to(&mut graph);

        assert_eq!(graph.name, "Renamed");
        assert_eq!(graph.description, "Stays");
        assert_eq!(graph.status, WorkflowStatus::Draft);
    }
}
