//! Core types for FlowCraft workflow graphs
//!
//! These types define the structure of a workflow graph as the canvas
//! layer consumes it: nodes with kinds and positions, edges between
//! them, and graph-level metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a node
pub type NodeId = String;

/// Unique identifier for an edge
pub type EdgeId = String;

/// The kind of a workflow node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Entry point that starts the workflow (webhook, schedule, event)
    Trigger,
    /// Performs an operation against a service
    Action,
    /// Branches the flow on a predicate
    Condition,
    /// Reshapes data between steps
    Transform,
    /// Repeats a section of the flow
    Loop,
}

impl NodeKind {
    /// Whether this kind starts a workflow
    pub fn is_trigger(&self) -> bool {
        matches!(self, NodeKind::Trigger)
    }
}

/// The kind of an edge, which doubles as its routing hint on the canvas
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Plain connection
    #[default]
    Default,
    /// Connection guarded by a condition outcome
    Conditional,
    /// Connection rendered with smoothstep routing
    Smoothstep,
}

/// Lifecycle status of a workflow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    /// Being edited, not yet runnable
    #[default]
    Draft,
    /// Live and accepting triggers
    Active,
    /// Temporarily stopped by the user
    Paused,
    /// Stopped after a failure
    Error,
}

/// A point on the canvas
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Create a position from coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Node payload: what the node shows and how it is configured
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    /// Human-readable label shown on the node
    pub label: String,
    /// Longer description shown in the inspector
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Node-specific configuration, opaque to the engine
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub config: serde_json::Map<String, serde_json::Value>,
    /// Third-party service this node talks to (e.g. "slack")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    /// Operation on that service (e.g. "send_message")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
}

impl NodeData {
    /// Create node data with just a label
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }
}

/// A node instance in a workflow graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    /// Unique identifier for this node instance
    pub id: NodeId,
    /// What the node does
    pub kind: NodeKind,
    /// Top-left corner on the canvas
    #[serde(default)]
    pub position: Position,
    /// Label, description, and configuration
    pub data: NodeData,
}

impl GraphNode {
    /// Create a node with a label and a default position
    pub fn new(id: impl Into<String>, kind: NodeKind, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            position: Position::default(),
            data: NodeData::labeled(label),
        }
    }

    /// Set the position
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Position::new(x, y);
        self
    }
}

/// Edge payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeData {
    /// Predicate attached to a conditional edge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

/// An edge connecting two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    /// Unique identifier for this edge
    pub id: EdgeId,
    /// Source node ID
    pub source: NodeId,
    /// Target node ID
    pub target: NodeId,
    /// Routing/semantics kind
    #[serde(default)]
    pub kind: EdgeKind,
    /// Label drawn along the edge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Extra payload (condition text for conditional edges)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<EdgeData>,
}

impl GraphEdge {
    /// Create a default-kind edge
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            kind: EdgeKind::default(),
            label: None,
            data: None,
        }
    }

    /// Set the edge kind
    pub fn with_kind(mut self, kind: EdgeKind) -> Self {
        self.kind = kind;
        self
    }
}

/// A complete workflow graph
///
/// Node and edge order is preserved: the lists are append-ordered so the
/// canvas renders nodes in creation order and later batch deltas see the
/// effects of earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowGraph {
    /// Human-readable name
    pub name: String,
    /// What the workflow does, in prose
    #[serde(default)]
    pub description: String,
    /// Lifecycle status
    #[serde(default)]
    pub status: WorkflowStatus,
    /// Nodes in the graph
    pub nodes: Vec<GraphNode>,
    /// Edges connecting nodes
    pub edges: Vec<GraphEdge>,
    /// When the graph was last mutated
    pub updated_at: DateTime<Utc>,
}

impl WorkflowGraph {
    /// Create a new empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            status: WorkflowStatus::default(),
            nodes: Vec::new(),
            edges: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    /// Find a node by ID
    pub fn find_node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Find a node by ID (mutable)
    pub fn find_node_mut(&mut self, id: &str) -> Option<&mut GraphNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Find an edge by ID
    pub fn find_edge(&self, id: &str) -> Option<&GraphEdge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// Find an edge by ID (mutable)
    pub fn find_edge_mut(&mut self, id: &str) -> Option<&mut GraphEdge> {
        self.edges.iter_mut().find(|e| e.id == id)
    }

    /// Whether a node with this ID exists
    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    /// Whether an edge with this ID exists
    pub fn contains_edge(&self, id: &str) -> bool {
        self.edges.iter().any(|e| e.id == id)
    }

    /// Edges coming into a node
    pub fn incoming_edges<'a>(
        &'a self,
        node_id: &'a str,
    ) -> impl Iterator<Item = &'a GraphEdge> + 'a {
        self.edges.iter().filter(move |e| e.target == node_id)
    }

    /// Edges going out of a node
    pub fn outgoing_edges<'a>(
        &'a self,
        node_id: &'a str,
    ) -> impl Iterator<Item = &'a GraphEdge> + 'a {
        self.edges.iter().filter(move |e| e.source == node_id)
    }

    /// Remove a node and every edge touching it
    ///
    /// Returns the removed node and the number of cascaded edges, or
    /// `None` if the node does not exist (the graph is untouched).
    pub fn remove_node(&mut self, id: &str) -> Option<(GraphNode, usize)> {
        let pos = self.nodes.iter().position(|n| n.id == id)?;
        let node = self.nodes.remove(pos);
        let before = self.edges.len();
        self.edges.retain(|e| e.source != id && e.target != id);
        Some((node, before - self.edges.len()))
    }

    /// Remove an edge by ID
    pub fn remove_edge(&mut self, id: &str) -> Option<GraphEdge> {
        let pos = self.edges.iter().position(|e| e.id == id)?;
        Some(self.edges.remove(pos))
    }

    /// Stamp `updated_at` with the current time
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_node_graph() -> WorkflowGraph {
        let mut graph = WorkflowGraph::new("Test Graph");
        graph
            .nodes
            .push(GraphNode::new("t1", NodeKind::Trigger, "When form submitted"));
        graph
            .nodes
            .push(GraphNode::new("a1", NodeKind::Action, "Send email").at(0.0, 300.0));
        graph.edges.push(GraphEdge::new("e1", "t1", "a1"));
        graph
    }

    #[test]
    fn test_find_and_contains() {
        let graph = two_node_graph();
        assert!(graph.contains_node("t1"));
        assert!(!graph.contains_node("missing"));
        assert_eq!(graph.find_node("a1").unwrap().kind, NodeKind::Action);
        assert_eq!(graph.find_edge("e1").unwrap().source, "t1");
    }

    #[test]
    fn test_incoming_outgoing() {
        let graph = two_node_graph();
        assert_eq!(graph.outgoing_edges("t1").count(), 1);
        assert_eq!(graph.incoming_edges("t1").count(), 0);
        assert_eq!(graph.incoming_edges("a1").count(), 1);
    }

    #[test]
    fn test_remove_node_cascades() {
        let mut graph = two_node_graph();
        let (node, cascaded) = graph.remove_node("t1").unwrap();
        assert_eq!(node.id, "t1");
        assert_eq!(cascaded, 1);
        assert_eq!(graph.nodes.len(), 1);
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn test_remove_node_missing() {
        let mut graph = two_node_graph();
        assert!(graph.remove_node("nope").is_none());
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.edges.len(), 1);
    }

    #[test]
    fn test_remove_edge_only_touches_edge() {
        let mut graph = two_node_graph();
        let edge = graph.remove_edge("e1").unwrap();
        assert_eq!(edge.target, "a1");
        assert_eq!(graph.nodes.len(), 2);
    }

    #[test]
    fn test_serde_roundtrip_camel_case() {
        let graph = two_node_graph();
        let json = serde_json::to_value(&graph).unwrap();
        assert!(json.get("updatedAt").is_some());
        assert_eq!(json["nodes"][0]["kind"], "trigger");
        assert_eq!(json["edges"][0]["kind"], "default");

        let restored: WorkflowGraph = serde_json::from_value(json).unwrap();
        assert_eq!(restored.nodes.len(), 2);
        assert_eq!(restored.edges.len(), 1);
    }

    #[test]
    fn test_node_data_optional_fields_omitted() {
        let node = GraphNode::new("t1", NodeKind::Trigger, "Start");
        let json = serde_json::to_value(&node).unwrap();
        assert!(json["data"].get("description").is_none());
        assert!(json["data"].get("config").is_none());
        assert_eq!(json["data"]["label"], "Start");
    }
}
