//! Fluent builder for workflow graphs
//!
//! Used by tests and by callers that materialize graphs
//! programmatically rather than from AI output.

use crate::types::{
    EdgeKind, GraphEdge, GraphNode, NodeKind, Position, WorkflowGraph, WorkflowStatus,
};

/// Fluent builder for constructing workflow graphs
///
/// # Example
///
/// ```
/// use flowcraft_graph_contracts::{NodeKind, WorkflowBuilder};
///
/// let graph = WorkflowBuilder::new("Notify on signup")
///     .add_node("t1", NodeKind::Trigger, (0.0, 0.0))
///     .with_label("New signup")
///     .add_node("a1", NodeKind::Action, (0.0, 380.0))
///     .with_label("Send welcome email")
///     .add_edge("t1", "a1")
///     .build();
///
/// assert_eq!(graph.nodes.len(), 2);
/// ```
pub struct WorkflowBuilder {
    name: String,
    description: String,
    status: WorkflowStatus,
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    edge_counter: usize,
}

impl WorkflowBuilder {
    /// Create a new workflow builder
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            status: WorkflowStatus::default(),
            nodes: Vec::new(),
            edges: Vec::new(),
            edge_counter: 0,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the status
    pub fn with_status(mut self, status: WorkflowStatus) -> Self {
        self.status = status;
        self
    }

    /// Add a node; its label defaults to the ID
    pub fn add_node(
        mut self,
        id: impl Into<String>,
        kind: NodeKind,
        position: (f64, f64),
    ) -> Self {
        let id = id.into();
        let mut node = GraphNode::new(id.clone(), kind, id);
        node.position = Position::new(position.0, position.1);
        self.nodes.push(node);
        self
    }

    /// Set the label on the most recently added node
    ///
    /// Must be called immediately after `add_node`.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        if let Some(node) = self.nodes.last_mut() {
            node.data.label = label.into();
        }
        self
    }

    /// Set the config on the most recently added node
    ///
    /// Must be called immediately after `add_node`.
    pub fn with_config(mut self, config: serde_json::Map<String, serde_json::Value>) -> Self {
        if let Some(node) = self.nodes.last_mut() {
            node.data.config = config;
        }
        self
    }

    /// Add an edge between two nodes (auto-generates edge ID)
    pub fn add_edge(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.edge_counter += 1;
        self.edges.push(GraphEdge::new(
            format!("edge-{}", self.edge_counter),
            source,
            target,
        ));
        self
    }

    /// Add an edge with an explicit ID and kind
    pub fn add_edge_with_id(
        mut self,
        edge_id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        kind: EdgeKind,
    ) -> Self {
        self.edges
            .push(GraphEdge::new(edge_id, source, target).with_kind(kind));
        self
    }

    /// Build the graph without validation
    pub fn build(self) -> WorkflowGraph {
        let mut graph = WorkflowGraph::new(self.name);
        graph.description = self.description;
        graph.status = self.status;
        graph.nodes = self.nodes;
        graph.edges = self.edges;
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_basic() {
        let graph = WorkflowBuilder::new("Test Workflow")
            .with_description("Two steps")
            .add_node("t1", NodeKind::Trigger, (0.0, 0.0))
            .with_label("Form submitted")
            .add_node("a1", NodeKind::Action, (0.0, 380.0))
            .add_edge("t1", "a1")
            .build();

        assert_eq!(graph.name, "Test Workflow");
        assert_eq!(graph.description, "Two steps");
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.nodes[0].data.label, "Form submitted");
        // Label defaults to the ID when not set explicitly.
        assert_eq!(graph.nodes[1].data.label, "a1");
    }

    #[test]
    fn test_builder_auto_edge_ids() {
        let graph = WorkflowBuilder::new("Test")
            .add_node("a", NodeKind::Trigger, (0.0, 0.0))
            .add_node("b", NodeKind::Action, (0.0, 380.0))
            .add_node("c", NodeKind::Action, (0.0, 760.0))
            .add_edge("a", "b")
            .add_edge("b", "c")
            .build();

        assert_eq!(graph.edges[0].id, "edge-1");
        assert_eq!(graph.edges[1].id, "edge-2");
    }

    #[test]
    fn test_builder_explicit_edge() {
        let graph = WorkflowBuilder::new("Test")
            .add_node("c1", NodeKind::Condition, (0.0, 0.0))
            .add_node("a1", NodeKind::Action, (0.0, 380.0))
            .add_edge_with_id("yes", "c1", "a1", EdgeKind::Conditional)
            .build();

        assert_eq!(graph.edges[0].id, "yes");
        assert_eq!(graph.edges[0].kind, EdgeKind::Conditional);
    }

    #[test]
    fn test_builder_with_config() {
        let mut config = serde_json::Map::new();
        config.insert("channel".to_string(), serde_json::json!("#alerts"));

        let graph = WorkflowBuilder::new("Test")
            .add_node("a1", NodeKind::Action, (0.0, 0.0))
            .with_config(config)
            .build();

        assert_eq!(graph.nodes[0].data.config["channel"], "#alerts");
    }
}
