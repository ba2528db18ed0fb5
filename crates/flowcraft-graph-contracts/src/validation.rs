//! Structural validation for workflow graphs
//!
//! Checks ID uniqueness and edge endpoint references. Cycles are legal
//! in this model (a loop node may feed back into an earlier step), so
//! there is deliberately no cycle check here.

use std::collections::HashSet;

use crate::types::WorkflowGraph;

/// Structural validation finding with location context
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Two or more nodes share an ID
    #[error("Duplicate node ID '{node_id}'")]
    DuplicateNodeId { node_id: String },
    /// Two or more edges share an ID
    #[error("Duplicate edge ID '{edge_id}'")]
    DuplicateEdgeId { edge_id: String },
    /// An edge references a node that is not in the graph
    #[error("Edge '{edge_id}' references unknown node '{node_id}'")]
    UnknownNode { edge_id: String, node_id: String },
}

/// Validate a workflow graph's structure
///
/// Returns all findings, not just the first, so a caller can report the
/// complete damage from one pass.
pub fn validate_graph(graph: &WorkflowGraph) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    validate_unique_node_ids(graph, &mut errors);
    validate_unique_edge_ids(graph, &mut errors);
    validate_edge_references(graph, &mut errors);

    errors
}

/// Report each node ID that appears more than once (once per duplicate ID)
fn validate_unique_node_ids(graph: &WorkflowGraph, errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for node in &graph.nodes {
        if !seen.insert(node.id.as_str()) && reported.insert(node.id.as_str()) {
            errors.push(ValidationError::DuplicateNodeId {
                node_id: node.id.clone(),
            });
        }
    }
}

/// Report each edge ID that appears more than once (once per duplicate ID)
fn validate_unique_edge_ids(graph: &WorkflowGraph, errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for edge in &graph.edges {
        if !seen.insert(edge.id.as_str()) && reported.insert(edge.id.as_str()) {
            errors.push(ValidationError::DuplicateEdgeId {
                edge_id: edge.id.clone(),
            });
        }
    }
}

/// Check that all edge source/target nodes exist
fn validate_edge_references(graph: &WorkflowGraph, errors: &mut Vec<ValidationError>) {
    let node_ids: HashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();

    for edge in &graph.edges {
        if !node_ids.contains(edge.source.as_str()) {
            errors.push(ValidationError::UnknownNode {
                edge_id: edge.id.clone(),
                node_id: edge.source.clone(),
            });
        }
        if !node_ids.contains(edge.target.as_str()) {
            errors.push(ValidationError::UnknownNode {
                edge_id: edge.id.clone(),
                node_id: edge.target.clone(),
            });
        }
    }
}
