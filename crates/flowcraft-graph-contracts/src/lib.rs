//! Canonical workflow graph types for FlowCraft
//!
//! This crate defines the shared vocabulary of the FlowCraft engine:
//! nodes, edges, the workflow graph that owns them, and the structural
//! rules they obey. It is a leaf crate with no knowledge of how graphs
//! are edited (delta-engine) or drawn (layout-engine).
//!
//! Structural invariants enforced across the workspace:
//!
//! - Node IDs are pairwise unique, edge IDs are pairwise unique
//! - Every edge's `source`/`target` resolves to a node in the same graph
//! - Cycles are permitted (workflows may loop back on themselves)

pub mod builder;
pub mod ids;
pub mod types;
pub mod validation;

// Re-export key types
pub use builder::WorkflowBuilder;
pub use ids::{disambiguate, IdGenerator, SequentialIdGenerator, UuidIdGenerator};
pub use types::{
    EdgeData, EdgeId, EdgeKind, GraphEdge, GraphNode, NodeData, NodeId, NodeKind, Position,
    WorkflowGraph, WorkflowStatus,
};
pub use validation::{validate_graph, ValidationError};
