//! Workflow delta application for FlowCraft
//!
//! The AI discovery layer describes workflow edits as a batch of
//! structured deltas. This crate applies such a batch to a workflow
//! graph while holding the structural invariants: unique IDs, edges
//! that always resolve to live nodes, cascaded edge removal.
//!
//! Batches are best-effort, not transactional: each delta commits or is
//! individually rejected, one failure never rolls back earlier
//! successes, and later deltas see the effects of earlier ones. The
//! caller reads the outcome from the returned [`ApplyReport`]; the
//! public entry points never panic on malformed input.
//!
//! # Example
//!
//! ```
//! use delta_engine::{ApplyOptions, DeltaApplier, WorkflowDelta};
//! use flowcraft_graph_contracts::{GraphNode, NodeKind, WorkflowGraph};
//!
//! let graph = WorkflowGraph::new("Empty");
//! let deltas = vec![WorkflowDelta::AddNode {
//!     node: GraphNode::new("t1", NodeKind::Trigger, "On form submit"),
//! }];
//!
//! let mut applier = DeltaApplier::new();
//! let report = applier.apply(&graph, &deltas, &ApplyOptions::default());
//! assert_eq!(report.graph.nodes.len(), 1);
//! assert!(report.errors.is_empty());
//! ```

pub mod apply;
pub mod delta;
pub mod error;
pub mod report;
pub mod undo;

// Re-export key types
pub use apply::{ApplyOptions, DeltaApplier};
pub use delta::{EdgePatch, MetadataPatch, NodeDataPatch, NodePatch, WorkflowDelta};
pub use error::{DeltaEngineError, Result};
pub use report::ApplyReport;
pub use undo::UndoStack;
