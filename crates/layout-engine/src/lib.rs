//! Layered auto-layout for FlowCraft workflow graphs
//!
//! Given nodes and directed edges, assigns every node a non-overlapping
//! canvas position so connected nodes read in flow order, and annotates
//! edges with their render style. The entry points are total: any
//! finite node set yields a valid layout (cycles included), with a
//! deterministic manual pass covering degenerate coordinates and a grid
//! covering internal failures.
//!
//! # Example
//!
//! ```
//! use flowcraft_graph_contracts::{NodeKind, WorkflowBuilder};
//! use layout_engine::{layout_workflow, LayoutDirection};
//!
//! let graph = WorkflowBuilder::new("Two steps")
//!     .add_node("t1", NodeKind::Trigger, (0.0, 0.0))
//!     .add_node("a1", NodeKind::Action, (0.0, 0.0))
//!     .add_edge("t1", "a1")
//!     .build();
//!
//! let result = layout_workflow(&graph.nodes, &graph.edges, LayoutDirection::TopToBottom);
//! assert_eq!(result.nodes.len(), 2);
//! ```

pub mod config;
pub mod error;
pub mod style;

mod grid;
mod layered;
mod manual;

use flowcraft_graph_contracts::{GraphEdge, GraphNode};
use serde::{Deserialize, Serialize};

// Re-export key types
pub use config::{node_footprint, LayoutDirection, LayoutSpacing};
pub use error::LayoutError;
pub use style::{style_for, EdgeStyle, StyledEdge};

/// A computed layout: repositioned nodes plus styled edges
///
/// Purely derived data; recomputed on every request, never mutated in
/// place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<StyledEdge>,
}

/// Lay out a workflow with default spacing
pub fn layout_workflow(
    nodes: &[GraphNode],
    edges: &[GraphEdge],
    direction: LayoutDirection,
) -> LayoutResult {
    layout_workflow_with_spacing(nodes, edges, direction, &LayoutSpacing::default())
}

/// Lay out a workflow with explicit spacing
///
/// Never fails: an internal error in the layered algorithm falls back
/// to the grid layout.
pub fn layout_workflow_with_spacing(
    nodes: &[GraphNode],
    edges: &[GraphEdge],
    direction: LayoutDirection,
    spacing: &LayoutSpacing,
) -> LayoutResult {
    let positioned = match layered::layered_layout(nodes, edges, direction, spacing) {
        Ok(positioned) => positioned,
        Err(err) => {
            log::warn!("Layered layout failed ({}), falling back to grid", err);
            grid::grid_layout(nodes, spacing)
        }
    };
    log::debug!(
        "Laid out {} nodes / {} edges ({:?})",
        positioned.len(),
        edges.len(),
        direction
    );
    LayoutResult {
        nodes: positioned,
        edges: style::annotate_edges(edges),
    }
}

/// Choose a direction from the graph's shape
///
/// Top-to-bottom unless the widest rank holds more than twice as many
/// nodes as there are ranks; such wide, shallow graphs read better left
/// to right.
pub fn pick_direction(nodes: &[GraphNode], edges: &[GraphEdge]) -> LayoutDirection {
    let (depth, max_width) = layered::rank_metrics(nodes, edges);
    if max_width > depth * 2 {
        LayoutDirection::LeftToRight
    } else {
        LayoutDirection::TopToBottom
    }
}

/// Lay out a workflow, choosing the direction automatically
pub fn layout_workflow_auto(nodes: &[GraphNode], edges: &[GraphEdge]) -> LayoutResult {
    layout_workflow(nodes, edges, pick_direction(nodes, edges))
}
