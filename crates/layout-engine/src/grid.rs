//! Grid fallback layout
//!
//! Last-resort placement when the layered algorithm fails internally:
//! row-major cells on a square-ish grid. Always succeeds for any finite
//! node set.

use flowcraft_graph_contracts::{GraphNode, Position};

use crate::config::{node_footprint, LayoutSpacing};

/// Place nodes row-major on a grid with side ceil(sqrt(n))
///
/// Cells are at least `grid_cell` wide/tall and always clear the
/// largest footprint, so no two nodes overlap.
pub(crate) fn grid_layout(nodes: &[GraphNode], spacing: &LayoutSpacing) -> Vec<GraphNode> {
    if nodes.is_empty() {
        return Vec::new();
    }

    let side = (nodes.len() as f64).sqrt().ceil() as usize;
    let (max_w, max_h) = nodes.iter().fold((0.0_f64, 0.0_f64), |(w, h), node| {
        let (nw, nh) = node_footprint(node.kind);
        (w.max(nw), h.max(nh))
    });
    let cell_w = spacing.grid_cell.max(max_w + spacing.node_gap);
    let cell_h = spacing.grid_cell.max(max_h + spacing.node_gap);

    nodes
        .iter()
        .enumerate()
        .map(|(i, node)| {
            let (row, col) = (i / side, i % side);
            let mut placed = node.clone();
            placed.position = Position::new(
                spacing.margin + col as f64 * cell_w,
                spacing.margin + row as f64 * cell_h,
            );
            placed
        })
        .collect()
}
