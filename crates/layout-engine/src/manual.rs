//! Deterministic single-file fallback layout
//!
//! Used when the layered pass degenerates into colliding coordinates.
//! Nodes go single file along the main axis: trigger nodes first, then
//! by trailing numeric ID suffix, then input order.

use flowcraft_graph_contracts::{GraphNode, Position};

use crate::config::{node_footprint, LayoutDirection, LayoutSpacing};

/// Lay out nodes single file along the main axis
///
/// The stride clears the largest footprint, so the result never
/// overlaps. Output preserves the input list order; only positions
/// change.
pub(crate) fn manual_layout(
    nodes: &[GraphNode],
    direction: LayoutDirection,
    spacing: &LayoutSpacing,
) -> Vec<GraphNode> {
    let mut by_slot: Vec<usize> = (0..nodes.len()).collect();
    by_slot.sort_by_key(|&i| {
        let node = &nodes[i];
        (
            if node.kind.is_trigger() { 0_u8 } else { 1_u8 },
            trailing_number(&node.id).unwrap_or(u64::MAX),
            i,
        )
    });

    let max_main = nodes
        .iter()
        .map(|n| {
            let (w, h) = node_footprint(n.kind);
            if direction.is_vertical() {
                h
            } else {
                w
            }
        })
        .fold(0.0, f64::max);
    let stride = spacing.fallback_stride.max(max_main + spacing.node_gap);

    let mut result = nodes.to_vec();
    for (slot, &i) in by_slot.iter().enumerate() {
        let main = spacing.margin + slot as f64 * stride;
        result[i].position = if direction.is_vertical() {
            Position::new(spacing.margin, main)
        } else {
            Position::new(main, spacing.margin)
        };
    }
    result
}

/// Trailing decimal digits of an ID, if any ("action-12" -> 12)
fn trailing_number(id: &str) -> Option<u64> {
    let digits = id
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<String>();
    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}
