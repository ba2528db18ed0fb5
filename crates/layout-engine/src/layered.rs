//! Layered (Sugiyama-family) layout
//!
//! Three phases over an index-based adjacency:
//!
//! 1. Rank assignment: longest-path distance from any source node,
//!    computed by memoized DFS over predecessors. A predecessor already
//!    on the current DFS path closes a cycle and contributes rank 0, so
//!    cyclic graphs terminate with a usable layering.
//! 2. Within-rank ordering: one forward barycenter pass over
//!    predecessor positions; ties and disconnected nodes keep their
//!    input order.
//! 3. Coordinate assignment: ranks advance along the main axis at a
//!    pitch that clears the largest footprint; siblings pack along the
//!    cross axis with a fixed gap and each rank is centered against the
//!    widest one.

use std::collections::{HashMap, HashSet};

use flowcraft_graph_contracts::{GraphEdge, GraphNode, Position};

use crate::config::{node_footprint, LayoutDirection, LayoutSpacing};
use crate::error::LayoutError;
use crate::manual;

/// Index-based adjacency for the layout phases
struct LayoutGraph {
    n: usize,
    /// Forward edges: adj[u] = sorted list of v where u -> v
    adj: Vec<Vec<usize>>,
    /// Reverse edges: rev[v] = sorted list of u where u -> v
    rev: Vec<Vec<usize>>,
}

impl LayoutGraph {
    /// Build from nodes/edges; edges referencing unknown nodes and
    /// self-loops are ignored for ranking purposes.
    fn build(nodes: &[GraphNode], edges: &[GraphEdge]) -> Self {
        let index: HashMap<&str, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id.as_str(), i))
            .collect();

        let n = nodes.len();
        let mut adj = vec![Vec::new(); n];
        let mut rev = vec![Vec::new(); n];
        for edge in edges {
            let (Some(&u), Some(&v)) = (index.get(edge.source.as_str()), index.get(edge.target.as_str()))
            else {
                continue;
            };
            if u == v {
                continue;
            }
            adj[u].push(v);
            rev[v].push(u);
        }

        // Sort and dedup for determinism.
        for list in adj.iter_mut().chain(rev.iter_mut()) {
            list.sort_unstable();
            list.dedup();
        }

        Self { n, adj, rev }
    }
}

/// Assign ranks via longest-path from source nodes
///
/// Nodes with no predecessors get rank 0; every other node gets
/// 1 + max over predecessor contributions.
fn assign_ranks(graph: &LayoutGraph) -> Vec<usize> {
    fn rank_of(
        v: usize,
        graph: &LayoutGraph,
        memo: &mut [Option<usize>],
        on_stack: &mut [bool],
    ) -> usize {
        if let Some(rank) = memo[v] {
            return rank;
        }
        on_stack[v] = true;
        let mut rank = 0;
        for &u in &graph.rev[v] {
            // A predecessor on the current DFS path closes a cycle;
            // count it as a rank-0 contributor instead of re-entering it.
            let contribution = if on_stack[u] {
                0
            } else {
                rank_of(u, graph, memo, on_stack)
            };
            rank = rank.max(contribution + 1);
        }
        on_stack[v] = false;
        memo[v] = Some(rank);
        rank
    }

    let mut memo = vec![None; graph.n];
    let mut on_stack = vec![false; graph.n];
    (0..graph.n)
        .map(|v| rank_of(v, graph, &mut memo, &mut on_stack))
        .collect()
}

/// Mean position of a node's predecessors in the previous rank
fn barycenter(v: usize, graph: &LayoutGraph, prev_pos: &HashMap<usize, usize>) -> f64 {
    let positions: Vec<usize> = graph.rev[v]
        .iter()
        .filter_map(|u| prev_pos.get(u).copied())
        .collect();
    if positions.is_empty() {
        // Sorts after every connected sibling; stable sort keeps input order.
        return f64::MAX;
    }
    positions.iter().sum::<usize>() as f64 / positions.len() as f64
}

/// Bucket nodes by rank and order each bucket
fn order_ranks(graph: &LayoutGraph, ranks: &[usize]) -> Vec<Vec<usize>> {
    if ranks.is_empty() {
        return Vec::new();
    }
    let max_rank = ranks.iter().copied().max().unwrap_or(0);
    let mut order: Vec<Vec<usize>> = vec![Vec::new(); max_rank + 1];
    for (v, &r) in ranks.iter().enumerate() {
        order[r].push(v);
    }

    // Forward barycenter pass; rank 0 keeps input order.
    for r in 1..order.len() {
        let prev_pos: HashMap<usize, usize> = order[r - 1]
            .iter()
            .enumerate()
            .map(|(i, &v)| (v, i))
            .collect();
        let current = std::mem::take(&mut order[r]);
        let mut scored: Vec<(f64, usize)> = current
            .into_iter()
            .map(|v| (barycenter(v, graph, &prev_pos), v))
            .collect();
        scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        order[r] = scored.into_iter().map(|(_, v)| v).collect();
    }
    order
}

/// Footprint extent along the main axis
fn main_extent(node: &GraphNode, direction: LayoutDirection) -> f64 {
    let (w, h) = node_footprint(node.kind);
    if direction.is_vertical() {
        h
    } else {
        w
    }
}

/// Footprint extent along the cross axis
fn cross_extent(node: &GraphNode, direction: LayoutDirection) -> f64 {
    let (w, h) = node_footprint(node.kind);
    if direction.is_vertical() {
        w
    } else {
        h
    }
}

/// Run the layered algorithm
///
/// Returns the input nodes with fresh positions (input list order
/// preserved). Errors here are internal safety nets; the public entry
/// point converts them into the grid fallback.
pub(crate) fn layered_layout(
    nodes: &[GraphNode],
    edges: &[GraphEdge],
    direction: LayoutDirection,
    spacing: &LayoutSpacing,
) -> Result<Vec<GraphNode>, LayoutError> {
    if nodes.is_empty() {
        return Ok(Vec::new());
    }

    let graph = LayoutGraph::build(nodes, edges);
    let ranks = assign_ranks(&graph);
    if ranks.len() != nodes.len() {
        return Err(LayoutError::RankMismatch {
            expected: nodes.len(),
            actual: ranks.len(),
        });
    }

    let order = order_ranks(&graph, &ranks);
    let placed: usize = order.iter().map(Vec::len).sum();
    if placed != nodes.len() {
        return Err(LayoutError::LostNodes {
            expected: nodes.len(),
            actual: placed,
        });
    }

    // Main-axis pitch: largest footprint plus the rank gap.
    let max_main = nodes
        .iter()
        .map(|n| main_extent(n, direction))
        .fold(0.0, f64::max);
    let pitch = max_main + spacing.rank_gap(direction);

    // Pack each rank along the cross axis; anchors are footprint centers.
    let mut anchors: Vec<(f64, f64)> = vec![(0.0, 0.0); nodes.len()];
    let mut rank_extents = vec![0.0_f64; order.len()];
    for (r, members) in order.iter().enumerate() {
        let main = spacing.margin + r as f64 * pitch + max_main / 2.0;
        let mut cursor = 0.0;
        for &v in members {
            let cross = cross_extent(&nodes[v], direction);
            anchors[v] = (main, cursor + cross / 2.0);
            cursor += cross + spacing.node_gap;
        }
        rank_extents[r] = if members.is_empty() {
            0.0
        } else {
            cursor - spacing.node_gap
        };
    }

    // Center each rank against the widest one.
    let max_extent = rank_extents.iter().copied().fold(0.0, f64::max);
    for (r, members) in order.iter().enumerate() {
        let shift = spacing.margin + (max_extent - rank_extents[r]) / 2.0;
        for &v in members {
            anchors[v].1 += shift;
        }
    }

    // Stored position is the top-left corner: anchor minus half footprint.
    let mut result = nodes.to_vec();
    for (v, node) in result.iter_mut().enumerate() {
        let (w, h) = node_footprint(node.kind);
        let (main, cross) = anchors[v];
        let (x, y) = if direction.is_vertical() {
            (cross, main)
        } else {
            (main, cross)
        };
        node.position = Position::new(x - w / 2.0, y - h / 2.0);
    }

    if is_degenerate(&result, &ranks, direction) {
        log::warn!(
            "Layered layout produced colliding coordinates for {} nodes, using manual spacing",
            result.len()
        );
        return Ok(manual::manual_layout(nodes, direction, spacing));
    }

    Ok(result)
}

/// Detect collapsed main-axis coordinates
///
/// Each distinct rank should map to a distinct main-axis coordinate;
/// fewer means the placement collapsed somewhere.
fn is_degenerate(nodes: &[GraphNode], ranks: &[usize], direction: LayoutDirection) -> bool {
    let expected: HashSet<usize> = ranks.iter().copied().collect();
    let mains: HashSet<i64> = nodes
        .iter()
        .map(|n| {
            let main = if direction.is_vertical() {
                n.position.y
            } else {
                n.position.x
            };
            main.round() as i64
        })
        .collect();
    mains.len() < expected.len()
}

/// Rank depth and maximum rank width, for direction selection
pub(crate) fn rank_metrics(nodes: &[GraphNode], edges: &[GraphEdge]) -> (usize, usize) {
    if nodes.is_empty() {
        return (0, 0);
    }
    let graph = LayoutGraph::build(nodes, edges);
    let ranks = assign_ranks(&graph);
    let depth = ranks.iter().copied().max().unwrap_or(0) + 1;
    let mut widths = vec![0_usize; depth];
    for &r in &ranks {
        widths[r] += 1;
    }
    let max_width = widths.iter().copied().max().unwrap_or(0);
    (depth, max_width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowcraft_graph_contracts::{NodeKind, WorkflowBuilder};

    fn chain_graph() -> (Vec<GraphNode>, Vec<GraphEdge>) {
        let graph = WorkflowBuilder::new("Chain")
            .add_node("t1", NodeKind::Trigger, (0.0, 0.0))
            .add_node("a1", NodeKind::Action, (0.0, 0.0))
            .add_node("a2", NodeKind::Action, (0.0, 0.0))
            .add_edge("t1", "a1")
            .add_edge("a1", "a2")
            .build();
        (graph.nodes, graph.edges)
    }

    #[test]
    fn test_chain_ranks_increase_down_the_flow() {
        let (nodes, edges) = chain_graph();
        let placed =
            layered_layout(&nodes, &edges, LayoutDirection::TopToBottom, &LayoutSpacing::default())
                .unwrap();

        let ys: Vec<f64> = placed.iter().map(|n| n.position.y).collect();
        assert!(ys[0] < ys[1] && ys[1] < ys[2], "Y must strictly increase: {:?}", ys);
        // A single-file chain keeps one X column.
        assert_eq!(placed[0].position.x, placed[1].position.x);
        assert_eq!(placed[1].position.x, placed[2].position.x);
    }

    #[test]
    fn test_left_to_right_uses_x_as_main_axis() {
        let (nodes, edges) = chain_graph();
        let placed =
            layered_layout(&nodes, &edges, LayoutDirection::LeftToRight, &LayoutSpacing::default())
                .unwrap();

        let xs: Vec<f64> = placed.iter().map(|n| n.position.x).collect();
        assert!(xs[0] < xs[1] && xs[1] < xs[2]);
    }

    #[test]
    fn test_cycle_terminates() {
        let graph = WorkflowBuilder::new("Cycle")
            .add_node("a", NodeKind::Action, (0.0, 0.0))
            .add_node("b", NodeKind::Action, (0.0, 0.0))
            .add_edge("a", "b")
            .add_edge("b", "a")
            .build();

        let placed = layered_layout(
            &graph.nodes,
            &graph.edges,
            LayoutDirection::TopToBottom,
            &LayoutSpacing::default(),
        )
        .unwrap();
        assert_eq!(placed.len(), 2);
        // The two cycle members still land on distinct coordinates.
        assert_ne!(placed[0].position, placed[1].position);
    }

    #[test]
    fn test_siblings_share_rank_without_overlap() {
        let graph = WorkflowBuilder::new("Fanout")
            .add_node("t1", NodeKind::Trigger, (0.0, 0.0))
            .add_node("a1", NodeKind::Action, (0.0, 0.0))
            .add_node("a2", NodeKind::Action, (0.0, 0.0))
            .add_edge("t1", "a1")
            .add_edge("t1", "a2")
            .build();

        let placed = layered_layout(
            &graph.nodes,
            &graph.edges,
            LayoutDirection::TopToBottom,
            &LayoutSpacing::default(),
        )
        .unwrap();

        let a1 = placed.iter().find(|n| n.id == "a1").unwrap();
        let a2 = placed.iter().find(|n| n.id == "a2").unwrap();
        assert_eq!(a1.position.y, a2.position.y);
        // 400 wide plus a 60 gap between left corners.
        assert!((a1.position.x - a2.position.x).abs() >= 400.0 + 60.0);
    }

    #[test]
    fn test_barycenter_follows_parents() {
        // Two parallel chains; children should stay under their parents
        // instead of crossing.
        let graph = WorkflowBuilder::new("Parallel")
            .add_node("t1", NodeKind::Trigger, (0.0, 0.0))
            .add_node("t2", NodeKind::Trigger, (0.0, 0.0))
            .add_node("a1", NodeKind::Action, (0.0, 0.0))
            .add_node("a2", NodeKind::Action, (0.0, 0.0))
            .add_edge("t1", "a1")
            .add_edge("t2", "a2")
            .build();

        let placed = layered_layout(
            &graph.nodes,
            &graph.edges,
            LayoutDirection::TopToBottom,
            &LayoutSpacing::default(),
        )
        .unwrap();

        let x = |id: &str| placed.iter().find(|n| n.id == id).unwrap().position.x;
        assert!(x("t1") < x("t2"));
        assert!(x("a1") < x("a2"));
    }

    #[test]
    fn test_edges_to_unknown_nodes_are_ignored() {
        let mut graph = WorkflowBuilder::new("Dangling")
            .add_node("a", NodeKind::Trigger, (0.0, 0.0))
            .add_node("b", NodeKind::Action, (0.0, 0.0))
            .add_edge("a", "b")
            .build();
        graph.edges.push(GraphEdge::new("stray", "a", "missing"));

        let placed = layered_layout(
            &graph.nodes,
            &graph.edges,
            LayoutDirection::TopToBottom,
            &LayoutSpacing::default(),
        )
        .unwrap();
        assert_eq!(placed.len(), 2);
    }

    #[test]
    fn test_empty_graph() {
        let placed = layered_layout(
            &[],
            &[],
            LayoutDirection::TopToBottom,
            &LayoutSpacing::default(),
        )
        .unwrap();
        assert!(placed.is_empty());
    }

    #[test]
    fn test_rank_metrics_wide_vs_deep() {
        let (nodes, edges) = chain_graph();
        let (depth, width) = rank_metrics(&nodes, &edges);
        assert_eq!(depth, 3);
        assert_eq!(width, 1);

        let wide = WorkflowBuilder::new("Wide")
            .add_node("t", NodeKind::Trigger, (0.0, 0.0))
            .add_node("a1", NodeKind::Action, (0.0, 0.0))
            .add_node("a2", NodeKind::Action, (0.0, 0.0))
            .add_node("a3", NodeKind::Action, (0.0, 0.0))
            .add_edge("t", "a1")
            .add_edge("t", "a2")
            .add_edge("t", "a3")
            .build();
        let (depth, width) = rank_metrics(&wide.nodes, &wide.edges);
        assert_eq!(depth, 2);
        assert_eq!(width, 3);
    }
}
