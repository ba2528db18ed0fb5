//! Edge render-style annotation
//!
//! Presentation metadata the canvas layer applies verbatim. Conditional
//! edges get a heavier, amber stroke so branch arms read differently
//! from plain connections.

use flowcraft_graph_contracts::{EdgeKind, GraphEdge};
use serde::{Deserialize, Serialize};

/// Stroke style for a rendered edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStyle {
    /// CSS stroke color
    pub stroke: String,
    /// Stroke width in canvas pixels
    pub stroke_width: f64,
}

/// An edge plus its render style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyledEdge {
    #[serde(flatten)]
    pub edge: GraphEdge,
    pub style: EdgeStyle,
}

/// Render style for an edge kind
pub fn style_for(kind: EdgeKind) -> EdgeStyle {
    match kind {
        EdgeKind::Conditional => EdgeStyle {
            stroke: "#f59e0b".to_string(),
            stroke_width: 3.0,
        },
        EdgeKind::Default | EdgeKind::Smoothstep => EdgeStyle {
            stroke: "#64748b".to_string(),
            stroke_width: 2.0,
        },
    }
}

/// Annotate every edge with its render style
pub fn annotate_edges(edges: &[GraphEdge]) -> Vec<StyledEdge> {
    edges
        .iter()
        .map(|edge| StyledEdge {
            style: style_for(edge.kind),
            edge: edge.clone(),
        })
        .collect()
}
