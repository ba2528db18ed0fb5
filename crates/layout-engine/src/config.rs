//! Layout direction, spacing, and node footprints

use flowcraft_graph_contracts::NodeKind;
use serde::{Deserialize, Serialize};

/// Main-axis direction of the layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutDirection {
    /// Ranks flow downward; Y is the main axis
    #[default]
    TopToBottom,
    /// Ranks flow rightward; X is the main axis
    LeftToRight,
}

impl LayoutDirection {
    /// Whether the main axis is vertical
    pub fn is_vertical(&self) -> bool {
        matches!(self, LayoutDirection::TopToBottom)
    }
}

/// Spacing knobs for the layout algorithms
///
/// The defaults match the canvas grid the FlowCraft UI renders at. Rank
/// pitch is always the rank gap plus the largest footprint along the
/// main axis, so consecutive ranks clear each other for any node mix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSpacing {
    /// Cross-axis gap between sibling nodes in a rank
    pub node_gap: f64,
    /// Main-axis gap between ranks when laying out top-to-bottom
    pub vertical_rank_gap: f64,
    /// Main-axis gap between ranks when laying out left-to-right
    pub horizontal_rank_gap: f64,
    /// Outer margin around the whole layout
    pub margin: f64,
    /// Main-axis stride of the single-file manual fallback
    pub fallback_stride: f64,
    /// Minimum cell side of the grid fallback
    pub grid_cell: f64,
}

impl Default for LayoutSpacing {
    fn default() -> Self {
        Self {
            node_gap: 60.0,
            vertical_rank_gap: 300.0,
            horizontal_rank_gap: 150.0,
            margin: 50.0,
            fallback_stride: 300.0,
            grid_cell: 300.0,
        }
    }
}

impl LayoutSpacing {
    /// Rank gap for the given direction
    pub fn rank_gap(&self, direction: LayoutDirection) -> f64 {
        match direction {
            LayoutDirection::TopToBottom => self.vertical_rank_gap,
            LayoutDirection::LeftToRight => self.horizontal_rank_gap,
        }
    }
}

/// Rectangular footprint (width, height) a node occupies on the canvas
///
/// Trigger, action, and loop cards carry a service row and render wider
/// than condition and transform cards.
pub fn node_footprint(kind: NodeKind) -> (f64, f64) {
    match kind {
        NodeKind::Trigger | NodeKind::Action | NodeKind::Loop => (400.0, 80.0),
        NodeKind::Condition | NodeKind::Transform => (350.0, 80.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_meet_minimums() {
        let spacing = LayoutSpacing::default();
        assert!(spacing.node_gap >= 60.0);
        assert!(spacing.horizontal_rank_gap >= 150.0);
        assert!(spacing.vertical_rank_gap >= 300.0);
        assert!(spacing.margin >= 50.0);
        assert!(spacing.fallback_stride >= 300.0);
        assert!(spacing.grid_cell >= 300.0);
    }

    #[test]
    fn test_footprint_classes() {
        assert_eq!(node_footprint(NodeKind::Trigger), (400.0, 80.0));
        assert_eq!(node_footprint(NodeKind::Loop), (400.0, 80.0));
        assert_eq!(node_footprint(NodeKind::Condition), (350.0, 80.0));
        assert_eq!(node_footprint(NodeKind::Transform), (350.0, 80.0));
    }

    #[test]
    fn test_rank_gap_by_direction() {
        let spacing = LayoutSpacing::default();
        assert_eq!(spacing.rank_gap(LayoutDirection::TopToBottom), 300.0);
        assert_eq!(spacing.rank_gap(LayoutDirection::LeftToRight), 150.0);
    }
}
