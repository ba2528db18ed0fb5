//! Error types for the layout engine

use thiserror::Error;

/// Internal failures of the layered algorithm
///
/// These never reach callers: the public entry points catch them and
/// fall back to the grid layout, so layout always returns something
/// renderable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Rank assignment did not cover every node
    #[error("rank assignment covered {actual} of {expected} nodes")]
    RankMismatch { expected: usize, actual: usize },

    /// Rank ordering lost or duplicated nodes
    #[error("rank ordering placed {actual} of {expected} nodes")]
    LostNodes { expected: usize, actual: usize },
}
