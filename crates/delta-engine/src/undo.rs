//! Editor history as compressed snapshots
//!
//! The canvas layer wants whole-graph undo/redo without modeling
//! inverse operations for every delta kind, so history is a bounded
//! stack of zstd-compressed JSON snapshots. Compression keeps even a
//! deep history small for realistic graph sizes, and a snapshot
//! identical to the current one is not pushed twice.

use std::collections::VecDeque;

use flowcraft_graph_contracts::WorkflowGraph;

use crate::error::{DeltaEngineError, Result};

/// zstd compression level for snapshots
const SNAPSHOT_LEVEL: i32 = 3;

/// Bounded undo/redo stack of compressed graph snapshots
pub struct UndoStack {
    /// Compressed graph states, oldest first
    snapshots: VecDeque<Vec<u8>>,
    /// Current position in the stack
    current: usize,
    /// Maximum number of snapshots to keep
    max_snapshots: usize,
}

impl UndoStack {
    /// Create a stack holding at most `max_snapshots` states
    pub fn new(max_snapshots: usize) -> Self {
        Self {
            snapshots: VecDeque::new(),
            current: 0,
            max_snapshots: max_snapshots.max(1),
        }
    }

    /// Record a new state
    ///
    /// Truncates any redo history. Pushing a state identical to the
    /// current snapshot is a no-op, so callers can push after every
    /// batch without bloating history on empty batches.
    pub fn push(&mut self, graph: &WorkflowGraph) -> Result<()> {
        let json = serde_json::to_vec(graph)?;
        let compressed = zstd::encode_all(&json[..], SNAPSHOT_LEVEL)
            .map_err(|e| DeltaEngineError::Compression(e.to_string()))?;

        if let Some(top) = self.snapshots.get(self.current) {
            if *top == compressed {
                return Ok(());
            }
        }

        // Drop redo history beyond the current position.
        while self.snapshots.len() > self.current + 1 {
            self.snapshots.pop_back();
        }

        self.snapshots.push_back(compressed);
        self.current = self.snapshots.len() - 1;

        // Evict the oldest states past the cap.
        while self.snapshots.len() > self.max_snapshots {
            self.snapshots.pop_front();
            self.current = self.current.saturating_sub(1);
        }

        Ok(())
    }

    /// Step back one state, or `None` at the beginning
    pub fn undo(&mut self) -> Option<Result<WorkflowGraph>> {
        if self.current > 0 {
            self.current -= 1;
            Some(self.decompress(self.current))
        } else {
            None
        }
    }

    /// Step forward one state, or `None` at the end
    pub fn redo(&mut self) -> Option<Result<WorkflowGraph>> {
        if self.current + 1 < self.snapshots.len() {
            self.current += 1;
            Some(self.decompress(self.current))
        } else {
            None
        }
    }

    /// The current state without moving the cursor
    pub fn current(&self) -> Option<Result<WorkflowGraph>> {
        if self.snapshots.is_empty() {
            None
        } else {
            Some(self.decompress(self.current))
        }
    }

    /// Whether undo is available
    pub fn can_undo(&self) -> bool {
        self.current > 0
    }

    /// Whether redo is available
    pub fn can_redo(&self) -> bool {
        self.current + 1 < self.snapshots.len()
    }

    /// Number of stored snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether the stack holds no snapshots
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Drop all history
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.current = 0;
    }

    fn decompress(&self, index: usize) -> Result<WorkflowGraph> {
        let json = zstd::decode_all(&self.snapshots[index][..])
            .map_err(|e| DeltaEngineError::Compression(e.to_string()))?;
        Ok(serde_json::from_slice(&json)?)
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowcraft_graph_contracts::{GraphNode, NodeKind};

    fn graph_named(name: &str) -> WorkflowGraph {
        let mut graph = WorkflowGraph::new(name);
        graph
            .nodes
            .push(GraphNode::new("t1", NodeKind::Trigger, name));
        graph
    }

    #[test]
    fn test_push_undo_redo() {
        let mut stack = UndoStack::new(10);
        stack.push(&graph_named("first")).unwrap();
        stack.push(&graph_named("second")).unwrap();
        stack.push(&graph_named("third")).unwrap();

        assert_eq!(stack.current().unwrap().unwrap().name, "third");
        assert_eq!(stack.undo().unwrap().unwrap().name, "second");
        assert_eq!(stack.undo().unwrap().unwrap().name, "first");
        assert!(stack.undo().is_none());

        assert_eq!(stack.redo().unwrap().unwrap().name, "second");
        assert_eq!(stack.redo().unwrap().unwrap().name, "third");
        assert!(stack.redo().is_none());
    }

    #[test]
    fn test_push_truncates_redo() {
        let mut stack = UndoStack::new(10);
        stack.push(&graph_named("first")).unwrap();
        stack.push(&graph_named("second")).unwrap();
        stack.undo();

        stack.push(&graph_named("replacement")).unwrap();

        assert!(!stack.can_redo());
        assert_eq!(stack.current().unwrap().unwrap().name, "replacement");
    }

    #[test]
    fn test_duplicate_push_is_noop() {
        let mut stack = UndoStack::new(10);
        let graph = graph_named("only");
        stack.push(&graph).unwrap();
        stack.push(&graph).unwrap();

        assert_eq!(stack.len(), 1);
        assert!(!stack.can_undo());
    }

    #[test]
    fn test_eviction_past_cap() {
        let mut stack = UndoStack::new(3);
        for i in 0..5 {
            stack.push(&graph_named(&format!("state_{}", i))).unwrap();
        }

        assert_eq!(stack.len(), 3);
        assert_eq!(stack.current().unwrap().unwrap().name, "state_4");

        stack.undo();
        stack.undo();
        assert!(!stack.can_undo());
        assert_eq!(stack.current().unwrap().unwrap().name, "state_2");
    }

    #[test]
    fn test_empty_stack() {
        let mut stack = UndoStack::default();
        assert!(stack.is_empty());
        assert!(stack.current().is_none());
        assert!(stack.undo().is_none());
        assert!(stack.redo().is_none());
    }

    #[test]
    fn test_clear() {
        let mut stack = UndoStack::new(10);
        stack.push(&graph_named("a")).unwrap();
        stack.clear();
        assert!(stack.is_empty());
        assert!(!stack.can_undo());
    }
}
