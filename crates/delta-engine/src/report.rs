//! Outcome of a delta batch

use flowcraft_graph_contracts::WorkflowGraph;
use serde::{Deserialize, Serialize};

/// What a delta batch did to a graph
///
/// Always returned, never thrown: errors and warnings ride alongside
/// the (possibly partially) updated graph so the caller can render the
/// result and surface the findings in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyReport {
    /// The graph after the batch
    pub graph: WorkflowGraph,
    /// One entry per committed delta (plus finalization steps)
    pub changes_applied: Vec<String>,
    /// Rejected deltas and post-batch validation findings
    pub errors: Vec<String>,
    /// Non-fatal adjustments such as ID auto-renames
    pub warnings: Vec<String>,
    /// One-line digest of the counts above
    pub summary: String,
}

impl ApplyReport {
    /// Build a report with a freshly composed summary line
    pub(crate) fn new(
        graph: WorkflowGraph,
        changes_applied: Vec<String>,
        errors: Vec<String>,
        warnings: Vec<String>,
    ) -> Self {
        let summary = format!(
            "Applied {} change(s) with {} error(s) and {} warning(s)",
            changes_applied.len(),
            errors.len(),
            warnings.len()
        );
        Self {
            graph,
            changes_applied,
            errors,
            warnings,
            summary,
        }
    }

    /// Report for a batch whose input was structurally unusable
    ///
    /// The graph is passed through untouched (no `updatedAt` stamp).
    pub(crate) fn rejected(graph: WorkflowGraph, error: String) -> Self {
        Self::new(graph, Vec::new(), vec![error], Vec::new())
    }

    /// Whether the batch applied without errors
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}
