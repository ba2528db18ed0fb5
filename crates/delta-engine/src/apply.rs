//! Batch application of workflow deltas
//!
//! Deltas are processed in list order, so later deltas see the effects
//! of earlier ones. Each delta commits or is individually rejected with
//! an error string; the batch never rolls back. After the batch an
//! optional auto-layout pass repositions every node and an optional
//! validation pass re-checks the structural invariants as a safety net.

use flowcraft_graph_contracts::{
    disambiguate, validate_graph, IdGenerator, UuidIdGenerator, WorkflowGraph,
};
use layout_engine::LayoutDirection;
use serde::{Deserialize, Serialize};

use crate::delta::WorkflowDelta;
use crate::report::ApplyReport;

/// Knobs for a delta batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplyOptions {
    /// Re-validate the whole graph after the batch
    pub validate_connections: bool,
    /// Recompute every node position after the batch
    pub auto_layout: bool,
    /// On node-ID collision, rename the incoming node instead of
    /// rejecting it
    pub preserve_ids: bool,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            validate_connections: true,
            auto_layout: false,
            preserve_ids: true,
        }
    }
}

/// Applies delta batches to workflow graphs
///
/// Holds the suffix source used for ID-collision renames; inject a
/// deterministic generator in tests.
pub struct DeltaApplier {
    ids: Box<dyn IdGenerator>,
}

impl Default for DeltaApplier {
    fn default() -> Self {
        Self::new()
    }
}

impl DeltaApplier {
    /// Create an applier with uuid-backed rename suffixes
    pub fn new() -> Self {
        Self {
            ids: Box::new(UuidIdGenerator),
        }
    }

    /// Create an applier with an injected suffix source
    pub fn with_id_generator(ids: impl IdGenerator + 'static) -> Self {
        Self { ids: Box::new(ids) }
    }

    /// Apply a typed delta batch
    pub fn apply(
        &mut self,
        graph: &WorkflowGraph,
        deltas: &[WorkflowDelta],
        options: &ApplyOptions,
    ) -> ApplyReport {
        let mut result = graph.clone();
        let mut changes = Vec::new();
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        for delta in deltas {
            self.apply_one(&mut result, delta, options, &mut changes, &mut errors, &mut warnings);
        }

        self.finalize(result, options, changes, errors, warnings)
    }

    /// Apply an untrusted JSON delta batch
    ///
    /// The value must be a JSON array; anything else is the catastrophic
    /// case and returns the input graph untouched with a single error.
    /// Array elements are parsed one at a time so a malformed entry
    /// (missing field, unknown `type`) is skipped with an error while
    /// the rest of the batch still applies.
    pub fn apply_json(
        &mut self,
        graph: &WorkflowGraph,
        deltas: &serde_json::Value,
        options: &ApplyOptions,
    ) -> ApplyReport {
        let Some(items) = deltas.as_array() else {
            log::warn!("Rejecting delta batch: expected a JSON array, got {}", json_kind(deltas));
            return ApplyReport::rejected(
                graph.clone(),
                format!("Delta batch must be a JSON array, got {}", json_kind(deltas)),
            );
        };

        let mut result = graph.clone();
        let mut changes = Vec::new();
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        for (index, item) in items.iter().enumerate() {
            match serde_json::from_value::<WorkflowDelta>(item.clone()) {
                Ok(delta) => {
                    self.apply_one(&mut result, &delta, options, &mut changes, &mut errors, &mut warnings);
                }
                Err(err) => errors.push(format!("Delta {} is malformed: {}", index, err)),
            }
        }

        self.finalize(result, options, changes, errors, warnings)
    }

    /// Apply one delta, appending to the change/error/warning lists
    fn apply_one(
        &mut self,
        graph: &mut WorkflowGraph,
        delta: &WorkflowDelta,
        options: &ApplyOptions,
        changes: &mut Vec<String>,
        errors: &mut Vec<String>,
        warnings: &mut Vec<String>,
    ) {
        match delta {
            WorkflowDelta::AddNode { node } => {
                let mut node = node.clone();
                if graph.contains_node(&node.id) {
                    if options.preserve_ids {
                        let renamed =
                            disambiguate(&node.id, &mut *self.ids, |c| graph.contains_node(c));
                        warnings.push(format!(
                            "Node ID '{}' already exists, added as '{}'",
                            node.id, renamed
                        ));
                        node.id = renamed;
                    } else {
                        errors.push(format!("Node ID '{}' already exists", node.id));
                        return;
                    }
                }
                changes.push(format!("Added node '{}' ({})", node.data.label, node.id));
                graph.nodes.push(node);
            }

            WorkflowDelta::ModifyNode { node_id, updates } => {
                match graph.find_node_mut(node_id) {
                    Some(node) => {
                        updates.apply_to(node);
                        changes.push(format!("Updated node '{}'", node_id));
                    }
                    None => errors.push(format!("Cannot modify node '{}': not found", node_id)),
                }
            }

            WorkflowDelta::RemoveNode { node_id } => match graph.remove_node(node_id) {
                Some((node, cascaded)) => changes.push(format!(
                    "Removed node '{}' and {} connected edge(s)",
                    node.id, cascaded
                )),
                None => errors.push(format!("Cannot remove node '{}': not found", node_id)),
            },

            WorkflowDelta::AddEdge { edge } => {
                if !graph.contains_node(&edge.source) {
                    errors.push(format!(
                        "Cannot add edge '{}': source node '{}' not found",
                        edge.id, edge.source
                    ));
                    return;
                }
                if !graph.contains_node(&edge.target) {
                    errors.push(format!(
                        "Cannot add edge '{}': target node '{}' not found",
                        edge.id, edge.target
                    ));
                    return;
                }
                let mut edge = edge.clone();
                if graph.contains_edge(&edge.id) {
                    // Edges always rename on collision; preserve_ids only
                    // governs nodes.
                    let renamed =
                        disambiguate(&edge.id, &mut *self.ids, |c| graph.contains_edge(c));
                    warnings.push(format!(
                        "Edge ID '{}' already exists, added as '{}'",
                        edge.id, renamed
                    ));
                    edge.id = renamed;
                }
                changes.push(format!(
                    "Connected '{}' -> '{}' ({})",
                    edge.source, edge.target, edge.id
                ));
                graph.edges.push(edge);
            }

            WorkflowDelta::ModifyEdge { edge_id, updates } => {
                let Some(edge) = graph.find_edge(edge_id) else {
                    errors.push(format!("Cannot modify edge '{}': not found", edge_id));
                    return;
                };
                // Endpoints must stay resolvable after the merge.
                let source = updates.source.clone().unwrap_or_else(|| edge.source.clone());
                let target = updates.target.clone().unwrap_or_else(|| edge.target.clone());
                if !graph.contains_node(&source) {
                    errors.push(format!(
                        "Cannot modify edge '{}': source node '{}' not found",
                        edge_id, source
                    ));
                    return;
                }
                if !graph.contains_node(&target) {
                    errors.push(format!(
                        "Cannot modify edge '{}': target node '{}' not found",
                        edge_id, target
                    ));
                    return;
                }
                if let Some(edge) = graph.find_edge_mut(edge_id) {
                    updates.apply_to(edge);
                }
                changes.push(format!("Updated edge '{}'", edge_id));
            }

            WorkflowDelta::RemoveEdge { edge_id } => match graph.remove_edge(edge_id) {
                Some(edge) => changes.push(format!("Removed edge '{}'", edge.id)),
                None => errors.push(format!("Cannot remove edge '{}': not found", edge_id)),
            },

            WorkflowDelta::UpdateMetadata { updates } => {
                updates.apply_to(graph);
                changes.push("Updated workflow metadata".to_string());
            }
        }
    }

    /// Post-batch steps: layout, validation safety net, timestamp
    fn finalize(
        &self,
        mut graph: WorkflowGraph,
        options: &ApplyOptions,
        mut changes: Vec<String>,
        mut errors: Vec<String>,
        warnings: Vec<String>,
    ) -> ApplyReport {
        if options.auto_layout {
            let laid_out = layout_engine::layout_workflow(
                &graph.nodes,
                &graph.edges,
                LayoutDirection::TopToBottom,
            );
            graph.nodes = laid_out.nodes;
            changes.push("Applied automatic layout".to_string());
        }

        if options.validate_connections {
            // Safety net over the per-delta checks, not user-input
            // validation: anything found here is a bug upstream.
            for finding in validate_graph(&graph) {
                errors.push(finding.to_string());
            }
        }

        graph.touch();
        log::debug!(
            "Delta batch: {} change(s), {} error(s), {} warning(s)",
            changes.len(),
            errors.len(),
            warnings.len()
        );
        ApplyReport::new(graph, changes, errors, warnings)
    }
}

/// Human-readable JSON value kind, for error messages
fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
