//! Hierarchy of constraint across a neighborhood.
//!
//! # Overview
//!
//! Hierarchy measures how unevenly a node's total constraint is
//! distributed over its neighbors, via the Coleman-Theil entropy ratio:
//! 0 when every neighbor constrains the node equally, approaching 1 when
//! a single contact accounts for all of it.
//!
//! With `n` neighbors and per-neighbor local constraints `c_w` summing
//! to `C`, the score is
//!
//! ```text
//! Σ_w (c_w/C · n) · ln(c_w/C · n)  /  (n · ln n)
//! ```
//!
//! Below two neighbors the ratio is degenerate (`ln 1` in the
//! denominator), so `n ≤ 1` — including isolated nodes — is defined as
//! exactly 0 and never reaches the formula.

use std::collections::HashMap;

use egonet_graph::AttrGraph;
use tracing::{debug, instrument};

use crate::HolesError;
use crate::engine::{HolesEngine, resolve_nodes};

/// Compute hierarchy for the requested nodes.
///
/// # Arguments
///
/// * `graph` — the graph to analyze.
/// * `nodes` — labels to score; `None` scores every node.
/// * `weight` — edge attribute to use as weight; `None` treats every
///   edge as weight 1.
///
/// # Returns
///
/// A map from label to hierarchy. Nodes with 0 or 1 neighbors map to 0.
///
/// # Errors
///
/// Returns [`HolesError::UnknownNode`] if a requested label is not in
/// the graph.
#[instrument(skip(graph))]
#[allow(clippy::cast_precision_loss)]
pub fn hierarchy(
    graph: &AttrGraph,
    nodes: Option<&[&str]>,
    weight: Option<&str>,
) -> Result<HashMap<String, f64>, HolesError> {
    let targets = resolve_nodes(graph, nodes)?;
    debug!(targets = targets.len(), "computing hierarchy");

    let mut engine = HolesEngine::new(graph, weight);
    let mut results = HashMap::with_capacity(targets.len());

    for (label, v) in targets {
        let ego = graph.ego_subgraph(v);
        let n = ego.node_count() - 1;

        let locals: Vec<f64> = graph
            .neighbors(v)
            .map(|w| engine.local_constraint(v, w))
            .collect();
        let total: f64 = locals.iter().sum();

        let score = if n > 1 {
            let n = n as f64;
            locals
                .iter()
                .map(|c| {
                    let share = c / total * n;
                    share * share.ln() / (n * n.ln())
                })
                .sum()
        } else {
            0.0
        };
        results.insert(label, score);
    }

    Ok(results)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
