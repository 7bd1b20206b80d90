//! Effective size and pairwise redundancy.
//!
//! # Overview
//!
//! Effective size is the non-redundant portion of a node's neighborhood:
//! how many distinct "worlds" a node reaches once contacts duplicated
//! through mutual third parties are discounted.
//!
//! Two algorithms, selected by graph properties:
//!
//! - **Unweighted, undirected graphs** use Borgatti's simplification on
//!   the ego network: drop the ego from its own ego subgraph, then
//!   `t - 2·e / t` over the `t` remaining vertices and `e` remaining
//!   edges.
//! - **Weighted or directed graphs** sum [`redundancy`] over the node's
//!   neighbors.
//!
//! The two branches are not unified on purpose — they are kept as
//! separate code paths and cross-checked numerically in the tests on
//! graphs where both apply.

use std::collections::HashMap;

use egonet_graph::AttrGraph;
use tracing::{debug, instrument};

use crate::HolesError;
use crate::engine::{HolesEngine, resolve_nodes};

/// Compute effective size for the requested nodes.
///
/// # Arguments
///
/// * `graph` — the graph to analyze.
/// * `nodes` — labels to score; `None` scores every node.
/// * `weight` — edge attribute to use as weight; `None` treats every
///   edge as weight 1 and, on undirected graphs, selects the ego-network
///   formula.
///
/// # Returns
///
/// A map from label to effective size. Isolated nodes map to `f64::NAN`.
///
/// # Errors
///
/// Returns [`HolesError::UnknownNode`] if a requested label is not in
/// the graph.
#[instrument(skip(graph))]
#[allow(clippy::cast_precision_loss)]
pub fn effective_size(
    graph: &AttrGraph,
    nodes: Option<&[&str]>,
    weight: Option<&str>,
) -> Result<HashMap<String, f64>, HolesError> {
    let targets = resolve_nodes(graph, nodes)?;
    let mut results = HashMap::with_capacity(targets.len());

    if !graph.is_directed() && weight.is_none() {
        debug!(targets = targets.len(), "effective size via ego networks");
        for (label, v) in targets {
            if graph.degree(v) == 0 {
                results.insert(label, f64::NAN);
                continue;
            }
            let mut ego = graph.ego_subgraph(v);
            ego.remove_node(&label);
            let vertices = ego.node_count() as f64;
            let edges = ego.size() as f64;
            results.insert(label, vertices - 2.0 * edges / vertices);
        }
    } else {
        debug!(targets = targets.len(), "effective size via redundancy");
        let mut engine = HolesEngine::new(graph, weight);
        for (label, v) in targets {
            if graph.degree(v) == 0 {
                results.insert(label, f64::NAN);
                continue;
            }
            let mut total = 0.0;
            for u in graph.neighbors(v) {
                total += engine.redundancy(v, u);
            }
            results.insert(label, total);
        }
    }

    Ok(results)
}

/// Compute the redundancy of the tie from `u` to `v`: the fraction of
/// the relationship duplicated through mutual third-party connections.
///
/// Evaluated with a fresh engine, so it is safe to interleave with other
/// metric calls and weight keys.
///
/// # Errors
///
/// Returns [`HolesError::UnknownNode`] if either label is not in the
/// graph.
#[instrument(skip(graph))]
pub fn redundancy(
    graph: &AttrGraph,
    u: &str,
    v: &str,
    weight: Option<&str>,
) -> Result<f64, HolesError> {
    let ui = graph
        .node_index(u)
        .ok_or_else(|| HolesError::UnknownNode(u.to_string()))?;
    let vi = graph
        .node_index(v)
        .ok_or_else(|| HolesError::UnknownNode(v.to_string()))?;

    let mut engine = HolesEngine::new(graph, weight);
    Ok(engine.redundancy(ui, vi))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
