//! Burt's constraint measure.
//!
//! # Overview
//!
//! Constraint captures how much a node's relationships are concentrated
//! in a tightly interconnected neighborhood. A node whose contacts all
//! know each other is highly constrained; a node bridging otherwise
//! disconnected contacts spans structural holes and scores low.
//!
//! The per-node score is the sum of [local constraint] over every
//! neighbor. Isolated nodes have no neighborhood to be constrained by
//! and score `NaN`.
//!
//! [local constraint]: crate::engine::HolesEngine::local_constraint

use std::collections::HashMap;

use egonet_graph::AttrGraph;
use tracing::{debug, instrument};

use crate::HolesError;
use crate::engine::{HolesEngine, resolve_nodes};

/// Compute constraint for the requested nodes.
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
/// A map from label to constraint. Isolated nodes map to `f64::NAN`.
///
/// # Errors
///
/// Returns [`HolesError::UnknownNode`] if a requested label is not in
/// the graph.
#[instrument(skip(graph))]
pub fn constraint(
    graph: &AttrGraph,
    nodes: Option<&[&str]>,
    weight: Option<&str>,
) -> Result<HashMap<String, f64>, HolesError> {
    let targets = resolve_nodes(graph, nodes)?;
    debug!(targets = targets.len(), "computing constraint");

    // One engine for the whole batch: pairs shared between nearby
    // requested nodes are evaluated once.
    let mut engine = HolesEngine::new(graph, weight);
    let mut results = HashMap::with_capacity(targets.len());

    for (label, v) in targets {
        let score = if graph.degree(v) == 0 {
            f64::NAN
        } else {
            let mut total = 0.0;
            for w in graph.neighbors(v) {
                total += engine.local_constraint(v, w);
            }
            total
        };
        results.insert(label, score);
    }

    Ok(results)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use egonet_graph::EdgeAttrs;

    fn undirected(edges: &[(&str, &str)]) -> AttrGraph {
        let mut g = AttrGraph::undirected();
        for (a, b) in edges {
            g.add_edge(a, b, EdgeAttrs::new());
        }
        g
    }

    #[test]
    fn triangle_nodes_are_fully_constrained() {
        // Each corner: two neighbors with local constraint 0.5625 each.
        let g = undirected(&[("1", "2"), ("2", "3"), ("3", "1")]);
        let scores = constraint(&g, None, None).expect("constraint");

        for label in ["1", "2", "3"] {
            assert!(
                (scores[label] - 1.125).abs() < 1e-12,
                "{label}: got {}",
                scores[label]
            );
        }
    }

    #[test]
    fn star_leaf_constraint_equals_its_single_local_constraint() {
        // A leaf has one neighbor, so its constraint is exactly the one
        // local-constraint term, which is 1 (sole tie, no third party).
        let g = undirected(&[("0", "1"), ("0", "2"), ("0", "3")]);
        let scores = constraint(&g, Some(&["1"]), None).expect("constraint");
        assert!((scores["1"] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn star_center_spans_structural_holes() {
        // Three mutually unconnected contacts: (1/3)² per neighbor.
        let g = undirected(&[("0", "1"), ("0", "2"), ("0", "3")]);
        let scores = constraint(&g, Some(&["0"]), None).expect("constraint");
        assert!((scores["0"] - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn isolated_node_is_nan() {
        let mut g = undirected(&[("1", "2")]);
        g.add_node("5");
        let scores = constraint(&g, None, None).expect("constraint");
        assert!(scores["5"].is_nan());
        assert!(!scores["1"].is_nan());
    }

    #[test]
    fn covers_exactly_the_requested_set() {
        let g = undirected(&[("1", "2"), ("2", "3")]);
        let scores = constraint(&g, Some(&["2"]), None).expect("constraint");
        assert_eq!(scores.len(), 1);
        assert!(scores.contains_key("2"));
    }

    #[test]
    fn unknown_label_fails_fast() {
        let g = undirected(&[("1", "2")]);
        let err = constraint(&g, Some(&["7"]), None).expect_err("must fail");
        assert_eq!(err, HolesError::UnknownNode("7".to_string()));
    }

    #[test]
    fn repeated_batches_are_deterministic() {
        let g = undirected(&[("1", "2"), ("2", "3"), ("3", "1"), ("3", "4")]);
        let first = constraint(&g, None, None).expect("first");
        let second = constraint(&g, None, None).expect("second");

        for (label, score) in &first {
            assert_eq!(
                score.to_bits(),
                second[label].to_bits(),
                "{label} differs between identical batches"
            );
        }
    }

    #[test]
    fn weighted_two_node_graph() {
        // Sole mutual tie: direct p = 1, and the indirect term is
        // p·p_vv over the one neighbor (the counterpart itself), which
        // is 0 — there is no self tie. Local constraint (1 + 0)² = 1.
        let mut g = AttrGraph::undirected();
        let mut attrs = EdgeAttrs::new();
        attrs.insert("w".to_string(), 3.0);
        g.add_edge("1", "2", attrs);

        let scores = constraint(&g, None, Some("w")).expect("constraint");
        assert!((scores["1"] - 1.0).abs() < 1e-12);
        assert!((scores["2"] - 1.0).abs() < 1e-12);
    }
}
