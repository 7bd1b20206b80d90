//! Memoized structural-holes formulas.
//!
//! # Overview
//!
//! [`HolesEngine`] owns the pairwise quantities every public metric is
//! assembled from: mutual weight, normalized mutual weight (sum- and
//! max-normalized), local constraint, and redundancy. Local constraint
//! fans out to every neighbor-of-neighbor, so a node of degree `d` costs
//! O(d²) normalized-mutual-weight evaluations without memoization; the
//! caches make a whole-graph batch tractable on dense neighborhoods.
//!
//! # Cache discipline
//!
//! An engine is valid for exactly one graph snapshot and one weight key.
//! Every public metric constructs a fresh engine at the start of its
//! batch and drops it at the end, so a cache can never leak across calls
//! with a different weight key or a mutated graph. Within one batch the
//! caches are shared across all requested nodes — neighbor pairs common
//! to nearby nodes are computed once.
//!
//! Three caches are keyed by **ordered** node pairs (the formulas are
//! not symmetric): sum-normalized mutual weight, max-normalized mutual
//! weight, and local constraint. Two more are keyed by single nodes: the
//! sum and max neighborhood scales, so the scale over `u`'s neighbors is
//! computed once and reused by every pair `(u, *)`.

use std::collections::HashMap;

use egonet_graph::AttrGraph;
use petgraph::graph::NodeIndex;

use crate::HolesError;

/// Which neighborhood scale normalizes a mutual weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Norm {
    /// Divide by the sum of mutual weights over the neighborhood.
    Sum,
    /// Divide by the largest mutual weight in the neighborhood.
    Max,
}

/// Call-scoped evaluator for the structural-holes formulas.
///
/// Holds a read-only borrow of the graph plus the memoization tables.
/// Never share an engine across batches: construct, evaluate, drop.
pub(crate) struct HolesEngine<'a> {
    graph: &'a AttrGraph,
    weight: Option<&'a str>,
    sum_nmw: HashMap<(NodeIndex, NodeIndex), f64>,
    max_nmw: HashMap<(NodeIndex, NodeIndex), f64>,
    local_constraint: HashMap<(NodeIndex, NodeIndex), f64>,
    sum_scale: HashMap<NodeIndex, f64>,
    max_scale: HashMap<NodeIndex, f64>,
}

impl<'a> HolesEngine<'a> {
    /// Create an engine with empty caches for one graph and weight key.
    pub(crate) fn new(graph: &'a AttrGraph, weight: Option<&'a str>) -> Self {
        Self {
            graph,
            weight,
            sum_nmw: HashMap::new(),
            max_nmw: HashMap::new(),
            local_constraint: HashMap::new(),
            sum_scale: HashMap::new(),
            max_scale: HashMap::new(),
        }
    }

    /// Combined edge weight between two nodes, counting both directions.
    ///
    /// An absent arc contributes 0; a present arc without the named
    /// attribute contributes 1. Symmetric by construction. Cheap, so
    /// never cached.
    pub(crate) fn mutual_weight(&self, u: NodeIndex, v: NodeIndex) -> f64 {
        self.graph.edge_weight(u, v, self.weight) + self.graph.edge_weight(v, u, self.weight)
    }

    /// Neighborhood scale of `u`: total (sum) or peak (max) mutual
    /// weight over `u`'s neighbors. Computed once per node per norm.
    fn scale(&mut self, u: NodeIndex, norm: Norm) -> f64 {
        let cache = match norm {
            Norm::Sum => &self.sum_scale,
            Norm::Max => &self.max_scale,
        };
        if let Some(&scale) = cache.get(&u) {
            return scale;
        }

        let graph = self.graph;
        let mut scale = 0.0;
        for w in graph.neighbors(u) {
            let mw = self.mutual_weight(u, w);
            scale = match norm {
                Norm::Sum => scale + mw,
                Norm::Max => scale.max(mw),
            };
        }

        match norm {
            Norm::Sum => self.sum_scale.insert(u, scale),
            Norm::Max => self.max_scale.insert(u, scale),
        };
        scale
    }

    /// Mutual weight of `(u, v)` scaled by `u`'s neighborhood scale.
    ///
    /// A zero scale (isolated node or all-zero weights) resolves to 0,
    /// not NaN, so downstream sums stay well-defined.
    pub(crate) fn normalized_mutual_weight(
        &mut self,
        u: NodeIndex,
        v: NodeIndex,
        norm: Norm,
    ) -> f64 {
        let key = (u, v);
        let cached = match norm {
            Norm::Sum => self.sum_nmw.get(&key),
            Norm::Max => self.max_nmw.get(&key),
        };
        if let Some(&nmw) = cached {
            return nmw;
        }

        let scale = self.scale(u, norm);
        let nmw = if scale == 0.0 {
            0.0
        } else {
            self.mutual_weight(u, v) / scale
        };

        match norm {
            Norm::Sum => self.sum_nmw.insert(key, nmw),
            Norm::Max => self.max_nmw.insert(key, nmw),
        };
        nmw
    }

    /// Burt's local constraint of `u` with respect to `v`.
    ///
    /// `(p_uv + Σ_w p_uw · p_wv)²` over `u`'s neighbors `w`, where `p`
    /// is the sum-normalized mutual weight. The indirect term is the
    /// two-hop fan-out that makes memoization pay off.
    pub(crate) fn local_constraint(&mut self, u: NodeIndex, v: NodeIndex) -> f64 {
        let key = (u, v);
        if let Some(&lc) = self.local_constraint.get(&key) {
            return lc;
        }

        let direct = self.normalized_mutual_weight(u, v, Norm::Sum);
        let graph = self.graph;
        let mut indirect = 0.0;
        for w in graph.neighbors(u) {
            indirect += self.normalized_mutual_weight(u, w, Norm::Sum)
                * self.normalized_mutual_weight(w, v, Norm::Sum);
        }

        let lc = (direct + indirect).powi(2);
        self.local_constraint.insert(key, lc);
        lc
    }

    /// Fraction of the `u`–`v` relationship duplicated through third
    /// parties: `1 - Σ_w p_uw · m_vw` over `u`'s neighbors `w`.
    ///
    /// The `u` side is sum-normalized and the `v` side max-normalized.
    /// The asymmetry is part of the measure's definition.
    pub(crate) fn redundancy(&mut self, u: NodeIndex, v: NodeIndex) -> f64 {
        let graph = self.graph;
        let mut duplicated = 0.0;
        for w in graph.neighbors(u) {
            duplicated += self.normalized_mutual_weight(u, w, Norm::Sum)
                * self.normalized_mutual_weight(v, w, Norm::Max);
        }
        1.0 - duplicated
    }
}

/// Resolve a requested node set to `(label, index)` pairs.
///
/// `None` means every node, in insertion order. An unknown label fails
/// the whole batch.
pub(crate) fn resolve_nodes(
    graph: &AttrGraph,
    nodes: Option<&[&str]>,
) -> Result<Vec<(String, NodeIndex)>, HolesError> {
    match nodes {
        Some(labels) => labels
            .iter()
            .map(|&label| {
                graph
                    .node_index(label)
                    .map(|idx| (label.to_string(), idx))
                    .ok_or_else(|| HolesError::UnknownNode(label.to_string()))
            })
            .collect(),
        None => Ok(graph
            .node_indices()
            .filter_map(|idx| graph.label(idx).map(|label| (label.to_string(), idx)))
            .collect()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
