//! Weighted attribute graph over string-labeled nodes.
//!
//! # Overview
//!
//! [`AttrGraph`] wraps a [`petgraph`] directed graph and adds the three
//! things the structural-holes engine needs from its graph collaborator:
//!
//! 1. **Label ⇄ index translation** — callers speak in string labels,
//!    the engine speaks in `NodeIndex` handles. The mapping is stable
//!    for the lifetime of the graph.
//! 2. **Undirected emulation** — an undirected graph stores each edge as
//!    two arcs sharing one attribute map, so adjacency lookups are the
//!    same code path for both kinds.
//! 3. **The weight defaulting rule** — `edge_weight(u, v, key)` is 0
//!    when the arc is absent, 1 when the arc exists but the attribute
//!    (or the key itself) is absent, and the attribute value otherwise.
//!
//! ## Edge attributes
//!
//! Edges carry a `HashMap<String, f64>`. Selecting `None` as the weight
//! key treats the graph as unweighted: every present arc counts 1.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

/// Named numeric attributes attached to one edge.
pub type EdgeAttrs = HashMap<String, f64>;

// ---------------------------------------------------------------------------
// AttrGraph
// ---------------------------------------------------------------------------

/// A weighted graph with string-labeled nodes and attribute-carrying edges.
///
/// Directedness is fixed at construction. Undirected graphs store both
/// arcs per edge, so `neighbors` and `edge_weight` never need to branch
/// on direction.
#[derive(Debug, Clone, Default)]
pub struct AttrGraph {
    graph: DiGraph<String, EdgeAttrs>,
    node_map: HashMap<String, NodeIndex>,
    directed: bool,
}

impl AttrGraph {
    /// Create an empty directed graph.
    #[must_use]
    pub fn directed() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
            directed: true,
        }
    }

    /// Create an empty undirected graph.
    #[must_use]
    pub fn undirected() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
            directed: false,
        }
    }

    /// Return `true` if the graph was constructed as directed.
    #[must_use]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Add a node with the given label, or return the existing index if
    /// the label is already present.
    pub fn add_node(&mut self, label: &str) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(label) {
            return idx;
        }
        let idx = self.graph.add_node(label.to_string());
        self.node_map.insert(label.to_string(), idx);
        idx
    }

    /// Add an edge between two labels, creating missing endpoints.
    ///
    /// For undirected graphs both arcs are inserted with a copy of the
    /// same attribute map. Re-adding an existing edge replaces its
    /// attributes rather than creating a parallel arc.
    pub fn add_edge(&mut self, a: &str, b: &str, attrs: EdgeAttrs) {
        let ia = self.add_node(a);
        let ib = self.add_node(b);
        if !self.directed && ia != ib {
            self.graph.update_edge(ib, ia, attrs.clone());
        }
        self.graph.update_edge(ia, ib, attrs);
    }

    /// Look up the `NodeIndex` for a label.
    #[must_use]
    pub fn node_index(&self, label: &str) -> Option<NodeIndex> {
        self.node_map.get(label).copied()
    }

    /// Return the label for a node index.
    #[must_use]
    pub fn label(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(String::as_str)
    }

    /// Iterate all node indices in insertion order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Return the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Iterate the out-neighbors of a node.
    ///
    /// This is the adjacency view the structural-holes formulas iterate:
    /// successors for directed graphs, all neighbors for undirected ones
    /// (both arcs are stored).
    pub fn neighbors(&self, u: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors_directed(u, Direction::Outgoing)
    }

    /// Return the out-degree of a node.
    #[must_use]
    pub fn degree(&self, u: NodeIndex) -> usize {
        self.neighbors(u).count()
    }

    /// Return `true` if the arc `u → v` exists.
    #[must_use]
    pub fn has_edge(&self, u: NodeIndex, v: NodeIndex) -> bool {
        self.graph.contains_edge(u, v)
    }

    /// Return the weight of the arc `u → v` under the given weight key.
    ///
    /// - `0.0` when the arc is absent;
    /// - `1.0` when the arc exists and `weight` is `None` (unweighted)
    ///   or the named attribute is missing;
    /// - the attribute value otherwise.
    #[must_use]
    pub fn edge_weight(&self, u: NodeIndex, v: NodeIndex, weight: Option<&str>) -> f64 {
        let Some(edge) = self.graph.find_edge(u, v) else {
            return 0.0;
        };
        match weight {
            Some(key) => self.graph[edge].get(key).copied().unwrap_or(1.0),
            None => 1.0,
        }
    }

    /// Return the logical edge count.
    ///
    /// Directed graphs count arcs. Undirected graphs count each stored
    /// arc pair once; self-loops (stored as a single arc) count once.
    #[must_use]
    pub fn size(&self) -> usize {
        if self.directed {
            self.graph.edge_count()
        } else {
            self.graph
                .edge_references()
                .filter(|e| e.source().index() <= e.target().index())
                .count()
        }
    }

    /// Remove a node and all its incident edges.
    ///
    /// Returns `false` if the label is unknown. Removal renumbers node
    /// indices, so the label map is rebuilt; only throwaway derived
    /// graphs (ego networks) are ever mutated this way.
    pub fn remove_node(&mut self, label: &str) -> bool {
        let Some(idx) = self.node_index(label) else {
            return false;
        };
        self.graph.remove_node(idx);
        self.node_map.clear();
        for idx in self.graph.node_indices() {
            self.node_map.insert(self.graph[idx].clone(), idx);
        }
        true
    }

    /// Borrow the underlying petgraph structure.
    #[must_use]
    pub(crate) fn inner(&self) -> &DiGraph<String, EdgeAttrs> {
        &self.graph
    }

    /// Insert a raw arc by index, used when deriving subgraphs.
    pub(crate) fn add_arc(&mut self, u: NodeIndex, v: NodeIndex, attrs: EdgeAttrs) {
        self.graph.update_edge(u, v, attrs);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, f64)]) -> EdgeAttrs {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), *v))
            .collect()
    }

    #[test]
    fn add_node_is_idempotent() {
        let mut g = AttrGraph::directed();
        let a1 = g.add_node("a");
        let a2 = g.add_node("a");
        assert_eq!(a1, a2);
        assert_eq!(g.node_count(), 1);
    }

    #[test]
    fn add_edge_creates_endpoints() {
        let mut g = AttrGraph::directed();
        g.add_edge("a", "b", EdgeAttrs::new());
        assert_eq!(g.node_count(), 2);
        let a = g.node_index("a").expect("a");
        let b = g.node_index("b").expect("b");
        assert!(g.has_edge(a, b));
        assert!(!g.has_edge(b, a), "directed edge has no reverse arc");
    }

    #[test]
    fn undirected_edge_stores_both_arcs() {
        let mut g = AttrGraph::undirected();
        g.add_edge("a", "b", attrs(&[("w", 3.0)]));
        let a = g.node_index("a").expect("a");
        let b = g.node_index("b").expect("b");
        assert!(g.has_edge(a, b));
        assert!(g.has_edge(b, a));
        assert!((g.edge_weight(a, b, Some("w")) - 3.0).abs() < 1e-12);
        assert!((g.edge_weight(b, a, Some("w")) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn edge_weight_defaulting_rule() {
        let mut g = AttrGraph::directed();
        g.add_edge("a", "b", attrs(&[("w", 2.5)]));
        let a = g.node_index("a").expect("a");
        let b = g.node_index("b").expect("b");

        // Absent arc → 0 regardless of key.
        assert!((g.edge_weight(b, a, Some("w")) - 0.0).abs() < 1e-12);
        assert!((g.edge_weight(b, a, None) - 0.0).abs() < 1e-12);
        // Present arc, no key → 1.
        assert!((g.edge_weight(a, b, None) - 1.0).abs() < 1e-12);
        // Present arc, missing attribute → 1.
        assert!((g.edge_weight(a, b, Some("cost")) - 1.0).abs() < 1e-12);
        // Present arc, attribute present → value.
        assert!((g.edge_weight(a, b, Some("w")) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn readding_edge_replaces_attributes() {
        let mut g = AttrGraph::undirected();
        g.add_edge("a", "b", attrs(&[("w", 1.0)]));
        g.add_edge("a", "b", attrs(&[("w", 9.0)]));
        let a = g.node_index("a").expect("a");
        let b = g.node_index("b").expect("b");
        assert!((g.edge_weight(a, b, Some("w")) - 9.0).abs() < 1e-12);
        assert_eq!(g.size(), 1, "no parallel arcs");
    }

    #[test]
    fn size_counts_undirected_pairs_once() {
        let mut g = AttrGraph::undirected();
        g.add_edge("a", "b", EdgeAttrs::new());
        g.add_edge("b", "c", EdgeAttrs::new());
        assert_eq!(g.size(), 2);

        let mut d = AttrGraph::directed();
        d.add_edge("a", "b", EdgeAttrs::new());
        d.add_edge("b", "a", EdgeAttrs::new());
        assert_eq!(d.size(), 2, "directed arcs count individually");
    }

    #[test]
    fn neighbors_are_successors() {
        let mut g = AttrGraph::directed();
        g.add_edge("a", "b", EdgeAttrs::new());
        g.add_edge("c", "a", EdgeAttrs::new());
        let a = g.node_index("a").expect("a");
        let b = g.node_index("b").expect("b");
        let ns: Vec<_> = g.neighbors(a).collect();
        assert_eq!(ns, vec![b], "incoming arcs are not neighbors");
        assert_eq!(g.degree(a), 1);
    }

    #[test]
    fn remove_node_drops_incident_edges_and_remaps() {
        let mut g = AttrGraph::undirected();
        g.add_edge("a", "b", EdgeAttrs::new());
        g.add_edge("b", "c", EdgeAttrs::new());
        g.add_edge("a", "c", EdgeAttrs::new());

        assert!(g.remove_node("b"));
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.size(), 1, "only a-c remains");

        // Labels still resolve after index renumbering.
        let a = g.node_index("a").expect("a survives");
        let c = g.node_index("c").expect("c survives");
        assert!(g.has_edge(a, c));
        assert!(g.node_index("b").is_none());
    }

    #[test]
    fn remove_unknown_label_is_noop() {
        let mut g = AttrGraph::directed();
        g.add_node("a");
        assert!(!g.remove_node("zzz"));
        assert_eq!(g.node_count(), 1);
    }
}
