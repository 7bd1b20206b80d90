//! Ego network extraction.
//!
//! The ego subgraph of a node is the induced subgraph over the node plus
//! its open neighborhood: the node, its out-neighbors, and every arc of
//! the original graph whose endpoints both fall in that set. The
//! structural-holes engine uses it for the unweighted effective-size
//! formula and for hierarchy's neighbor count.

use std::collections::HashMap;

use petgraph::{graph::NodeIndex, visit::EdgeRef};

use crate::graph::AttrGraph;

impl AttrGraph {
    /// Build the induced subgraph of `v` plus its open neighborhood.
    ///
    /// The result is a fresh graph with the same directedness; node
    /// indices are renumbered, labels carry over. Attribute maps are
    /// cloned arc by arc, so both arcs of an undirected edge survive.
    #[must_use]
    pub fn ego_subgraph(&self, v: NodeIndex) -> Self {
        let mut ego = if self.is_directed() {
            Self::directed()
        } else {
            Self::undirected()
        };

        // Membership map: original index → ego index, seeded with v.
        let mut members: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        if let Some(label) = self.label(v) {
            members.insert(v, ego.add_node(label));
        }
        for w in self.neighbors(v) {
            if let Some(label) = self.label(w) {
                members.entry(w).or_insert_with(|| ego.add_node(label));
            }
        }

        for edge in self.inner().edge_references() {
            let (Some(&src), Some(&dst)) =
                (members.get(&edge.source()), members.get(&edge.target()))
            else {
                continue;
            };
            ego.add_arc(src, dst, edge.weight().clone());
        }

        ego
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
