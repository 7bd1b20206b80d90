//! Graph loading from a JSON edge list.
//!
//! # Format
//!
//! ```json
//! {
//!   "directed": false,
//!   "nodes": ["a", "b", "lone"],
//!   "edges": [
//!     { "source": "a", "target": "b", "attrs": { "weight": 3.0 } }
//!   ]
//! }
//! ```
//!
//! `nodes` is optional and only needed for isolated nodes — edge
//! endpoints are added implicitly. `attrs` defaults to empty (an
//! unweighted edge).

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::graph::{AttrGraph, EdgeAttrs};

/// Errors from graph loading.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The input was not valid JSON for the edge-list schema.
    #[error("invalid graph JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct GraphDoc {
    #[serde(default)]
    directed: bool,
    #[serde(default)]
    nodes: Vec<String>,
    #[serde(default)]
    edges: Vec<EdgeDoc>,
}

#[derive(Debug, Deserialize)]
struct EdgeDoc {
    source: String,
    target: String,
    #[serde(default)]
    attrs: EdgeAttrs,
}

/// Parse a JSON edge list into an [`AttrGraph`].
///
/// # Errors
///
/// Returns [`LoadError::Parse`] if the input does not match the schema.
#[instrument(skip(input))]
pub fn from_json_str(input: &str) -> Result<AttrGraph, LoadError> {
    let doc: GraphDoc = serde_json::from_str(input)?;

    let mut graph = if doc.directed {
        AttrGraph::directed()
    } else {
        AttrGraph::undirected()
    };

    for label in &doc.nodes {
        graph.add_node(label);
    }
    for edge in doc.edges {
        graph.add_edge(&edge.source, &edge.target, edge.attrs);
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.size(),
        directed = graph.is_directed(),
        "loaded graph"
    );
    Ok(graph)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
