#![forbid(unsafe_code)]
//! egonet-holes library.
//!
//! # Overview
//!
//! Burt's structural-holes measures over an [`egonet_graph::AttrGraph`]:
//!
//! - **Constraint** (`constraint`): how much a node's relationships are
//!   hemmed in by interconnected third parties.
//! - **Effective size** (`effective_size`): the non-redundant portion of
//!   a node's neighborhood, with the pairwise `redundancy` it is built
//!   from.
//! - **Hierarchy** (`hierarchy`): how unevenly constraint is spread
//!   across a node's neighbors.
//!
//! All metrics take an optional node subset (`None` = every node) and an
//! optional edge-attribute name to use as the weight (`None` =
//! unweighted), and return a map from node label to score. Undefined
//! cases (isolated nodes for constraint and effective size) come back as
//! `f64::NAN` — a valid, queryable outcome, not an error. Requesting a
//! label the graph does not contain is a contract violation and fails
//! fast with [`HolesError::UnknownNode`].
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums, `Result` + `?` propagation.
//! - **Logging**: `tracing` macros (`debug!`, `instrument`).

pub mod constraint;
pub mod effective_size;
pub mod hierarchy;

mod engine;

pub use constraint::constraint;
pub use effective_size::{effective_size, redundancy};
pub use hierarchy::hierarchy;

/// Errors from structural-holes computations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HolesError {
    /// A requested node label is not present in the graph.
    #[error("unknown node: {0}")]
    UnknownNode(String),
}
