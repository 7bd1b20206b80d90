#![forbid(unsafe_code)]
//! egonet-graph library.
//!
//! A small weighted attribute graph used by the structural-holes engine
//! in `egonet-holes`. Nodes carry string labels; edges carry named
//! numeric attributes, any one of which can be selected as the weight
//! for a metric computation.
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums per module.
//! - **Logging**: `tracing` macros (`debug!`, `trace!`).

pub mod ego;
pub mod graph;
pub mod load;

pub use graph::{AttrGraph, EdgeAttrs};
pub use load::LoadError;
