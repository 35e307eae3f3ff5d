#![forbid(unsafe_code)]

//! Scene model: visual nodes, edges, and generation building.
//!
//! # Role in gmorph
//! `gmorph-scene` turns graph descriptors into one displayed
//! generation: an arena of [`VisualNode`]s cross-referenced by index, a
//! list of [`VisualEdge`]s, and the geometry queries (bounds, hit
//! testing) the view driver needs. It holds state and answers queries;
//! diffing and animation live in `gmorph-view`.

pub mod edge;
pub mod node;
pub mod scene;

pub use edge::{EdgeId, VisualEdge};
pub use node::{NodeFlags, NodeId, VisualNode};
pub use scene::{BuildDiagnostics, Scene};
