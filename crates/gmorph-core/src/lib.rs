#![forbid(unsafe_code)]

//! Core: geometry, identity, descriptors, and transition timing.
//!
//! # Role in gmorph
//! `gmorph-core` is the leaf crate. It owns the vocabulary shared by the
//! scene model and the view driver: graph-space geometry, node identity
//! (token ids and access classifiers), the descriptor types a rebuild
//! consumes, easing curves, and the transition configuration.
//!
//! # How it fits in the system
//! The scene crate (`gmorph-scene`) builds visual generations from
//! descriptors; the view crate (`gmorph-view`) diffs generations and
//! drives transitions using the timing configured here. Neither adds
//! new vocabulary of its own, so hosts can construct inputs against
//! this crate alone.

pub mod config;
pub mod descriptor;
pub mod easing;
pub mod geometry;
pub mod identity;

pub use config::TransitionConfig;
pub use descriptor::{EdgeDescriptor, NodeDescriptor, NodePayload};
pub use easing::Easing;
pub use geometry::{Rect, Vec2};
pub use identity::{AccessKind, TokenId};
