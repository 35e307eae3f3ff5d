#![forbid(unsafe_code)]

//! gmorph public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports common types from the internal crates and offers a
//! lightweight prelude for day-to-day usage.
//!
//! A typical host builds descriptor forests with [`NodeDescriptor`] and
//! [`EdgeDescriptor`], hands them to a [`GraphView`] over its own
//! [`Surface`] implementation, and calls [`GraphView::tick`] from its
//! frame loop:
//!
//! ```
//! use gmorph::prelude::*;
//!
//! let mut view: GraphView<HeadlessSurface> =
//!     GraphView::new(HeadlessSurface::default(), TransitionConfig::new());
//! let forest = vec![NodeDescriptor::token(TokenId::new(1).unwrap())];
//! view.rebuild_graph(None, &forest, &[]);
//! let mut clock = FrameClock::new();
//! view.tick(clock.delta());
//! ```

// --- Core re-exports -------------------------------------------------------

pub use gmorph_core::config::TransitionConfig;
pub use gmorph_core::descriptor::{EdgeDescriptor, NodeDescriptor, NodePayload};
pub use gmorph_core::easing::Easing;
pub use gmorph_core::geometry::{Rect, Vec2};
pub use gmorph_core::identity::{AccessKind, TokenId};

// --- Scene re-exports ------------------------------------------------------

pub use gmorph_scene::edge::{EdgeId, VisualEdge};
pub use gmorph_scene::node::{NodeFlags, NodeId, VisualNode};
pub use gmorph_scene::scene::{BuildDiagnostics, Scene};

// --- View re-exports -------------------------------------------------------

pub use gmorph_view::clock::FrameClock;
pub use gmorph_view::correspond::{Correspondence, MatchedPair, correspond};
pub use gmorph_view::layout::{LayoutEngine, RasterLayout};
pub use gmorph_view::surface::{HeadlessSurface, Surface};
pub use gmorph_view::transition::{Transition, TransitionPhase, TransitionStatus};
pub use gmorph_view::view::{GraphView, ViewState};

// --- Prelude ---------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        AccessKind, EdgeDescriptor, FrameClock, GraphView, HeadlessSurface, NodeDescriptor,
        NodePayload, Rect, Scene, Surface, TokenId, TransitionConfig, Vec2, ViewState,
    };

    pub use crate::{core, scene, view};
}

pub use gmorph_core as core;
pub use gmorph_scene as scene;
pub use gmorph_view as view;
