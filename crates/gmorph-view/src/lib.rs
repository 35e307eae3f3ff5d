#![forbid(unsafe_code)]

//! View driver: generation diffing and transition choreography.
//!
//! # Role in gmorph
//! `gmorph-view` is where the two generations meet. The
//! [`correspond`](correspond::correspond) pass classifies nodes into
//! appearing, vanishing, and remaining; a [`Transition`] turns that
//! classification into the three-phase vanish → move → appear plan; and
//! [`GraphView`] owns both generations, drives the plan with host-loop
//! ticks, and swaps atomically when the last phase completes.
//!
//! # How it fits in the system
//! Hosts hand the view descriptor forests built against `gmorph-core`,
//! implement the [`Surface`] contract (and optionally [`LayoutEngine`]),
//! and call `tick` with frame deltas. The scene model itself lives in
//! `gmorph-scene`.

pub mod clock;
pub mod correspond;
pub mod layout;
pub mod surface;
pub mod transition;
pub mod view;

pub use clock::FrameClock;
pub use correspond::{Correspondence, MatchedPair, correspond};
pub use layout::{LayoutEngine, RasterLayout};
pub use surface::{HeadlessSurface, Surface};
pub use transition::{Transition, TransitionPhase, TransitionStatus};
pub use view::{GraphView, ViewState};
