#![forbid(unsafe_code)]

//! The graph view: generation bookkeeping and transition driving.
//!
//! [`GraphView`] owns the current and previous generations, rebuilds
//! the current one from descriptors, diffs it against the outgoing one,
//! and plays the transition. The swap to the new generation happens
//! atomically inside the `tick` that completes the final phase: callers
//! observe either the old displayed state or the new one, never a mix.
//!
//! # State machine
//!
//! `Idle → Building → Diffing → Transitioning → Idle`, with `clear`
//! reachable from every state. `Building` and `Diffing` are transient
//! within `rebuild_graph`; `Transitioning` is the only state in which
//! the surface is non-interactive.
//!
//! # Concurrency
//!
//! Single-threaded by construction. The host loop calls `tick` with
//! frame deltas; nothing here blocks or spawns.

use std::time::Duration;

use gmorph_core::config::TransitionConfig;
use gmorph_core::descriptor::{EdgeDescriptor, NodeDescriptor};
use gmorph_core::geometry::Vec2;
use gmorph_scene::{BuildDiagnostics, NodeFlags, NodeId, Scene};

use crate::correspond::correspond;
use crate::layout::{LayoutEngine, RasterLayout};
use crate::surface::Surface;
use crate::transition::{Transition, TransitionPhase, TransitionStatus};

/// Lifecycle state of the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    /// One generation at rest (or none).
    #[default]
    Idle,
    /// Instantiating a new generation from descriptors.
    Building,
    /// Computing the correspondence against the outgoing generation.
    Diffing,
    /// Playing the transition; the surface is non-interactive.
    Transitioning,
}

/// One generation together with its semantic graph handle.
struct Generation<G> {
    scene: Scene,
    graph: Option<G>,
}

impl<G> Generation<G> {
    fn empty() -> Self {
        Self {
            scene: Scene::empty(),
            graph: None,
        }
    }
}

/// Hierarchical graph view with animated generation transitions.
///
/// `S` is the host rendering surface; `G` is an opaque semantic graph
/// handle kept alive alongside each generation and swapped with it.
pub struct GraphView<S: Surface, G = ()> {
    surface: S,
    layout: Box<dyn LayoutEngine>,
    config: TransitionConfig,
    current: Option<Generation<G>>,
    previous: Option<Generation<G>>,
    transition: Option<Transition>,
    state: ViewState,
    scene_rect_offset: Vec2,
    cursor: Option<Vec2>,
    hovered: Option<NodeId>,
}

impl<S: Surface, G> GraphView<S, G> {
    /// Create a view with the default grid-snapping layout.
    pub fn new(surface: S, config: TransitionConfig) -> Self {
        let layout = Box::new(RasterLayout::new(config.raster_cell));
        Self::with_layout(surface, layout, config)
    }

    /// Create a view with a custom layout collaborator.
    pub fn with_layout(
        surface: S,
        layout: Box<dyn LayoutEngine>,
        config: TransitionConfig,
    ) -> Self {
        Self {
            surface,
            layout,
            config,
            current: None,
            previous: None,
            transition: None,
            state: ViewState::Idle,
            scene_rect_offset: Vec2::ZERO,
            cursor: None,
            hovered: None,
        }
    }

    // -----------------------------------------------------------------
    // Rebuild / clear / resize
    // -----------------------------------------------------------------

    /// Install a new generation and transition to it.
    ///
    /// The descriptors become the current generation; the outgoing one
    /// is kept as previous until the transition completes. When the
    /// diff shows no structural churn the swap is an instant cut, even
    /// if edge sets differ.
    ///
    /// A rebuild arriving while a transition is still in flight first
    /// completes that transition instantly, then proceeds.
    pub fn rebuild_graph(
        &mut self,
        graph: Option<G>,
        nodes: &[NodeDescriptor],
        edges: &[EdgeDescriptor],
    ) -> BuildDiagnostics {
        if self.transition.is_some() {
            tracing::debug!(
                target: "gmorph.view",
                "rebuild during transition; completing in-flight plan"
            );
            self.finish_in_flight();
        }

        self.state = ViewState::Building;
        let (mut scene, diagnostics) = Scene::build(nodes, edges);
        self.layout.postprocess(&mut scene);

        // Center the forest on the layout raster and remember how far
        // the visible rectangle must shift back.
        let center = scene.bounding_rect().center();
        let aligned = self.layout.align_to_raster(center);
        self.scene_rect_offset = aligned - center;
        scene.translate_roots(-aligned);

        let outgoing = self.current.take().unwrap_or_else(Generation::empty);
        self.current = Some(Generation { scene, graph });
        self.previous = Some(outgoing);

        self.state = ViewState::Diffing;
        let (Some(current), Some(previous)) = (self.current.as_mut(), self.previous.as_mut())
        else {
            return diagnostics;
        };
        let diff = correspond(&current.scene, &previous.scene);

        if diff.is_noop() {
            tracing::debug!(target: "gmorph.view", "no structural churn; instant swap");
            self.complete_swap();
        } else {
            self.surface.set_interactive(false);
            self.transition = Some(Transition::plan(
                &diff,
                &mut current.scene,
                &mut previous.scene,
                &self.config,
            ));
            self.state = ViewState::Transitioning;
        }

        diagnostics
    }

    /// Discard both generations and any in-flight transition.
    pub fn clear(&mut self) {
        self.current = None;
        self.previous = None;
        self.transition = None;
        self.hovered = None;
        self.scene_rect_offset = Vec2::ZERO;
        self.state = ViewState::Idle;
        self.surface.set_interactive(true);
        tracing::debug!(target: "gmorph.view", "view cleared");
    }

    /// Recompute the visible scene rectangle from the displayed
    /// generation's bounds, expanded by the configured margin and
    /// shifted by the stored centering offset.
    pub fn resize_view(&mut self) {
        let bounds = self
            .displayed()
            .map(Scene::bounding_rect)
            .unwrap_or_default();
        let rect = bounds
            .expand(self.config.scene_margin)
            .translated(self.scene_rect_offset);
        self.surface.set_scene_rect(rect);
    }

    /// Current viewport size reported by the surface.
    pub fn view_size(&self) -> Vec2 {
        self.surface.view_size()
    }

    // -----------------------------------------------------------------
    // Driving
    // -----------------------------------------------------------------

    /// Advance the in-flight transition by `delta`.
    ///
    /// When the final phase completes within this call, the generation
    /// swap runs before the call returns.
    pub fn tick(&mut self, delta: Duration) {
        let finished = match (
            self.transition.as_mut(),
            self.current.as_mut(),
            self.previous.as_mut(),
        ) {
            (Some(transition), Some(current), Some(previous)) => {
                transition.tick(delta, &mut current.scene, &mut previous.scene)
                    == TransitionStatus::Finished
            }
            _ => false,
        };

        if finished {
            self.complete_swap();
        }
    }

    /// Record the cursor position and update hover when interactive.
    ///
    /// During a transition the position is only recorded; the hover
    /// probe re-runs against the fresh node set after the swap.
    pub fn pointer_moved(&mut self, at: Vec2) {
        self.cursor = Some(at);
        if self.state == ViewState::Idle {
            self.apply_hover(at);
        }
    }

    fn finish_in_flight(&mut self) {
        if let (Some(transition), Some(current), Some(previous)) = (
            self.transition.as_mut(),
            self.current.as_mut(),
            self.previous.as_mut(),
        ) {
            transition.finish_now(&mut current.scene, &mut previous.scene);
        }
        self.complete_swap();
    }

    fn complete_swap(&mut self) {
        self.transition = None;
        self.previous = None;
        if let Some(current) = self.current.as_mut() {
            current.scene.set_shadow_all(true);
        }
        self.surface.set_interactive(true);
        self.state = ViewState::Idle;
        self.resize_view();
        self.refresh_hover();
        tracing::debug!(target: "gmorph.view", "generation swap complete");
    }

    fn refresh_hover(&mut self) {
        // Node identities changed even where logical identity survived;
        // the old hover target is meaningless now.
        self.hovered = None;
        if let Some(at) = self.cursor {
            self.apply_hover(at);
        }
    }

    fn apply_hover(&mut self, at: Vec2) {
        let Some(current) = self.current.as_mut() else {
            self.hovered = None;
            return;
        };
        if let Some(old) = self.hovered.take() {
            current.scene.node_mut(old).flags.remove(NodeFlags::HOVERED);
        }
        let hit = current.scene.hit_test(at);
        if let Some(id) = hit {
            current.scene.node_mut(id).flags.insert(NodeFlags::HOVERED);
        }
        self.hovered = hit;
    }

    // -----------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------

    /// Lifecycle state.
    pub fn state(&self) -> ViewState {
        self.state
    }

    /// Phase of the in-flight transition, if any.
    pub fn transition_phase(&self) -> Option<TransitionPhase> {
        self.transition.as_ref().and_then(Transition::phase)
    }

    /// The generation being displayed: the previous one while a
    /// transition plays it out, otherwise the current one.
    pub fn displayed(&self) -> Option<&Scene> {
        match self.state {
            ViewState::Transitioning => self.previous.as_ref().map(|g| &g.scene),
            _ => self.current.as_ref().map(|g| &g.scene),
        }
    }

    /// The current (incoming or at-rest) generation.
    pub fn current(&self) -> Option<&Scene> {
        self.current.as_ref().map(|g| &g.scene)
    }

    /// Semantic graph handle of the current generation.
    pub fn graph(&self) -> Option<&G> {
        self.current.as_ref().and_then(|g| g.graph.as_ref())
    }

    /// Node under the cursor, in the current generation.
    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    /// Borrow the surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutably borrow the surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The transition configuration.
    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }
}

impl<S: Surface, G> std::fmt::Debug for GraphView<S, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphView")
            .field("state", &self.state)
            .field("current", &self.current.as_ref().map(|g| g.scene.node_count()))
            .field(
                "previous",
                &self.previous.as_ref().map(|g| g.scene.node_count()),
            )
            .field("transitioning", &self.transition.is_some())
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
