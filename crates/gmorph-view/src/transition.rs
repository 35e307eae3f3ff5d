#![forbid(unsafe_code)]

//! Three-phase transition choreography between generations.
//!
//! A [`Transition`] turns a [`Correspondence`] into a sequential plan
//! of up to three phases, each an internally parallel set of tweens:
//!
//! 1. **Vanishing** — nodes without a counterpart and all previous
//!    edges fade out.
//! 2. **Repositioning** — remaining pairs move and resize the previous
//!    node onto the new node's geometry; the new node is revealed and
//!    the old one hidden when its move completes.
//! 3. **Appearing** — new nodes and current edges fade in.
//!
//! The plan is driven by [`tick`](Transition::tick) with elapsed-time
//! deltas from the host loop; there is no internal clock or thread.
//! Tests drive it with large deltas instead of a scheduler.
//!
//! # Invariants
//!
//! 1. Phases run strictly in declared order; a phase starts only after
//!    every tween of the previous phase completed.
//! 2. Within a phase, tweens advance together with no mutual ordering.
//! 3. Empty phases are skipped entirely.
//! 4. Completion effects (reveal handoff, blend-in) fire exactly once
//!    per tween.
//!
//! # Failure Modes
//!
//! - Zero durations complete on the first tick, however small.
//! - Overshoot when a phase finishes mid-tick carries into the next
//!   phase, so one large tick can run the whole plan.

use std::time::Duration;

use gmorph_core::config::TransitionConfig;
use gmorph_core::easing::Easing;
use gmorph_core::geometry::Vec2;
use gmorph_scene::{EdgeId, NodeFlags, NodeId, Scene};

use crate::correspond::Correspondence;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The phase a running transition is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    /// Fading out vanished nodes and previous edges.
    Vanishing,
    /// Moving and resizing remaining nodes.
    Repositioning,
    /// Fading in appeared nodes and current edges.
    Appearing,
}

/// Result of advancing a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStatus {
    /// Animations are still in flight.
    Running,
    /// The plan has completed; the caller performs the generation swap.
    Finished,
}

/// What a tween animates, and on which generation.
#[derive(Debug, Clone, Copy)]
enum TweenTarget {
    CurrentNode(NodeId),
    PreviousNode(NodeId),
    CurrentEdge(EdgeId),
    PreviousEdge(EdgeId),
}

/// The animated property with its endpoint values.
#[derive(Debug, Clone, Copy)]
enum Track {
    Opacity { from: f32, to: f32 },
    Position { from: Vec2, to: Vec2 },
    Size { from: Vec2, to: Vec2 },
}

/// Side effect fired when a tween completes.
#[derive(Debug, Clone, Copy)]
enum AfterTween {
    None,
    /// Reveal the new half of a remaining pair and hide the old half.
    Handoff { new: NodeId, old: NodeId },
    /// Clear the attention ring on a freshly appeared node.
    BlendIn(NodeId),
}

#[derive(Debug)]
struct Tween {
    target: TweenTarget,
    track: Track,
    duration: Duration,
    elapsed: Duration,
    done: bool,
    after: AfterTween,
}

impl Tween {
    fn new(target: TweenTarget, track: Track, duration: Duration) -> Self {
        Self {
            target,
            track,
            duration,
            elapsed: Duration::ZERO,
            done: false,
            after: AfterTween::None,
        }
    }

    fn after(mut self, after: AfterTween) -> Self {
        self.after = after;
        self
    }

    fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.elapsed)
    }

    fn advance(
        &mut self,
        delta: Duration,
        easing: Easing,
        current: &mut Scene,
        previous: &mut Scene,
    ) {
        if self.done {
            return;
        }
        self.elapsed = self.elapsed.saturating_add(delta);

        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };
        self.apply(easing.apply(progress), current, previous);

        if self.elapsed >= self.duration {
            self.done = true;
            fire(self.after, current, previous);
        }
    }

    fn apply(&self, t: f32, current: &mut Scene, previous: &mut Scene) {
        match self.track {
            Track::Opacity { from, to } => {
                let value = from + (to - from) * t;
                match self.target {
                    TweenTarget::CurrentNode(id) => current.node_mut(id).opacity = value,
                    TweenTarget::PreviousNode(id) => previous.node_mut(id).opacity = value,
                    TweenTarget::CurrentEdge(id) => current.edge_mut(id).opacity = value,
                    TweenTarget::PreviousEdge(id) => previous.edge_mut(id).opacity = value,
                }
            }
            Track::Position { from, to } => {
                let value = from.lerp(to, t);
                match self.target {
                    TweenTarget::CurrentNode(id) => current.node_mut(id).position = value,
                    TweenTarget::PreviousNode(id) => previous.node_mut(id).position = value,
                    _ => {}
                }
            }
            Track::Size { from, to } => {
                let value = from.lerp(to, t);
                match self.target {
                    TweenTarget::CurrentNode(id) => current.node_mut(id).size = value,
                    TweenTarget::PreviousNode(id) => previous.node_mut(id).size = value,
                    _ => {}
                }
            }
        }
    }
}

fn fire(after: AfterTween, current: &mut Scene, previous: &mut Scene) {
    match after {
        AfterTween::None => {}
        AfterTween::Handoff { new, old } => {
            current.node_mut(new).show();
            previous.node_mut(old).hide();
        }
        AfterTween::BlendIn(id) => {
            current.node_mut(id).flags.remove(NodeFlags::BLENDED_OUT);
        }
    }
}

struct PhaseGroup {
    phase: TransitionPhase,
    tweens: Vec<Tween>,
}

/// A planned, tick-driven generation transition.
pub struct Transition {
    phases: Vec<PhaseGroup>,
    active: usize,
    easing: Easing,
}

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

impl Transition {
    /// Build the phase plan and apply its immediate side effects.
    ///
    /// Planning prepares both generations for the choreography: depth
    /// cues are dropped, the new half of every remaining pair is hidden
    /// until the move phase hands off, appearing nodes start blended
    /// out at zero opacity, and current edges start fully transparent.
    ///
    /// The no-op fast path is the caller's: when
    /// [`Correspondence::is_noop`] holds, no transition is planned and
    /// the swap happens immediately.
    pub fn plan(
        diff: &Correspondence,
        current: &mut Scene,
        previous: &mut Scene,
        config: &TransitionConfig,
    ) -> Self {
        current.set_shadow_all(false);
        previous.set_shadow_all(false);

        let mut phases = Vec::with_capacity(3);

        // Fade out what has no counterpart, previous edges first-class.
        if !diff.vanishing.is_empty() || !previous.edges().is_empty() {
            let mut tweens = Vec::new();
            for &id in &diff.vanishing {
                tweens.push(Tween::new(
                    TweenTarget::PreviousNode(id),
                    Track::Opacity { from: 1.0, to: 0.0 },
                    config.node_fade,
                ));
            }
            for id in previous.edge_ids() {
                tweens.push(Tween::new(
                    TweenTarget::PreviousEdge(id),
                    Track::Opacity { from: 1.0, to: 0.0 },
                    config.edge_fade,
                ));
            }
            phases.push(PhaseGroup {
                phase: TransitionPhase::Vanishing,
                tweens,
            });
        }

        // Move and resize what persists.
        if !diff.remaining.is_empty() {
            let mut tweens = Vec::new();
            for pair in &diff.remaining {
                let old_node = previous.node(pair.old);
                let new_node = current.node(pair.new);
                let from_position = old_node.position;
                let from_size = old_node.size;
                let to_position = new_node.position;
                let to_size = new_node.size;

                // A group collapsing into a childless leaf keeps its
                // label hidden during the move.
                if new_node.is_access()
                    && current.children(pair.new).is_empty()
                    && !previous.children(pair.old).is_empty()
                {
                    previous
                        .node_mut(pair.old)
                        .flags
                        .insert(NodeFlags::LABEL_HIDDEN);
                }

                current.node_mut(pair.new).hide();

                tweens.push(
                    Tween::new(
                        TweenTarget::PreviousNode(pair.old),
                        Track::Position {
                            from: from_position,
                            to: to_position,
                        },
                        config.move_resize,
                    )
                    .after(AfterTween::Handoff {
                        new: pair.new,
                        old: pair.old,
                    }),
                );
                tweens.push(Tween::new(
                    TweenTarget::PreviousNode(pair.old),
                    Track::Size {
                        from: from_size,
                        to: to_size,
                    },
                    config.move_resize,
                ));
            }
            phases.push(PhaseGroup {
                phase: TransitionPhase::Repositioning,
                tweens,
            });
        }

        // Fade in what is new, current edges first-class.
        if !diff.appearing.is_empty() || !current.edges().is_empty() {
            let mut tweens = Vec::new();
            for &id in &diff.appearing {
                let node = current.node_mut(id);
                node.flags.insert(NodeFlags::BLENDED_OUT);
                node.opacity = 0.0;
                tweens.push(
                    Tween::new(
                        TweenTarget::CurrentNode(id),
                        Track::Opacity { from: 0.0, to: 1.0 },
                        config.node_fade,
                    )
                    .after(AfterTween::BlendIn(id)),
                );
            }
            for id in current.edge_ids().collect::<Vec<_>>() {
                current.edge_mut(id).opacity = 0.0;
                tweens.push(Tween::new(
                    TweenTarget::CurrentEdge(id),
                    Track::Opacity { from: 0.0, to: 1.0 },
                    config.edge_fade,
                ));
            }
            phases.push(PhaseGroup {
                phase: TransitionPhase::Appearing,
                tweens,
            });
        }

        tracing::debug!(
            target: "gmorph.transition",
            phases = phases.len(),
            tweens = phases.iter().map(|p| p.tweens.len()).sum::<usize>(),
            "transition planned"
        );

        Self {
            phases,
            active: 0,
            easing: config.easing,
        }
    }

    // -----------------------------------------------------------------
    // Driving
    // -----------------------------------------------------------------

    /// Phase currently in flight, if any.
    pub fn phase(&self) -> Option<TransitionPhase> {
        self.phases.get(self.active).map(|group| group.phase)
    }

    /// True once every phase has completed.
    pub fn is_finished(&self) -> bool {
        self.active >= self.phases.len()
    }

    /// Advance the plan by `delta`.
    ///
    /// All tweens of the active phase progress together. When the
    /// slowest one completes, the next phase starts within the same
    /// tick using the leftover time.
    pub fn tick(
        &mut self,
        delta: Duration,
        current: &mut Scene,
        previous: &mut Scene,
    ) -> TransitionStatus {
        let mut budget = delta;

        loop {
            let Some(group) = self.phases.get_mut(self.active) else {
                return TransitionStatus::Finished;
            };

            let longest = group
                .tweens
                .iter()
                .map(Tween::remaining)
                .max()
                .unwrap_or(Duration::ZERO);

            for tween in &mut group.tweens {
                tween.advance(budget, self.easing, current, previous);
            }

            if budget < longest {
                return TransitionStatus::Running;
            }

            budget -= longest;
            self.active += 1;
            tracing::debug!(
                target: "gmorph.transition",
                next = ?self.phase(),
                "phase complete"
            );
        }
    }

    /// Run the remaining plan to completion immediately.
    ///
    /// Every tween snaps to its end value and every completion effect
    /// fires, in phase order.
    pub fn finish_now(&mut self, current: &mut Scene, previous: &mut Scene) {
        let _ = self.tick(Duration::MAX, current, previous);
    }
}

impl std::fmt::Debug for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transition")
            .field("phase", &self.phase())
            .field("phases_total", &self.phases.len())
            .field("phases_done", &self.active)
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
