#![forbid(unsafe_code)]

//! Visual node model.
//!
//! Nodes live in a per-generation arena and reference each other by
//! index: parent/child links and incident-edge lists are [`NodeId`] /
//! [`EdgeId`] lists rather than nested ownership, so edges and the
//! correspondence matcher work with plain lookups.
//!
//! # Invariants
//!
//! 1. A child's `position` is relative to its parent; root positions
//!    are scene coordinates.
//! 2. Effective opacity is the product of `opacity` along the ancestor
//!    chain: fading a subtree root fades the whole subtree.
//! 3. `parent`, `children`, `in_edges`, and `out_edges` only hold ids
//!    minted by the owning [`Scene`](crate::scene::Scene).

use gmorph_core::geometry::{Rect, Vec2};
use gmorph_core::identity::{AccessKind, TokenId};
use gmorph_core::NodePayload;
use smallvec::SmallVec;

use crate::edge::EdgeId;

/// Index of a node within its generation's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Arena index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Presentation state of a visual node.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NodeFlags: u8 {
        /// Node is shown. Cleared while a remaining pair's new
        /// counterpart waits out the move phase.
        const VISIBLE = 1 << 0;
        /// Semantic highlight carried over from the descriptor.
        const ACTIVE = 1 << 1;
        /// Node is under the cursor.
        const HOVERED = 1 << 2;
        /// Depth cue enabled. Dropped for the duration of a transition.
        const SHADOW = 1 << 3;
        /// Attention ring shown on freshly appeared nodes until their
        /// fade-in completes.
        const BLENDED_OUT = 1 << 4;
        /// Grouping label suppressed while the group collapses into a
        /// leaf during the move phase.
        const LABEL_HIDDEN = 1 << 5;
        /// Node can be dragged by the user. Only root nodes are.
        const MOVEABLE = 1 << 6;
    }
}

/// One displayed node.
#[derive(Debug, Clone)]
pub struct VisualNode {
    /// Token identity or access classifier.
    pub payload: NodePayload,
    /// Position (parent-relative for children).
    pub position: Vec2,
    /// Extent.
    pub size: Vec2,
    /// Own opacity in [0.0, 1.0].
    pub opacity: f32,
    /// Presentation flags.
    pub flags: NodeFlags,
    /// Parent node, if nested.
    pub parent: Option<NodeId>,
    /// Sub-nodes in display order.
    pub children: SmallVec<[NodeId; 4]>,
    /// Edges ending at this node.
    pub in_edges: SmallVec<[EdgeId; 2]>,
    /// Edges starting at this node.
    pub out_edges: SmallVec<[EdgeId; 2]>,
}

impl VisualNode {
    /// Token id, if this is a token node.
    #[inline]
    pub fn token_id(&self) -> Option<TokenId> {
        self.payload.token_id()
    }

    /// Access classifier, if this is an access node.
    #[inline]
    pub fn access_kind(&self) -> Option<AccessKind> {
        self.payload.access_kind()
    }

    /// Whether this is a grouping node.
    #[inline]
    pub fn is_access(&self) -> bool {
        self.payload.is_access()
    }

    /// Whether the node is shown.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.flags.contains(NodeFlags::VISIBLE)
    }

    /// Whether the node has no parent.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Own extent in parent-relative coordinates.
    #[inline]
    pub fn extent(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// Show the node.
    #[inline]
    pub fn show(&mut self) {
        self.flags.insert(NodeFlags::VISIBLE);
    }

    /// Hide the node.
    #[inline]
    pub fn hide(&mut self) {
        self.flags.remove(NodeFlags::VISIBLE);
    }
}
