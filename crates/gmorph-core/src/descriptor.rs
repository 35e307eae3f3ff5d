#![forbid(unsafe_code)]

//! Graph input descriptors.
//!
//! A rebuild takes a flat description of the graph to display: a forest
//! of [`NodeDescriptor`]s (children nested inline) and a list of
//! [`EdgeDescriptor`]s referencing nodes by token id. Descriptors are
//! plain data produced by the layout collaborator; building a scene
//! from them never mutates them.
//!
//! # Invariants
//!
//! 1. An invisible descriptor produces no visual object, and its
//!    subtree is not visited.
//! 2. Edge endpoints are token ids; edges between access nodes are not
//!    representable.
//! 3. Positions of child descriptors are relative to their parent;
//!    root positions are in scene coordinates.

use crate::geometry::Vec2;
use crate::identity::{AccessKind, TokenId};

/// Identity payload of a node descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodePayload {
    /// A node backed by a persistent semantic entity.
    Token {
        /// Stable id of the entity.
        id: TokenId,
    },
    /// A synthetic grouping node with no identity of its own.
    Access {
        /// Grouping category.
        kind: AccessKind,
        /// Whether the group is expanded to show its members.
        expanded: bool,
        /// Number of members elided from the expanded view.
        hidden_child_count: u32,
    },
}

impl NodePayload {
    /// Token id, if this is a token node.
    #[inline]
    pub fn token_id(&self) -> Option<TokenId> {
        match self {
            Self::Token { id } => Some(*id),
            Self::Access { .. } => None,
        }
    }

    /// Access classifier, if this is an access node.
    #[inline]
    pub fn access_kind(&self) -> Option<AccessKind> {
        match self {
            Self::Token { .. } => None,
            Self::Access { kind, .. } => Some(*kind),
        }
    }

    /// Whether this is a grouping node.
    #[inline]
    pub fn is_access(&self) -> bool {
        matches!(self, Self::Access { .. })
    }
}

/// Description of one node to display, with its nested sub-nodes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeDescriptor {
    /// Invisible descriptors are skipped entirely, subtree included.
    pub visible: bool,
    /// Token identity or access classifier.
    pub payload: NodePayload,
    /// Position assigned by layout (parent-relative for children).
    pub position: Vec2,
    /// Extent assigned by layout.
    pub size: Vec2,
    /// Highlight state carried over from the semantic model.
    pub active: bool,
    /// Nested sub-node descriptors, in display order.
    pub children: Vec<NodeDescriptor>,
}

impl NodeDescriptor {
    /// A visible token node with zeroed geometry.
    pub fn token(id: TokenId) -> Self {
        Self {
            visible: true,
            payload: NodePayload::Token { id },
            position: Vec2::ZERO,
            size: Vec2::ZERO,
            active: false,
            children: Vec::new(),
        }
    }

    /// A visible, expanded access node with zeroed geometry.
    pub fn access(kind: AccessKind) -> Self {
        Self {
            visible: true,
            payload: NodePayload::Access {
                kind,
                expanded: true,
                hidden_child_count: 0,
            },
            position: Vec2::ZERO,
            size: Vec2::ZERO,
            active: false,
            children: Vec::new(),
        }
    }

    /// Set the layouted position.
    #[must_use]
    pub fn at(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    /// Set the layouted size.
    #[must_use]
    pub fn sized(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    /// Set the highlight state.
    #[must_use]
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Mark the descriptor invisible.
    #[must_use]
    pub fn invisible(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Attach sub-node descriptors.
    #[must_use]
    pub fn children(mut self, children: Vec<NodeDescriptor>) -> Self {
        self.children = children;
        self
    }
}

/// Description of one edge to display.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeDescriptor {
    /// Invisible descriptors are skipped.
    pub visible: bool,
    /// Token id of the owning node.
    pub owner: TokenId,
    /// Token id of the target node.
    pub target: TokenId,
    /// Semantic edge reference, if any.
    pub token: Option<TokenId>,
    /// Display name, used in diagnostics when the edge cannot be built.
    pub name: String,
    /// Highlight state carried over from the semantic model.
    pub active: bool,
}

impl EdgeDescriptor {
    /// A visible edge between two token nodes.
    pub fn new(owner: TokenId, target: TokenId, name: impl Into<String>) -> Self {
        Self {
            visible: true,
            owner,
            target,
            token: None,
            name: name.into(),
            active: false,
        }
    }

    /// Set the semantic edge reference.
    #[must_use]
    pub fn token(mut self, token: TokenId) -> Self {
        self.token = Some(token);
        self
    }

    /// Set the highlight state.
    #[must_use]
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Mark the descriptor invisible.
    #[must_use]
    pub fn invisible(mut self) -> Self {
        self.visible = false;
        self
    }
}
