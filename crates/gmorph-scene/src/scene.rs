#![forbid(unsafe_code)]

//! One generation of the displayed graph.
//!
//! A [`Scene`] is a self-consistent snapshot: a node arena, the root
//! list, the edge list, and a token index for edge resolution. At most
//! two scenes exist per view at any time, the current one and the
//! previous one being phased out by a transition.
//!
//! # Invariants
//!
//! 1. Nodes are created before edges; an edge with an unresolvable
//!    endpoint is skipped with a warning, never an error.
//! 2. Ids handed out by a scene are valid for that scene's lifetime;
//!    the arena never shrinks.
//! 3. A node's bounding region is the union of its own extent and all
//!    descendants' extents.
//!
//! # Failure Modes
//!
//! - Invisible node descriptors produce nothing; their subtrees are not
//!   visited.
//! - Duplicate token ids keep the first occurrence in the index; later
//!   nodes still exist but cannot anchor edges.

use ahash::AHashMap;
use gmorph_core::descriptor::{EdgeDescriptor, NodeDescriptor};
use gmorph_core::geometry::{Rect, Vec2};
use gmorph_core::identity::TokenId;
use smallvec::SmallVec;

use crate::edge::{EdgeId, VisualEdge};
use crate::node::{NodeFlags, NodeId, VisualNode};

/// Non-fatal findings from building a generation.
///
/// Everything here is also emitted as `tracing` events under the
/// `gmorph.scene` target; the struct exists so hosts can count or
/// surface the findings without a subscriber.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildDiagnostics {
    /// Descriptor subtrees skipped because their root was invisible.
    pub skipped_invisible_nodes: usize,
    /// Names of edges dropped because an endpoint was missing.
    pub skipped_edges: Vec<String>,
}

impl BuildDiagnostics {
    /// True when the build consumed every descriptor.
    pub fn is_clean(&self) -> bool {
        self.skipped_invisible_nodes == 0 && self.skipped_edges.is_empty()
    }
}

/// One generation: node forest plus edge list.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: Vec<VisualNode>,
    edges: Vec<VisualEdge>,
    roots: Vec<NodeId>,
    by_token: AHashMap<TokenId, NodeId>,
}

impl Scene {
    /// An empty generation.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a generation from descriptors.
    ///
    /// Nodes are instantiated depth-first, then edges are resolved
    /// against the finished node set. The descriptors are not mutated.
    pub fn build(nodes: &[NodeDescriptor], edges: &[EdgeDescriptor]) -> (Self, BuildDiagnostics) {
        let mut scene = Self::empty();
        let mut diagnostics = BuildDiagnostics::default();

        for descriptor in nodes {
            if let Some(id) = scene.insert_node(descriptor, None, &mut diagnostics) {
                scene.roots.push(id);
            }
        }

        for descriptor in edges {
            scene.insert_edge(descriptor, &mut diagnostics);
        }

        tracing::debug!(
            target: "gmorph.scene",
            nodes = scene.nodes.len(),
            edges = scene.edges.len(),
            skipped_edges = diagnostics.skipped_edges.len(),
            "generation built"
        );

        (scene, diagnostics)
    }

    fn insert_node(
        &mut self,
        descriptor: &NodeDescriptor,
        parent: Option<NodeId>,
        diagnostics: &mut BuildDiagnostics,
    ) -> Option<NodeId> {
        if !descriptor.visible {
            diagnostics.skipped_invisible_nodes += 1;
            return None;
        }

        let id = NodeId(self.nodes.len() as u32);
        let mut flags = NodeFlags::VISIBLE | NodeFlags::SHADOW;
        if descriptor.active {
            flags.insert(NodeFlags::ACTIVE);
        }
        if parent.is_none() {
            flags.insert(NodeFlags::MOVEABLE);
        }

        self.nodes.push(VisualNode {
            payload: descriptor.payload,
            position: descriptor.position,
            size: descriptor.size,
            opacity: 1.0,
            flags,
            parent,
            children: SmallVec::new(),
            in_edges: SmallVec::new(),
            out_edges: SmallVec::new(),
        });

        if let Some(token) = descriptor.payload.token_id() {
            self.by_token.entry(token).or_insert(id);
        }

        for child in &descriptor.children {
            if let Some(child_id) = self.insert_node(child, Some(id), diagnostics) {
                self.nodes[id.index()].children.push(child_id);
            }
        }

        Some(id)
    }

    fn insert_edge(&mut self, descriptor: &EdgeDescriptor, diagnostics: &mut BuildDiagnostics) {
        if !descriptor.visible {
            return;
        }

        let owner = self.find_token(descriptor.owner);
        let target = self.find_token(descriptor.target);
        let (Some(owner), Some(target)) = (owner, target) else {
            tracing::warn!(
                target: "gmorph.scene",
                edge = %descriptor.name,
                "owner or target node missing; edge skipped"
            );
            diagnostics.skipped_edges.push(descriptor.name.clone());
            return;
        };

        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(VisualEdge {
            owner,
            target,
            token: descriptor.token,
            name: descriptor.name.clone(),
            active: descriptor.active,
            opacity: 1.0,
        });
        self.nodes[owner.index()].out_edges.push(id);
        self.nodes[target.index()].in_edges.push(id);
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// True when the generation holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Root node ids in display order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Borrow a node.
    pub fn node(&self, id: NodeId) -> &VisualNode {
        &self.nodes[id.index()]
    }

    /// Mutably borrow a node.
    pub fn node_mut(&mut self, id: NodeId) -> &mut VisualNode {
        &mut self.nodes[id.index()]
    }

    /// Child ids of a node in display order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    /// Iterate all node ids in creation order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    /// All edges.
    pub fn edges(&self) -> &[VisualEdge] {
        &self.edges
    }

    /// Edge ids in creation order.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        (0..self.edges.len() as u32).map(EdgeId)
    }

    /// Borrow an edge.
    pub fn edge(&self, id: EdgeId) -> &VisualEdge {
        &self.edges[id.index()]
    }

    /// Mutably borrow an edge.
    pub fn edge_mut(&mut self, id: EdgeId) -> &mut VisualEdge {
        &mut self.edges[id.index()]
    }

    /// Node carrying the given token id, if present.
    pub fn find_token(&self, token: TokenId) -> Option<NodeId> {
        self.by_token.get(&token).copied()
    }

    /// Absolute position of a node (ancestor positions summed).
    pub fn absolute_position(&self, id: NodeId) -> Vec2 {
        let mut position = Vec2::ZERO;
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.node(current);
            position = position + node.position;
            cursor = node.parent;
        }
        position
    }

    /// Opacity the node is painted with: its own multiplied by every
    /// ancestor's, so fading a subtree root fades the whole subtree.
    pub fn effective_opacity(&self, id: NodeId) -> f32 {
        let mut opacity = 1.0;
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.node(current);
            opacity *= node.opacity;
            cursor = node.parent;
        }
        opacity
    }

    /// Bounding region of a node: its own extent united with every
    /// descendant's, in scene coordinates.
    pub fn node_bounds(&self, id: NodeId) -> Rect {
        let origin = self.absolute_position(id);
        let mut bounds = Rect::from_origin_size(origin, self.node(id).size);
        for &child in self.children(id) {
            bounds = bounds.union(&self.node_bounds(child));
        }
        bounds
    }

    /// Bounding box of the whole forest, in scene coordinates.
    pub fn bounding_rect(&self) -> Rect {
        let mut bounds = Rect::default();
        for &root in &self.roots {
            bounds = bounds.union(&self.node_bounds(root));
        }
        bounds
    }

    /// Topmost visible node containing `point`, in paint order: later
    /// siblings over earlier ones, children over their parent. A hidden
    /// node hides its whole subtree.
    pub fn hit_test(&self, point: Vec2) -> Option<NodeId> {
        fn visit(
            scene: &Scene,
            id: NodeId,
            origin: Vec2,
            point: Vec2,
            best: &mut Option<NodeId>,
        ) {
            let node = scene.node(id);
            if !node.is_visible() {
                return;
            }
            let absolute = origin + node.position;
            if Rect::from_origin_size(absolute, node.size).contains(point) {
                *best = Some(id);
            }
            for &child in node.children.iter() {
                visit(scene, child, absolute, point, best);
            }
        }

        let mut best = None;
        for &root in &self.roots {
            visit(self, root, Vec2::ZERO, point, &mut best);
        }
        best
    }

    /// Shift every root by `offset` (descendants follow implicitly).
    pub fn translate_roots(&mut self, offset: Vec2) {
        for index in 0..self.roots.len() {
            let id = self.roots[index];
            let node = self.node_mut(id);
            node.position = node.position + offset;
        }
    }

    /// Enable or disable the depth cue on every node.
    pub fn set_shadow_all(&mut self, enabled: bool) {
        for node in &mut self.nodes {
            if enabled {
                node.flags.insert(NodeFlags::SHADOW);
            } else {
                node.flags.remove(NodeFlags::SHADOW);
            }
        }
    }
}
