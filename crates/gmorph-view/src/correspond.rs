#![forbid(unsafe_code)]

//! Correspondence between two graph generations.
//!
//! [`correspond`] classifies the nodes of a new and an old generation
//! into three disjoint groups: *appearing* (new only), *vanishing* (old
//! only), and *remaining* (pairs deemed the same logical node). The
//! classification drives the transition choreography: remaining pairs
//! move, everything else fades.
//!
//! # Matching rules
//!
//! Per sibling level, each new node scans the not-yet-consumed old
//! siblings in order and takes the first that matches:
//!
//! 1. Both carry a token id and the ids are equal, or
//! 2. both are access nodes and their classifiers are equal.
//!
//! A matched old node leaves the pool, so pairing is one-to-one.
//! Matched pairs recurse into their child lists as a fresh matching
//! problem. Unmatched new nodes are appearing with their entire subtree
//! implicit; old siblings left in the pool are vanishing, subtrees
//! implicit. Greedy first-match keeps the pass linear per level and
//! deterministic; it deliberately does not chase a globally minimal
//! edit.
//!
//! # Invariants
//!
//! 1. The inputs are never mutated, so the diff is usable as a dry run.
//! 2. Children of unmatched nodes are never visited.
//! 3. Result order is deterministic: pre-order over the new forest for
//!    `appearing`/`remaining`, old-sibling order for `vanishing`.

use gmorph_scene::{NodeId, Scene, VisualNode};

/// A new/old pair classified as the same logical node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchedPair {
    /// Node in the new generation.
    pub new: NodeId,
    /// Node in the old generation.
    pub old: NodeId,
}

/// Classification of two generations' nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Correspondence {
    /// Subtree roots present only in the new generation.
    pub appearing: Vec<NodeId>,
    /// Subtree roots present only in the old generation.
    pub vanishing: Vec<NodeId>,
    /// Pairs that persist across the rebuild.
    pub remaining: Vec<MatchedPair>,
}

impl Correspondence {
    /// True when nothing appears or vanishes; such a diff is applied as
    /// an instant cut with no animation, even if edge sets differ.
    pub fn is_noop(&self) -> bool {
        self.appearing.is_empty() && self.vanishing.is_empty()
    }
}

/// Diff the new generation against the old one.
pub fn correspond(new: &Scene, old: &Scene) -> Correspondence {
    let mut result = Correspondence::default();
    match_siblings(new, old, new.roots(), old.roots(), &mut result);
    tracing::debug!(
        target: "gmorph.view",
        appearing = result.appearing.len(),
        vanishing = result.vanishing.len(),
        remaining = result.remaining.len(),
        "generations diffed"
    );
    result
}

fn match_siblings(
    new_scene: &Scene,
    old_scene: &Scene,
    new_siblings: &[NodeId],
    old_siblings: &[NodeId],
    result: &mut Correspondence,
) {
    let mut pool: Vec<NodeId> = old_siblings.to_vec();

    for &new_id in new_siblings {
        let new_node = new_scene.node(new_id);
        let matched = pool
            .iter()
            .position(|&old_id| pairs(new_node, old_scene.node(old_id)));

        match matched {
            Some(index) => {
                let old_id = pool.remove(index);
                result.remaining.push(MatchedPair {
                    new: new_id,
                    old: old_id,
                });
                match_siblings(
                    new_scene,
                    old_scene,
                    new_scene.children(new_id),
                    old_scene.children(old_id),
                    result,
                );
            }
            None => result.appearing.push(new_id),
        }
    }

    result.vanishing.extend(pool);
}

fn pairs(new: &VisualNode, old: &VisualNode) -> bool {
    if let (Some(a), Some(b)) = (new.token_id(), old.token_id()) {
        return a == b;
    }
    matches!(
        (new.access_kind(), old.access_kind()),
        (Some(a), Some(b)) if a == b
    )
}

#[cfg(test)]
mod tests {
    use super::{Correspondence, correspond};
    use gmorph_core::descriptor::NodeDescriptor;
    use gmorph_core::identity::{AccessKind, TokenId};
    use gmorph_scene::{NodeId, Scene};
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn tid(raw: u64) -> TokenId {
        TokenId::new(raw).unwrap()
    }

    fn build(forest: Vec<NodeDescriptor>) -> Scene {
        Scene::build(&forest, &[]).0
    }

    fn tokens_of(scene: &Scene, ids: &[NodeId]) -> Vec<u64> {
        ids.iter()
            .map(|&id| scene.node(id).token_id().map_or(0, TokenId::get))
            .collect()
    }

    // -----------------------------------------------------------------
    // Matching rules
    // -----------------------------------------------------------------

    #[test]
    fn equal_tokens_remain_despite_geometry() {
        let new = build(vec![NodeDescriptor::token(tid(1)).sized(
            gmorph_core::Vec2::new(500.0, 500.0),
        )]);
        let old = build(vec![NodeDescriptor::token(tid(1))]);
        let diff = correspond(&new, &old);
        assert!(diff.appearing.is_empty());
        assert!(diff.vanishing.is_empty());
        assert_eq!(diff.remaining.len(), 1);
    }

    #[test]
    fn different_tokens_never_match() {
        let new = build(vec![NodeDescriptor::token(tid(1))]);
        let old = build(vec![NodeDescriptor::token(tid(2))]);
        let diff = correspond(&new, &old);
        assert_eq!(diff.appearing.len(), 1);
        assert_eq!(diff.vanishing.len(), 1);
        assert!(diff.remaining.is_empty());
    }

    #[test]
    fn access_nodes_match_by_kind_only() {
        let new = build(vec![
            NodeDescriptor::access(AccessKind::Public),
            NodeDescriptor::access(AccessKind::Private),
        ]);
        let old = build(vec![
            NodeDescriptor::access(AccessKind::Private),
            NodeDescriptor::access(AccessKind::Protected),
        ]);
        let diff = correspond(&new, &old);
        // Public appears, Protected vanishes, Private remains.
        assert_eq!(diff.remaining.len(), 1);
        assert_eq!(diff.appearing.len(), 1);
        assert_eq!(diff.vanishing.len(), 1);
    }

    #[test]
    fn token_never_matches_access() {
        let new = build(vec![NodeDescriptor::token(tid(1))]);
        let old = build(vec![NodeDescriptor::access(AccessKind::Public)]);
        let diff = correspond(&new, &old);
        assert!(diff.remaining.is_empty());
        assert_eq!(diff.appearing.len(), 1);
        assert_eq!(diff.vanishing.len(), 1);
    }

    #[test]
    fn duplicate_access_kinds_pair_in_encounter_order() {
        let new = build(vec![
            NodeDescriptor::access(AccessKind::Public).children(vec![
                NodeDescriptor::token(tid(1)),
            ]),
            NodeDescriptor::access(AccessKind::Public).children(vec![
                NodeDescriptor::token(tid(2)),
            ]),
        ]);
        let old = build(vec![
            NodeDescriptor::access(AccessKind::Public).children(vec![
                NodeDescriptor::token(tid(2)),
            ]),
        ]);
        let diff = correspond(&new, &old);
        // The first new group greedily consumes the only old group,
        // even though the second new group's child would have matched
        // the old child. The accepted false negative of first-match.
        assert_eq!(diff.remaining.len(), 1);
        assert_eq!(diff.remaining[0].new, new.roots()[0]);
        assert_eq!(tokens_of(&new, &diff.appearing), vec![1, 0]);
        assert_eq!(tokens_of(&old, &diff.vanishing), vec![2]);
    }

    #[test]
    fn empty_old_forest_yields_only_appearing() {
        let new = build(vec![
            NodeDescriptor::token(tid(1)).children(vec![NodeDescriptor::token(tid(2))]),
        ]);
        let diff = correspond(&new, &Scene::empty());
        assert_eq!(diff.appearing.len(), 1, "subtree is implicit");
        assert!(diff.vanishing.is_empty());
        assert!(diff.remaining.is_empty());
    }

    #[test]
    fn empty_new_forest_yields_only_vanishing() {
        let old = build(vec![NodeDescriptor::token(tid(1)), NodeDescriptor::token(tid(2))]);
        let diff = correspond(&Scene::empty(), &old);
        assert!(diff.appearing.is_empty());
        assert_eq!(diff.vanishing.len(), 2);
    }

    #[test]
    fn identical_forests_are_a_noop() {
        let forest = || {
            vec![
                NodeDescriptor::token(tid(1)).children(vec![
                    NodeDescriptor::access(AccessKind::Public)
                        .children(vec![NodeDescriptor::token(tid(2))]),
                ]),
                NodeDescriptor::token(tid(3)),
            ]
        };
        let diff = correspond(&build(forest()), &build(forest()));
        assert!(diff.is_noop());
        assert_eq!(diff.remaining.len(), 4);
    }

    #[test]
    fn children_of_unmatched_nodes_are_implicit() {
        let new = build(vec![
            NodeDescriptor::token(tid(10)).children(vec![NodeDescriptor::token(tid(2))]),
        ]);
        let old = build(vec![
            NodeDescriptor::token(tid(20)).children(vec![NodeDescriptor::token(tid(2))]),
        ]);
        let diff = correspond(&new, &old);
        // Token 2 exists on both sides but under unmatched parents, so
        // it is never visited: the roots alone appear and vanish.
        assert_eq!(diff.appearing, vec![new.roots()[0]]);
        assert_eq!(diff.vanishing, vec![old.roots()[0]]);
        assert!(diff.remaining.is_empty());
    }

    #[test]
    fn collapsing_access_group_keeps_matching() {
        // Old: [A(1), B(public){C(2)}]  New: [A'(1), D(public){}]
        let old = build(vec![
            NodeDescriptor::token(tid(1)),
            NodeDescriptor::access(AccessKind::Public)
                .children(vec![NodeDescriptor::token(tid(2))]),
        ]);
        let new = build(vec![
            NodeDescriptor::token(tid(1)),
            NodeDescriptor::access(AccessKind::Public),
        ]);
        let diff = correspond(&new, &old);
        assert_eq!(diff.remaining.len(), 2);
        assert!(diff.appearing.is_empty());
        assert_eq!(tokens_of(&old, &diff.vanishing), vec![2]);
    }

    // -----------------------------------------------------------------
    // Partition properties
    // -----------------------------------------------------------------

    fn arb_node() -> impl Strategy<Value = NodeDescriptor> {
        let leaf = prop_oneof![
            (1u64..=12).prop_map(|raw| NodeDescriptor::token(tid(raw))),
            prop_oneof![
                Just(AccessKind::Public),
                Just(AccessKind::Protected),
                Just(AccessKind::Private),
            ]
            .prop_map(NodeDescriptor::access),
        ];
        leaf.prop_recursive(3, 16, 3, |inner| {
            let payload = prop_oneof![
                (1u64..=12).prop_map(|raw| NodeDescriptor::token(tid(raw))),
                prop_oneof![
                    Just(AccessKind::Public),
                    Just(AccessKind::Protected),
                    Just(AccessKind::Private),
                ]
                .prop_map(NodeDescriptor::access),
            ];
            (payload, prop::collection::vec(inner, 0..3))
                .prop_map(|(node, children)| node.children(children))
        })
    }

    fn arb_forest() -> impl Strategy<Value = Vec<NodeDescriptor>> {
        prop::collection::vec(arb_node(), 0..4)
    }

    fn has_ancestor_in(scene: &Scene, id: NodeId, set: &HashSet<NodeId>) -> bool {
        let mut cursor = scene.node(id).parent;
        while let Some(current) = cursor {
            if set.contains(&current) {
                return true;
            }
            cursor = scene.node(current).parent;
        }
        false
    }

    fn assert_partition(scene: &Scene, explicit: &HashSet<NodeId>, paired: &HashSet<NodeId>) {
        for id in scene.node_ids() {
            let states = [
                paired.contains(&id),
                explicit.contains(&id),
                has_ancestor_in(scene, id, explicit),
            ];
            assert_eq!(
                states.iter().filter(|&&s| s).count(),
                1,
                "node {id:?} must be classified exactly once: {states:?}"
            );
        }
    }

    proptest! {
        #[test]
        fn proptest_every_node_classified_exactly_once(
            new_forest in arb_forest(),
            old_forest in arb_forest(),
        ) {
            let new = build(new_forest);
            let old = build(old_forest);
            let diff = correspond(&new, &old);

            let appearing: HashSet<_> = diff.appearing.iter().copied().collect();
            let vanishing: HashSet<_> = diff.vanishing.iter().copied().collect();
            let remaining_new: HashSet<_> = diff.remaining.iter().map(|p| p.new).collect();
            let remaining_old: HashSet<_> = diff.remaining.iter().map(|p| p.old).collect();

            // One-to-one pairing: no id consumed twice.
            prop_assert_eq!(remaining_new.len(), diff.remaining.len());
            prop_assert_eq!(remaining_old.len(), diff.remaining.len());
            prop_assert_eq!(appearing.len(), diff.appearing.len());
            prop_assert_eq!(vanishing.len(), diff.vanishing.len());

            assert_partition(&new, &appearing, &remaining_new);
            assert_partition(&old, &vanishing, &remaining_old);
        }

        #[test]
        fn proptest_self_diff_is_noop(forest in arb_forest()) {
            let new = build(forest.clone());
            let old = build(forest);
            let diff = correspond(&new, &old);
            prop_assert!(diff.is_noop());
            prop_assert_eq!(diff.remaining.len(), new.node_count());
        }

        #[test]
        fn proptest_inputs_not_mutated(
            new_forest in arb_forest(),
            old_forest in arb_forest(),
        ) {
            let new = build(new_forest);
            let old = build(old_forest);
            let new_before = format!("{new:?}");
            let old_before = format!("{old:?}");
            let _ = correspond(&new, &old);
            prop_assert_eq!(new_before, format!("{new:?}"));
            prop_assert_eq!(old_before, format!("{old:?}"));
        }
    }

    #[test]
    fn noop_reports_empty_default() {
        assert!(Correspondence::default().is_noop());
    }
}
