use mindweave::{LayoutSettings, MindMapNode, NodeId, NodeStore, Session};
use proptest::prelude::*;
use std::collections::HashSet;

/// Arbitrary node lists: parents may be missing, dangling, self-referencing
/// or form cycles.
fn arb_nodes() -> impl Strategy<Value = Vec<MindMapNode>> {
    prop::collection::vec((1u32..=4, prop::option::of(0i64..30)), 0..24).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (level, parent))| {
                let node = MindMapNode::new(i as i64, format!("node {}", i), level);
                match parent {
                    Some(p) => node.with_parent(p),
                    None => node,
                }
            })
            .collect()
    })
}

/// A node list plus, per node, whether to toggle it before checking.
fn arb_case() -> impl Strategy<Value = (Vec<MindMapNode>, Vec<bool>)> {
    arb_nodes().prop_flat_map(|nodes| {
        let len = nodes.len();
        (Just(nodes), prop::collection::vec(any::<bool>(), len))
    })
}

fn session_for(nodes: Vec<MindMapNode>, picks: &[bool]) -> Session {
    let mut session = Session::with_store(NodeStore::new(nodes), LayoutSettings::default());
    apply_toggles(&mut session, picks);
    session
}

fn visible(session: &Session) -> HashSet<NodeId> {
    session.frame().nodes.into_iter().map(|n| n.id).collect()
}

fn apply_toggles(session: &mut Session, picks: &[bool]) {
    let ids: Vec<NodeId> = session.store().nodes().iter().map(|n| n.id.clone()).collect();
    for (id, pick) in ids.iter().zip(picks) {
        if *pick {
            session.toggle(id);
        }
    }
}

proptest! {
    #[test]
    fn prop_level_one_nodes_always_visible((nodes, picks) in arb_case()) {
        let session = session_for(nodes, &picks);
        let shown = visible(&session);

        for node in session.store().nodes() {
            if node.level == 1 {
                prop_assert!(shown.contains(&node.id), "root {} hidden", node.id);
            }
        }
    }

    #[test]
    fn prop_collapse_all_shows_roots_and_their_children((nodes, _) in arb_case()) {
        let mut session = session_for(nodes, &[]);
        session.collapse_all();
        let shown = visible(&session);
        let store = session.store();

        for node in store.nodes() {
            let parent_level = session
                .index()
                .parent_id(store, &node.id)
                .and_then(|p| store.get(p))
                .map(|p| p.level);
            let expected = match parent_level {
                None => true,
                Some(level) => level == 1,
            };
            prop_assert_eq!(shown.contains(&node.id), expected, "node {}", node.id);
        }
    }

    #[test]
    fn prop_expand_all_restores_everything((nodes, picks) in arb_case()) {
        let mut session = session_for(nodes, &picks);
        session.expand_all();

        prop_assert_eq!(session.frame().nodes.len(), session.store().len());
    }

    #[test]
    fn prop_edges_join_visible_parent_and_child((nodes, picks) in arb_case()) {
        let session = session_for(nodes, &picks);
        let frame = session.frame();
        let shown: HashSet<&NodeId> = frame.nodes.iter().map(|n| &n.id).collect();
        let store = session.store();

        for edge in &frame.edges {
            prop_assert!(shown.contains(&edge.source));
            prop_assert!(shown.contains(&edge.target));
            prop_assert_eq!(session.index().parent_id(store, &edge.target), Some(&edge.source));
            prop_assert_eq!(&edge.id, &format!("edge-{}-{}", edge.source, edge.target));
        }
    }

    #[test]
    fn prop_double_toggle_is_identity((nodes, picks) in arb_case(), which in any::<prop::sample::Index>()) {
        let mut session = session_for(nodes, &picks);
        prop_assume!(!session.store().is_empty());

        let id = session.store().nodes()[which.index(session.store().len())].id.clone();
        let before = session.collapse().clone();
        session.toggle(&id);
        session.toggle(&id);

        prop_assert_eq!(session.collapse(), &before);
    }

    #[test]
    fn prop_collapsing_a_node_keeps_it_on_screen((nodes, picks) in arb_case(), which in any::<prop::sample::Index>()) {
        let mut session = session_for(nodes, &picks);
        prop_assume!(!session.store().is_empty());

        let id = session.store().nodes()[which.index(session.store().len())].id.clone();
        if session.collapse().contains(&id) {
            session.toggle(&id);
        }
        let was_visible = visible(&session).contains(&id);
        session.toggle(&id);

        prop_assert_eq!(visible(&session).contains(&id), was_visible);
    }

    #[test]
    fn prop_layout_is_deterministic((nodes, picks) in arb_case()) {
        let session = session_for(nodes, &picks);
        let first = session.frame();
        let second = session.frame();

        prop_assert_eq!(first.nodes.len(), second.nodes.len());
        for (a, b) in first.nodes.iter().zip(&second.nodes) {
            prop_assert_eq!(&a.id, &b.id);
            prop_assert_eq!(a.x.to_bits(), b.x.to_bits());
            prop_assert_eq!(a.y.to_bits(), b.y.to_bits());
        }
    }
}
