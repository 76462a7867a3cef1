//! Property-based testing utilities for hyperdraw-core.
//!
//! Strategies for member lists and the store properties they exercise.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::store::{EdgeKey, EdgeStore, NewEdge, NodeId};

    /// Strategy for a non-empty member list with possible repeats.
    fn arb_members() -> impl Strategy<Value = Vec<i64>> {
        prop::collection::vec(0i64..20, 1..8)
    }

    proptest! {
        /// Any permutation of the same members, inserted any number of
        /// times, resolves to a single id.
        #[test]
        fn test_canonicalization_is_idempotent(
            members in arb_members(),
            repeats in 1usize..5,
            seed in any::<u64>(),
        ) {
            let mut store = EdgeStore::new(true);
            let mut ids = Vec::new();
            let mut shuffled = members.clone();
            for round in 0..repeats {
                let offset = ((seed as usize).wrapping_add(round)) % shuffled.len();
                shuffled.rotate_left(offset);
                shuffled.reverse();
                ids.push(store.add_edge(NewEdge::new(shuffled.clone())).unwrap());
            }

            prop_assert_eq!(store.num_edges(), 1);
            prop_assert!(ids.windows(2).all(|w| w[0] == w[1]));
            let weight = store.get_weight(&EdgeKey::undirected(members)).unwrap();
            prop_assert_eq!(weight, repeats as f64);
        }

        /// Every node referenced by a stored edge is in the node set, also
        /// after removals.
        #[test]
        fn test_node_set_covers_edges(
            edges in prop::collection::vec(arb_members(), 1..12),
            remove in prop::collection::vec(any::<bool>(), 12),
        ) {
            let mut store = EdgeStore::new(false);
            for members in &edges {
                store.add_edge(NewEdge::new(members.clone())).unwrap();
            }
            for (members, drop) in edges.iter().zip(remove) {
                if drop {
                    let _ = store.remove_edge(&EdgeKey::undirected(members.clone()));
                }
            }

            for (_, key) in store.edges() {
                for node in key.nodes().iter() {
                    prop_assert!(store.contains_node(node));
                    prop_assert!(store.incident_edges(node).unwrap().contains(
                        &store.edge_id(key).unwrap()
                    ));
                }
            }
            for members in &edges {
                for &node in members {
                    prop_assert!(store.contains_node(&NodeId::from(node)));
                }
            }
        }

        /// Snapshots survive a JSON round trip.
        #[test]
        fn test_snapshot_json_round_trip(edges in prop::collection::vec(arb_members(), 0..8)) {
            let mut store = EdgeStore::new(true);
            for members in &edges {
                store.add_edge(NewEdge::new(members.clone())).unwrap();
            }

            let json = serde_json::to_string(&store).unwrap();
            let restored: EdgeStore = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(restored.snapshot(), store.snapshot());
        }
    }
}
