//! Clique expansion.

use common_error::HyperdrawResult;
use hyperdraw_core::{EdgeStore, NodeId};
use log::debug;

use crate::projection::Projection;

/// Clique expansion of a store: vertices are nodes, edges are co-memberships.
pub type CliqueProjection = Projection<NodeId, ()>;

/// Replaces every hyperedge by the clique over its members.
///
/// Directed hyperedges contribute the clique over the union of tail and head.
/// With `keep_isolated`, nodes that end up with no neighbor (including nodes
/// of size-1 hyperedges only) are still added as vertices.
pub fn clique_projection(
    store: &EdgeStore,
    keep_isolated: bool,
    node_order: Option<&[NodeId]>,
) -> HyperdrawResult<CliqueProjection> {
    let mut projection = Projection::new(false);
    for node in store.resolve_node_order(node_order)? {
        if keep_isolated || !store.neighbors(&node)?.is_empty() {
            projection.insert_vertex(node);
        }
    }

    for (_, key) in store.edges() {
        let members = key.nodes();
        for (i, source) in members.iter().enumerate() {
            for target in &members[i + 1..] {
                projection.connect(source.clone(), target.clone(), ())?;
            }
        }
    }

    debug!(
        "clique projection: {} vertices, {} edges",
        projection.vertex_count(),
        projection.edge_count()
    );
    Ok(projection)
}

#[cfg(test)]
mod tests {
    use hyperdraw_core::{NewEdge, StoreFixture};

    use super::*;

    fn n(id: i64) -> NodeId {
        NodeId::from(id)
    }

    #[test]
    fn test_cliques_cover_every_member_pair() {
        let fixture = StoreFixture::mixed_orders();
        let graph = clique_projection(fixture.store(), false, None).unwrap();

        assert!(graph.contains_edge(&n(7), &n(8)));
        assert!(graph.contains_edge(&n(7), &n(9)));
        assert!(graph.contains_edge(&n(8), &n(9)));
        assert!(graph.contains_edge(&n(15), &n(7)));
        assert!(!graph.contains_edge(&n(6), &n(15)));
        assert!(!graph.contains_edge(&n(1), &n(6)));
        // (7,8) and (8,9) appear in two hyperedges but only once here
        assert_eq!(graph.edge_count(), 6 + 2 + 2 + 1 + 3);
    }

    #[test]
    fn test_isolated_nodes_follow_flag() {
        let mut store = EdgeStore::new(false);
        store.add_edge(NewEdge::new([1, 2])).unwrap();
        store.add_edge(NewEdge::new([5])).unwrap();
        store.add_node(9, None);

        let kept = clique_projection(&store, true, None).unwrap();
        assert_eq!(kept.vertex_count(), 4);
        assert!(kept.contains_vertex(&n(9)));

        let dropped = clique_projection(&store, false, None).unwrap();
        assert_eq!(dropped.vertex_count(), 2);
        assert!(!dropped.contains_vertex(&n(5)));
    }

    #[test]
    fn test_unknown_node_in_order_fails() {
        let store = StoreFixture::mixed_orders().into_store();
        let order = [n(100)];
        assert!(clique_projection(&store, true, Some(&order[..])).is_err());
    }
}
