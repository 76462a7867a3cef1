//! Node → rank maps used to place nodes along an axis or around a circle.

use std::cmp::Reverse;
use std::collections::HashMap;

use common_error::{HyperdrawError, HyperdrawResult};
use hyperdraw_core::{EdgeKey, EdgeStore, NodeId};
use serde::{Deserialize, Serialize};

use crate::packing::Interval;

/// Dense ranks `0..len` assigned to nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRanking {
    ranks: HashMap<NodeId, usize>,
}

impl NodeRanking {
    /// Ranks nodes in the given order. Repeated nodes keep their first rank.
    pub fn from_order<I, T>(order: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<NodeId>,
    {
        let mut ranks = HashMap::new();
        for node in order {
            let next = ranks.len();
            ranks.entry(node.into()).or_insert(next);
        }
        Self { ranks }
    }

    /// Ranks the store's nodes by [`NodeId`] ordering.
    pub fn alphabetic(store: &EdgeStore) -> Self {
        Self::from_order(store.nodes().cloned())
    }

    /// Ranks the store's nodes in the order they were first inserted.
    pub fn insertion(store: &EdgeStore) -> Self {
        Self::from_order(store.nodes_in_insertion_order().into_iter().cloned())
    }

    /// Ranks the store's nodes by decreasing degree, ties by [`NodeId`].
    pub fn by_degree(store: &EdgeStore) -> HyperdrawResult<Self> {
        let mut nodes = Vec::with_capacity(store.num_nodes());
        for node in store.nodes() {
            nodes.push((Reverse(store.degree(node)?), node.clone()));
        }
        nodes.sort();
        Ok(Self::from_order(nodes.into_iter().map(|(_, node)| node)))
    }

    /// Rank of a node.
    pub fn rank(&self, node: &NodeId) -> Option<usize> {
        self.ranks.get(node).copied()
    }

    /// Number of ranked nodes.
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Whether no node is ranked.
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// The closed rank interval `[min, max]` spanned by a hyperedge.
    pub fn interval(&self, key: &EdgeKey) -> HyperdrawResult<Interval> {
        let mut bounds: Option<(usize, usize)> = None;
        for node in key.nodes().iter() {
            let rank = self
                .rank(node)
                .ok_or_else(|| HyperdrawError::node_not_found(format!("{node} has no rank")))?;
            bounds = Some(match bounds {
                Some((lo, hi)) => (lo.min(rank), hi.max(rank)),
                None => (rank, rank),
            });
        }
        bounds
            .map(|(lo, hi)| Interval::new(lo, hi))
            .ok_or_else(|| HyperdrawError::internal(format!("empty hyperedge {key}")))
    }
}

#[cfg(test)]
mod tests {
    use hyperdraw_core::{NewEdge, StoreFixture};

    use super::*;

    #[test]
    fn test_from_order_keeps_first_rank() {
        let ranking = NodeRanking::from_order([3, 1, 3, 2]);
        assert_eq!(ranking.len(), 3);
        assert_eq!(ranking.rank(&NodeId::from(3)), Some(0));
        assert_eq!(ranking.rank(&NodeId::from(2)), Some(2));
    }

    #[test]
    fn test_insertion_and_alphabetic_differ() {
        let mut store = EdgeStore::new(false);
        store.add_edge(NewEdge::new([9, 4])).unwrap();
        store.add_edge(NewEdge::new([1])).unwrap();

        let alphabetic = NodeRanking::alphabetic(&store);
        assert_eq!(alphabetic.rank(&NodeId::from(1)), Some(0));
        let insertion = NodeRanking::insertion(&store);
        assert_eq!(insertion.rank(&NodeId::from(1)), Some(2));
    }

    #[test]
    fn test_degree_ranking_puts_hubs_first() {
        let store = StoreFixture::mixed_orders().into_store();
        let ranking = NodeRanking::by_degree(&store).unwrap();
        // 8 is in three hyperedges, 3/6/7/9 in two
        assert_eq!(ranking.rank(&NodeId::from(8)), Some(0));
        assert_eq!(ranking.rank(&NodeId::from(3)), Some(1));
    }

    #[test]
    fn test_interval_needs_every_member_ranked() {
        let ranking = NodeRanking::from_order([5, 1, 7]);
        let key = EdgeKey::undirected([7, 5]);
        assert_eq!(ranking.interval(&key).unwrap(), Interval::new(0, 2));

        let missing = EdgeKey::undirected([5, 8]);
        assert!(matches!(
            ranking.interval(&missing),
            Err(HyperdrawError::NodeNotFound(_))
        ));
    }
}
