//! Node clustering by incident-edge similarity.

use std::collections::BTreeMap;

use common_error::{ensure, HyperdrawResult};
use hyperdraw_core::{EdgeStore, NodeId};
use log::debug;

use crate::rebuild::StoreBuilder;
use crate::similarity::node_similarity;
use crate::union_find::UnionFind;

/// Result of an agglomerative pass.
#[derive(Debug, Clone)]
pub struct Agglomeration {
    /// The contracted store.
    pub store: EdgeStore,
    /// Every merged-away node mapped to the representative that replaced it.
    pub merged: BTreeMap<NodeId, NodeId>,
}

/// Merges nodes whose incident-edge sets are similar enough.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgglomerativeSimplifier {
    threshold: f64,
}

impl AgglomerativeSimplifier {
    /// Creates a simplifier merging pairs with Jaccard similarity at least
    /// `threshold`, which must lie in `[0, 1]`.
    pub fn new(threshold: f64) -> HyperdrawResult<Self> {
        ensure!(
            (0.0..=1.0).contains(&threshold),
            InvalidParameter: "agglomerative threshold must be in [0, 1], got {}", threshold
        );
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Contracts every similarity class onto its smallest [`NodeId`] and
    /// rebuilds the store from the rewritten hyperedges.
    ///
    /// Hyperedges that become identical are merged (weights add up on
    /// weighted stores). Representatives keep their metadata.
    pub fn simplify(&self, store: &EdgeStore) -> HyperdrawResult<Agglomeration> {
        let matrix = node_similarity(store)?;
        let mut sets = UnionFind::new(matrix.len());
        for (i, j) in matrix.pairs_at_least(self.threshold) {
            sets.union(i, j);
        }

        // rows are in NodeId order, so the first member of a group is its smallest node
        let mut representative: BTreeMap<NodeId, NodeId> = BTreeMap::new();
        for group in sets.groups() {
            let head = matrix.nodes()[group[0]].clone();
            for &row in &group[1..] {
                representative.insert(matrix.nodes()[row].clone(), head.clone());
            }
        }

        let mut builder = StoreBuilder::new();
        builder.carry_nodes(store, |node| !representative.contains_key(node))?;
        for (id, key, metadata) in store.edges_with_metadata() {
            let members = key.members().map_nodes(|node| {
                representative.get(node).cloned().unwrap_or_else(|| node.clone())
            });
            let weight = store.weight_of(id).unwrap_or(1.0);
            builder.add_edge(key.with_members(members), weight, metadata.clone());
        }
        let contracted = builder.build(store.is_weighted())?;

        debug!(
            "agglomerative (threshold {}): {} nodes merged, {} -> {} hyperedges",
            self.threshold,
            representative.len(),
            store.num_edges(),
            contracted.num_edges()
        );
        Ok(Agglomeration {
            store: contracted,
            merged: representative,
        })
    }
}

/// Merges similar nodes of `store` with a one-off simplifier.
pub fn agglomerative_simplification(
    store: &EdgeStore,
    threshold: f64,
) -> HyperdrawResult<Agglomeration> {
    AgglomerativeSimplifier::new(threshold)?.simplify(store)
}
