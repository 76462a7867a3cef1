//! Separation of nested hyperedges with placeholder nodes.

use std::collections::BTreeSet;

use common_error::HyperdrawResult;
use hyperdraw_core::{EdgeId, EdgeStore, NodeId};
use log::debug;

use crate::motifs::strangled_pairs;
use crate::rebuild::StoreBuilder;

/// Gives every hyperedge nested in a larger one a fresh [`NodeId::Dummy`]
/// node, so that no two hyperedges of size greater than 2 stay nested.
///
/// Dummies are numbered 1, 2, … in hyperedge id order, continuing after the
/// highest dummy already present. A hyperedge nested in several others gets a
/// single dummy. Directed hyperedges receive it on the tail side.
pub fn unstrangle_edges(store: &EdgeStore) -> HyperdrawResult<EdgeStore> {
    let inner: BTreeSet<EdgeId> = strangled_pairs(store)
        .into_iter()
        .map(|pair| pair.inner)
        .collect();

    let mut next = store
        .nodes()
        .filter_map(|node| match node {
            NodeId::Dummy(k) => Some(*k),
            _ => None,
        })
        .max()
        .unwrap_or(0)
        + 1;

    let mut builder = StoreBuilder::new();
    builder.carry_nodes(store, |_| true)?;
    for (id, key, metadata) in store.edges_with_metadata() {
        let weight = store.weight_of(id).unwrap_or(1.0);
        let key = if inner.contains(&id) {
            let dummy = NodeId::Dummy(next);
            next += 1;
            key.with_members(key.members().with_node(dummy))
        } else {
            key.clone()
        };
        builder.add_edge(key, weight, metadata.clone());
    }

    debug!("unstrangle: {} nested hyperedges separated", inner.len());
    builder.build(store.is_weighted())
}
