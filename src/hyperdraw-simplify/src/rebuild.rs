//! Fresh-store construction shared by the simplifiers.

use std::collections::HashMap;

use common_error::HyperdrawResult;
use hyperdraw_core::{EdgeKey, EdgeStore, NewEdge, NodeId, PropertyMap};

/// Accumulates rewritten hyperedges for a fresh store.
///
/// Keys colliding after a rewrite are merged: weights add up, the first
/// metadata wins.
#[derive(Debug, Default)]
pub(crate) struct StoreBuilder {
    nodes: Vec<(NodeId, PropertyMap)>,
    edges: Vec<(EdgeKey, f64, PropertyMap)>,
    slots: HashMap<EdgeKey, usize>,
}

impl StoreBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Carries over the nodes of `source` in insertion order, with metadata,
    /// skipping those rejected by `keep`.
    pub(crate) fn carry_nodes<F>(&mut self, source: &EdgeStore, mut keep: F) -> HyperdrawResult<()>
    where
        F: FnMut(&NodeId) -> bool,
    {
        for node in source.nodes_in_insertion_order() {
            if keep(node) {
                let metadata = source.get_node_metadata(node)?.clone();
                self.nodes.push((node.clone(), metadata));
            }
        }
        Ok(())
    }

    pub(crate) fn add_node(&mut self, node: NodeId, metadata: PropertyMap) {
        self.nodes.push((node, metadata));
    }

    pub(crate) fn add_edge(&mut self, key: EdgeKey, weight: f64, metadata: PropertyMap) {
        match self.slots.get(&key) {
            Some(&slot) => self.edges[slot].1 += weight,
            None => {
                self.slots.insert(key.clone(), self.edges.len());
                self.edges.push((key, weight, metadata));
            }
        }
    }

    pub(crate) fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub(crate) fn build(self, weighted: bool) -> HyperdrawResult<EdgeStore> {
        let mut store = EdgeStore::new(weighted);
        for (node, metadata) in self.nodes {
            store.add_node(node, Some(metadata));
        }
        for (key, weight, metadata) in self.edges {
            let mut edge = NewEdge::from_key(key).with_metadata(metadata);
            if weighted {
                edge = edge.with_weight(weight);
            }
            store.add_edge(edge)?;
        }
        Ok(store)
    }
}
