//! The canonical, deduplicating hyperedge store.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use common_error::{HyperdrawError, HyperdrawResult};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::snapshot::{EdgeRecord, NodeRecord, StoreSnapshot};
use super::{EdgeBatch, EdgeId, EdgeKey, NewEdge, NodeId};
use crate::types::PropertyMap;

#[derive(Debug, Clone)]
struct NodeEntry {
    /// Insertion sequence number.
    seq: u64,
    metadata: PropertyMap,
    /// Incident hyperedges.
    edges: BTreeSet<EdgeId>,
}

#[derive(Debug, Clone)]
struct EdgeEntry {
    key: EdgeKey,
    weight: f64,
    metadata: PropertyMap,
}

/// Canonical map from hyperedge keys to dense ids, with weight and metadata
/// per id and the node set they span.
///
/// ## Guarantees
///
/// - Equal keys (same members in any order, same tag) share one id.
/// - Ids increase monotonically and are never reused, even after removal.
/// - Every node referenced by a stored edge is in the node set. Nodes are
///   never removed implicitly.
/// - Weights other than 1 exist only on weighted stores.
///
/// Edges iterate by ascending id (insertion order), nodes by [`NodeId`]
/// order.
///
/// ## Example
///
/// ```rust
/// use hyperdraw_core::{EdgeKey, EdgeStore, NewEdge};
///
/// let mut store = EdgeStore::new(true);
/// let first = store.add_edge(NewEdge::new([1, 2, 3])).unwrap();
/// let again = store.add_edge(NewEdge::new([3, 2, 1])).unwrap();
///
/// assert_eq!(first, again);
/// assert_eq!(store.get_weight(&EdgeKey::undirected([1, 2, 3])).unwrap(), 2.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "StoreSnapshot", into = "StoreSnapshot")]
pub struct EdgeStore {
    weighted: bool,
    next_edge_id: u64,
    next_node_seq: u64,
    key_to_id: HashMap<EdgeKey, EdgeId>,
    edges: BTreeMap<EdgeId, EdgeEntry>,
    nodes: BTreeMap<NodeId, NodeEntry>,
    layers: BTreeSet<String>,
}

impl Default for EdgeStore {
    fn default() -> Self {
        Self::new(false)
    }
}

impl EdgeStore {
    /// Create an empty store.
    pub fn new(weighted: bool) -> Self {
        Self {
            weighted,
            next_edge_id: 0,
            next_node_seq: 0,
            key_to_id: HashMap::new(),
            edges: BTreeMap::new(),
            nodes: BTreeMap::new(),
            layers: BTreeSet::new(),
        }
    }

    /// Create a store holding an initial batch of edges.
    pub fn from_edges(weighted: bool, batch: EdgeBatch) -> HyperdrawResult<Self> {
        let mut store = Self::new(weighted);
        store.add_edges(batch)?;
        Ok(store)
    }

    /// Check if weights are meaningful on this store.
    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of hyperedges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Check if the store holds no nodes and no edges.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Every layer label seen so far, including those of removed edges.
    pub fn layers(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(String::as_str)
    }

    /// Check if any stored edge is directed.
    pub fn has_directed_edges(&self) -> bool {
        self.edges.values().any(|entry| entry.key.is_directed())
    }

    // ----------------------------------------------------------------------
    // Nodes
    // ----------------------------------------------------------------------

    /// Add a node. Returns `true` if it was not present.
    ///
    /// Metadata, when given, replaces the node's current metadata.
    pub fn add_node(&mut self, node: impl Into<NodeId>, metadata: Option<PropertyMap>) -> bool {
        let node = node.into();
        let inserted = self.ensure_node(&node);
        if let Some(metadata) = metadata {
            if let Some(entry) = self.nodes.get_mut(&node) {
                entry.metadata = metadata;
            }
        }
        inserted
    }

    /// Add several nodes without metadata.
    pub fn add_nodes<I, T>(&mut self, nodes: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<NodeId>,
    {
        for node in nodes {
            self.ensure_node(&node.into());
        }
    }

    /// Remove a node together with every hyperedge incident to it.
    ///
    /// Returns the keys of the removed hyperedges.
    pub fn remove_node(&mut self, node: &NodeId) -> HyperdrawResult<Vec<EdgeKey>> {
        let incident: Vec<EdgeId> = self
            .nodes
            .get(node)
            .ok_or_else(|| HyperdrawError::node_not_found(node.to_string()))?
            .edges
            .iter()
            .copied()
            .collect();

        let mut removed = Vec::with_capacity(incident.len());
        for id in incident {
            if let Some(key) = self.remove_by_id(id) {
                removed.push(key);
            }
        }
        self.nodes.remove(node);
        Ok(removed)
    }

    /// Check if a node is present.
    pub fn contains_node(&self, node: &NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    /// All nodes, in [`NodeId`] order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.keys()
    }

    /// All nodes paired with their metadata.
    pub fn nodes_with_metadata(&self) -> impl Iterator<Item = (&NodeId, &PropertyMap)> {
        self.nodes.iter().map(|(node, entry)| (node, &entry.metadata))
    }

    /// All nodes in the order they were first added.
    pub fn nodes_in_insertion_order(&self) -> Vec<&NodeId> {
        let mut nodes: Vec<(&NodeId, u64)> = self
            .nodes
            .iter()
            .map(|(node, entry)| (node, entry.seq))
            .collect();
        nodes.sort_unstable_by_key(|&(_, seq)| seq);
        nodes.into_iter().map(|(node, _)| node).collect()
    }

    /// Metadata of a node.
    pub fn get_node_metadata(&self, node: &NodeId) -> HyperdrawResult<&PropertyMap> {
        self.node_entry(node).map(|entry| &entry.metadata)
    }

    /// Replace the metadata of a node.
    pub fn set_node_metadata(&mut self, node: &NodeId, metadata: PropertyMap) -> HyperdrawResult<()> {
        let entry = self
            .nodes
            .get_mut(node)
            .ok_or_else(|| HyperdrawError::node_not_found(node.to_string()))?;
        entry.metadata = metadata;
        Ok(())
    }

    /// Ids of the hyperedges containing `node`.
    pub fn incident_edges(&self, node: &NodeId) -> HyperdrawResult<&BTreeSet<EdgeId>> {
        self.node_entry(node).map(|entry| &entry.edges)
    }

    /// Number of hyperedges containing `node`.
    pub fn degree(&self, node: &NodeId) -> HyperdrawResult<usize> {
        self.incident_edges(node).map(BTreeSet::len)
    }

    /// Nodes sharing at least one hyperedge with `node`.
    pub fn neighbors(&self, node: &NodeId) -> HyperdrawResult<BTreeSet<NodeId>> {
        let mut neighbors = BTreeSet::new();
        for id in self.incident_edges(node)? {
            if let Some(entry) = self.edges.get(id) {
                neighbors.extend(entry.key.nodes().iter().filter(|&other| other != node).cloned());
            }
        }
        Ok(neighbors)
    }

    // ----------------------------------------------------------------------
    // Edges
    // ----------------------------------------------------------------------

    /// Insert a hyperedge, or update the one with the same canonical key.
    ///
    /// Weight rules:
    /// - no weight, weighted store, existing key: weight grows by 1;
    /// - no weight, new key: weight 1;
    /// - explicit weight on a weighted store: overwrites;
    /// - explicit weight on an unweighted store: `InvalidWeight` unless it is
    ///   exactly 1.
    pub fn add_edge(&mut self, edge: NewEdge) -> HyperdrawResult<EdgeId> {
        Self::check_members(&edge.key)?;
        if let Some(weight) = edge.weight {
            self.check_weight(weight)?;
        }
        Ok(self.insert(edge))
    }

    /// Insert a batch of hyperedges.
    ///
    /// A batch with weights must not contain the same key twice and must
    /// carry one weight per edge. Weights on an unweighted store promote it
    /// to weighted. Nothing is inserted if validation fails.
    pub fn add_edges(&mut self, batch: EdgeBatch) -> HyperdrawResult<Vec<EdgeId>> {
        let has_weights = batch.has_weights();
        let edges = batch.into_edges()?;

        for edge in &edges {
            Self::check_members(&edge.key)?;
        }
        if has_weights {
            let mut seen = HashSet::with_capacity(edges.len());
            for edge in &edges {
                if !seen.insert(&edge.key) {
                    return Err(HyperdrawError::invalid_batch(format!(
                        "edge {} appears more than once in a weighted batch",
                        edge.key
                    )));
                }
                if let Some(weight) = edge.weight {
                    Self::check_weight_value(weight)?;
                }
            }
            if !self.weighted {
                warn!("weights supplied to an unweighted store; promoting it to weighted");
                self.weighted = true;
            }
        }

        Ok(edges.into_iter().map(|edge| self.insert(edge)).collect())
    }

    /// Remove a hyperedge. Its id is not reused and its nodes stay.
    pub fn remove_edge(&mut self, key: &EdgeKey) -> HyperdrawResult<EdgeId> {
        let id = self.require_id(key)?;
        self.remove_by_id(id);
        Ok(id)
    }

    /// Weight of a hyperedge; 1 on unweighted stores.
    pub fn get_weight(&self, key: &EdgeKey) -> HyperdrawResult<f64> {
        let id = self.require_id(key)?;
        Ok(self.edges[&id].weight)
    }

    /// Overwrite the weight of a hyperedge.
    pub fn set_weight(&mut self, key: &EdgeKey, weight: f64) -> HyperdrawResult<()> {
        self.check_weight(weight)?;
        let id = self.require_id(key)?;
        if let Some(entry) = self.edges.get_mut(&id) {
            entry.weight = weight;
        }
        Ok(())
    }

    /// Metadata of a hyperedge.
    pub fn get_metadata(&self, key: &EdgeKey) -> HyperdrawResult<&PropertyMap> {
        let id = self.require_id(key)?;
        Ok(&self.edges[&id].metadata)
    }

    /// Replace the metadata of a hyperedge.
    pub fn set_edge_metadata(&mut self, key: &EdgeKey, metadata: PropertyMap) -> HyperdrawResult<()> {
        let id = self.require_id(key)?;
        if let Some(entry) = self.edges.get_mut(&id) {
            entry.metadata = metadata;
        }
        Ok(())
    }

    /// Id bound to a key.
    pub fn edge_id(&self, key: &EdgeKey) -> Option<EdgeId> {
        self.key_to_id.get(key).copied()
    }

    /// Key bound to an id.
    pub fn edge_key(&self, id: EdgeId) -> Option<&EdgeKey> {
        self.edges.get(&id).map(|entry| &entry.key)
    }

    /// Weight bound to an id.
    pub fn weight_of(&self, id: EdgeId) -> Option<f64> {
        self.edges.get(&id).map(|entry| entry.weight)
    }

    /// Metadata bound to an id.
    pub fn metadata_of(&self, id: EdgeId) -> Option<&PropertyMap> {
        self.edges.get(&id).map(|entry| &entry.metadata)
    }

    /// Check if a key is stored.
    pub fn contains_edge(&self, key: &EdgeKey) -> bool {
        self.key_to_id.contains_key(key)
    }

    /// Check if an id is bound.
    pub fn contains_edge_id(&self, id: EdgeId) -> bool {
        self.edges.contains_key(&id)
    }

    /// All hyperedges by ascending id.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &EdgeKey)> {
        self.edges.iter().map(|(&id, entry)| (id, &entry.key))
    }

    /// All hyperedges with their metadata.
    pub fn edges_with_metadata(&self) -> impl Iterator<Item = (EdgeId, &EdgeKey, &PropertyMap)> {
        self.edges
            .iter()
            .map(|(&id, entry)| (id, &entry.key, &entry.metadata))
    }

    /// All bound ids, ascending.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.keys().copied()
    }

    /// Largest order among stored hyperedges.
    pub fn max_order(&self) -> Option<usize> {
        self.edges.values().map(|entry| entry.key.order()).max()
    }

    /// Ids of the hyperedges of the given order.
    pub fn edges_of_order(&self, order: usize) -> Vec<EdgeId> {
        self.edges
            .iter()
            .filter(|(_, entry)| entry.key.order() == order)
            .map(|(&id, _)| id)
            .collect()
    }

    /// Edge iteration order for topology-sensitive producers.
    ///
    /// Ids listed in `order` come first, in the given order (repeats are
    /// ignored); every remaining id follows in ascending order. Unknown ids
    /// fail with `EdgeNotFound`.
    pub fn resolve_edge_order(&self, order: Option<&[EdgeId]>) -> HyperdrawResult<Vec<EdgeId>> {
        let Some(order) = order else {
            return Ok(self.edge_ids().collect());
        };
        let mut seen = HashSet::with_capacity(self.edges.len());
        let mut resolved = Vec::with_capacity(self.edges.len());
        for &id in order {
            if !self.edges.contains_key(&id) {
                return Err(HyperdrawError::edge_not_found(id.to_string()));
            }
            if seen.insert(id) {
                resolved.push(id);
            }
        }
        resolved.extend(self.edge_ids().filter(|id| !seen.contains(id)));
        Ok(resolved)
    }

    /// Node iteration order for topology-sensitive producers.
    ///
    /// Same rules as [`resolve_edge_order`](Self::resolve_edge_order); the
    /// remaining nodes follow in [`NodeId`] order.
    pub fn resolve_node_order(&self, order: Option<&[NodeId]>) -> HyperdrawResult<Vec<NodeId>> {
        let Some(order) = order else {
            return Ok(self.nodes.keys().cloned().collect());
        };
        let mut seen = HashSet::with_capacity(self.nodes.len());
        let mut resolved = Vec::with_capacity(self.nodes.len());
        for node in order {
            if !self.nodes.contains_key(node) {
                return Err(HyperdrawError::node_not_found(node.to_string()));
            }
            if seen.insert(node) {
                resolved.push(node.clone());
            }
        }
        resolved.extend(self.nodes.keys().filter(|node| !seen.contains(node)).cloned());
        Ok(resolved)
    }

    /// Owned, serializable copy of the store.
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot::from(self.clone())
    }

    // ----------------------------------------------------------------------
    // Internals
    // ----------------------------------------------------------------------

    fn node_entry(&self, node: &NodeId) -> HyperdrawResult<&NodeEntry> {
        self.nodes
            .get(node)
            .ok_or_else(|| HyperdrawError::node_not_found(node.to_string()))
    }

    fn require_id(&self, key: &EdgeKey) -> HyperdrawResult<EdgeId> {
        self.edge_id(key)
            .ok_or_else(|| HyperdrawError::edge_not_found(key.to_string()))
    }

    fn ensure_node(&mut self, node: &NodeId) -> bool {
        if self.nodes.contains_key(node) {
            return false;
        }
        self.nodes.insert(
            node.clone(),
            NodeEntry {
                seq: self.next_node_seq,
                metadata: PropertyMap::new(),
                edges: BTreeSet::new(),
            },
        );
        self.next_node_seq += 1;
        true
    }

    fn check_members(key: &EdgeKey) -> HyperdrawResult<()> {
        if key.size() == 0 {
            return Err(HyperdrawError::invalid_parameter(
                "hyperedge must contain at least one node",
            ));
        }
        Ok(())
    }

    fn check_weight_value(weight: f64) -> HyperdrawResult<()> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(HyperdrawError::invalid_weight(format!(
                "weight must be positive and finite, got {weight}"
            )));
        }
        Ok(())
    }

    fn check_weight(&self, weight: f64) -> HyperdrawResult<()> {
        Self::check_weight_value(weight)?;
        if !self.weighted && weight != 1.0 {
            return Err(HyperdrawError::invalid_weight(format!(
                "weight {weight} supplied on an unweighted store"
            )));
        }
        Ok(())
    }

    /// Insert a validated edge.
    fn insert(&mut self, edge: NewEdge) -> EdgeId {
        let NewEdge {
            key,
            weight,
            metadata,
        } = edge;

        for node in key.nodes().iter() {
            self.ensure_node(node);
        }
        if let Some(layer) = key.layer() {
            self.layers.insert(layer.to_string());
        }

        if let Some(&id) = self.key_to_id.get(&key) {
            if let Some(entry) = self.edges.get_mut(&id) {
                if self.weighted {
                    entry.weight = weight.unwrap_or(entry.weight + 1.0);
                }
                if let Some(metadata) = metadata {
                    entry.metadata = metadata;
                }
            }
            return id;
        }

        let id = EdgeId::new(self.next_edge_id);
        self.next_edge_id += 1;
        self.bind(id, key, weight.unwrap_or(1.0), metadata.unwrap_or_default());
        id
    }

    fn bind(&mut self, id: EdgeId, key: EdgeKey, weight: f64, metadata: PropertyMap) {
        for node in key.nodes().iter() {
            if let Some(entry) = self.nodes.get_mut(node) {
                entry.edges.insert(id);
            }
        }
        self.key_to_id.insert(key.clone(), id);
        self.edges.insert(
            id,
            EdgeEntry {
                key,
                weight,
                metadata,
            },
        );
    }

    fn remove_by_id(&mut self, id: EdgeId) -> Option<EdgeKey> {
        let entry = self.edges.remove(&id)?;
        self.key_to_id.remove(&entry.key);
        for node in entry.key.nodes().iter() {
            if let Some(node_entry) = self.nodes.get_mut(node) {
                node_entry.edges.remove(&id);
            }
        }
        debug!("removed hyperedge {id} {}", entry.key);
        Some(entry.key)
    }
}

impl From<EdgeStore> for StoreSnapshot {
    fn from(store: EdgeStore) -> Self {
        let mut nodes: Vec<(NodeId, NodeEntry)> = store.nodes.into_iter().collect();
        nodes.sort_unstable_by_key(|(_, entry)| entry.seq);

        Self {
            weighted: store.weighted,
            next_edge_id: store.next_edge_id,
            nodes: nodes
                .into_iter()
                .map(|(id, entry)| NodeRecord {
                    id,
                    metadata: entry.metadata,
                })
                .collect(),
            edges: store
                .edges
                .into_iter()
                .map(|(id, entry)| EdgeRecord {
                    id,
                    key: entry.key,
                    weight: entry.weight,
                    metadata: entry.metadata,
                })
                .collect(),
            layers: store.layers.into_iter().collect(),
        }
    }
}

impl TryFrom<StoreSnapshot> for EdgeStore {
    type Error = HyperdrawError;

    fn try_from(snapshot: StoreSnapshot) -> HyperdrawResult<Self> {
        let mut store = Self::new(snapshot.weighted);
        store.next_edge_id = snapshot.next_edge_id;
        store.layers = snapshot.layers.into_iter().collect();

        for record in snapshot.nodes {
            store.add_node(record.id, Some(record.metadata));
        }

        for record in snapshot.edges {
            let key = record.key;
            Self::check_members(&key)?;
            store.check_weight(record.weight)?;
            if record.id.get() >= store.next_edge_id {
                return Err(HyperdrawError::invalid_batch(format!(
                    "edge id {} is not below the next id {}",
                    record.id, store.next_edge_id
                )));
            }
            if store.edges.contains_key(&record.id) || store.key_to_id.contains_key(&key) {
                return Err(HyperdrawError::invalid_batch(format!(
                    "edge {} ({key}) is bound twice",
                    record.id
                )));
            }
            for node in key.nodes().iter() {
                store.ensure_node(node);
            }
            if let Some(layer) = key.layer() {
                store.layers.insert(layer.to_string());
            }
            store.bind(record.id, key, record.weight, record.metadata);
        }

        Ok(store)
    }
}
