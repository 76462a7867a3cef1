//! Serializable form of an [`EdgeStore`](super::EdgeStore).
//!
//! Persistence collaborators serialize this type with the serde format of
//! their choice. Keys canonicalize as they deserialize; restoring goes
//! through `TryFrom`, which re-checks the store invariants.

use serde::{Deserialize, Serialize};

use super::{EdgeId, EdgeKey, NodeId};
use crate::types::PropertyMap;

/// Owned copy of a store's contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Whether weights are meaningful.
    pub weighted: bool,
    /// Next id the store would allocate.
    pub next_edge_id: u64,
    /// Nodes in insertion order.
    pub nodes: Vec<NodeRecord>,
    /// Hyperedges by ascending id.
    pub edges: Vec<EdgeRecord>,
    /// Every layer label seen.
    pub layers: Vec<String>,
}

/// A node and its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub metadata: PropertyMap,
}

/// A hyperedge binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub id: EdgeId,
    pub key: EdgeKey,
    pub weight: f64,
    pub metadata: PropertyMap,
}
