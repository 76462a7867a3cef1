//! All-pairs node similarity over incident-edge sets.

use std::collections::{BTreeSet, HashMap};

use common_error::HyperdrawResult;
use hyperdraw_core::{EdgeId, EdgeStore, NodeId};

/// Jaccard similarity `|A ∩ B| / |A ∪ B|`; 0 when both sets are empty.
pub fn jaccard(a: &BTreeSet<EdgeId>, b: &BTreeSet<EdgeId>) -> f64 {
    let shared = a.intersection(b).count();
    let union = a.len() + b.len() - shared;
    if union == 0 {
        0.0
    } else {
        shared as f64 / union as f64
    }
}

/// Dense symmetric matrix of node similarities, nodes in [`NodeId`] order.
#[derive(Debug, Clone, Default)]
pub struct SimilarityMatrix {
    nodes: Vec<NodeId>,
    index: HashMap<NodeId, usize>,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Nodes in row order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Row index of a node.
    pub fn index_of(&self, node: &NodeId) -> Option<usize> {
        self.index.get(node).copied()
    }

    /// Similarity between the nodes at rows `i` and `j`.
    pub fn at(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.nodes.len() + j]
    }

    /// Similarity between two nodes.
    pub fn get(&self, a: &NodeId, b: &NodeId) -> Option<f64> {
        Some(self.at(self.index_of(a)?, self.index_of(b)?))
    }

    /// Row pairs `i < j` whose similarity is at least `threshold`.
    pub fn pairs_at_least(&self, threshold: f64) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.nodes.len();
        (0..n).flat_map(move |i| {
            (i + 1..n)
                .filter(move |&j| self.at(i, j) >= threshold)
                .map(move |j| (i, j))
        })
    }
}

/// Jaccard similarity of every pair of distinct nodes.
///
/// The diagonal is 1. This is quadratic in the node count.
pub fn node_similarity(store: &EdgeStore) -> HyperdrawResult<SimilarityMatrix> {
    let nodes: Vec<NodeId> = store.nodes().cloned().collect();
    let n = nodes.len();
    let mut incident = Vec::with_capacity(n);
    for node in &nodes {
        incident.push(store.incident_edges(node)?);
    }

    let mut values = vec![0.0; n * n];
    for i in 0..n {
        values[i * n + i] = 1.0;
        for j in i + 1..n {
            let similarity = jaccard(incident[i], incident[j]);
            values[i * n + j] = similarity;
            values[j * n + i] = similarity;
        }
    }

    let index = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (node.clone(), i))
        .collect();
    Ok(SimilarityMatrix {
        nodes,
        index,
        values,
    })
}
