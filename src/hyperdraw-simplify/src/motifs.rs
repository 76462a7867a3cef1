//! Detection of the structural motifs removed by polygonal simplification.
//!
//! All scans are brute force: pairs for [`strangled_pairs`] and
//! [`shared_triples`], triples for [`shared_pairs`].

use std::collections::{BTreeSet, HashSet};

use hyperdraw_core::{EdgeId, EdgeStore, NodeId};
use serde::{Deserialize, Serialize};

/// A hyperedge whose members are a strict subset of another's, both of size
/// greater than 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StrangledPair {
    pub outer: EdgeId,
    pub inner: EdgeId,
}

/// Two hyperedges sharing exactly three nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedTriple {
    pub edges: [EdgeId; 2],
    pub shared: BTreeSet<NodeId>,
}

/// Three hyperedges whose common intersection is exactly two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedPair {
    pub edges: [EdgeId; 3],
    pub shared: BTreeSet<NodeId>,
}

/// Every motif found in one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Motifs {
    pub strangled: Vec<StrangledPair>,
    pub shared_triples: Vec<SharedTriple>,
    pub shared_pairs: Vec<SharedPair>,
}

impl Motifs {
    /// Whether any rewritable motif was found. Strangled pairs do not count.
    pub fn has_rewritable(&self) -> bool {
        !self.shared_triples.is_empty() || !self.shared_pairs.is_empty()
    }
}

/// Scans for every motif class.
pub fn detect(store: &EdgeStore) -> Motifs {
    let edges = member_sets(store);
    Motifs {
        strangled: scan_strangled(&edges),
        shared_triples: scan_shared_triples(&edges),
        shared_pairs: scan_shared_pairs(&edges),
    }
}

/// Nested hyperedges of size greater than 2.
pub fn strangled_pairs(store: &EdgeStore) -> Vec<StrangledPair> {
    scan_strangled(&member_sets(store))
}

/// Pairs of hyperedges sharing exactly three nodes.
pub fn shared_triples(store: &EdgeStore) -> Vec<SharedTriple> {
    scan_shared_triples(&member_sets(store))
}

/// Triples of hyperedges whose common intersection is exactly two nodes.
///
/// Triples over the same two nodes are reported once, since rewriting one of
/// them rewrites every hyperedge holding those nodes.
pub fn shared_pairs(store: &EdgeStore) -> Vec<SharedPair> {
    scan_shared_pairs(&member_sets(store))
}

fn member_sets(store: &EdgeStore) -> Vec<(EdgeId, BTreeSet<NodeId>)> {
    store
        .edges()
        .map(|(id, key)| (id, key.nodes().iter().cloned().collect()))
        .collect()
}

fn scan_strangled(edges: &[(EdgeId, BTreeSet<NodeId>)]) -> Vec<StrangledPair> {
    let mut found = Vec::new();
    for (i, (a, a_nodes)) in edges.iter().enumerate() {
        for (b, b_nodes) in &edges[i + 1..] {
            if a_nodes.len() <= 2 || b_nodes.len() <= 2 || a_nodes.len() == b_nodes.len() {
                continue;
            }
            if a_nodes.len() < b_nodes.len() && a_nodes.is_subset(b_nodes) {
                found.push(StrangledPair {
                    outer: *b,
                    inner: *a,
                });
            } else if b_nodes.len() < a_nodes.len() && b_nodes.is_subset(a_nodes) {
                found.push(StrangledPair {
                    outer: *a,
                    inner: *b,
                });
            }
        }
    }
    found
}

fn scan_shared_triples(edges: &[(EdgeId, BTreeSet<NodeId>)]) -> Vec<SharedTriple> {
    let mut found = Vec::new();
    for (i, (a, a_nodes)) in edges.iter().enumerate() {
        for (b, b_nodes) in &edges[i + 1..] {
            let shared: BTreeSet<NodeId> = a_nodes.intersection(b_nodes).cloned().collect();
            if shared.len() == 3 {
                found.push(SharedTriple {
                    edges: [*a, *b],
                    shared,
                });
            }
        }
    }
    found
}

fn scan_shared_pairs(edges: &[(EdgeId, BTreeSet<NodeId>)]) -> Vec<SharedPair> {
    let mut found = Vec::new();
    let mut seen: HashSet<BTreeSet<NodeId>> = HashSet::new();
    for (i, (a, a_nodes)) in edges.iter().enumerate() {
        for (j, (b, b_nodes)) in edges.iter().enumerate().skip(i + 1) {
            let ab: BTreeSet<NodeId> = a_nodes.intersection(b_nodes).cloned().collect();
            if ab.len() < 2 {
                continue;
            }
            for (c, c_nodes) in &edges[j + 1..] {
                let shared: BTreeSet<NodeId> = ab.intersection(c_nodes).cloned().collect();
                if shared.len() == 2 && seen.insert(shared.clone()) {
                    found.push(SharedPair {
                        edges: [*a, *b, *c],
                        shared,
                    });
                }
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use hyperdraw_core::StoreFixture;

    use super::*;

    fn set(ids: &[i64]) -> BTreeSet<NodeId> {
        ids.iter().copied().map(NodeId::from).collect()
    }

    #[test]
    fn test_nested_edges_are_strangled() {
        let fixture = StoreFixture::nested();
        let pairs = strangled_pairs(fixture.store());
        assert_eq!(
            pairs,
            vec![StrangledPair {
                outer: fixture.edge_id("outer").unwrap(),
                inner: fixture.edge_id("inner").unwrap(),
            }]
        );
    }

    #[test]
    fn test_small_subsets_are_not_strangled() {
        let store = StoreFixture::mixed_orders().into_store();
        // (3,6) sits inside nothing, (7,8,15) is not inside (6,7,8,9)
        assert!(strangled_pairs(&store).is_empty());
    }

    #[test]
    fn test_shared_triple_found() {
        let fixture = StoreFixture::shared_triple();
        let motifs = detect(fixture.store());
        assert_eq!(motifs.shared_triples.len(), 1);
        assert_eq!(motifs.shared_triples[0].shared, set(&[2, 3, 4]));
        assert!(motifs.shared_pairs.is_empty());
        assert!(motifs.has_rewritable());
    }

    #[test]
    fn test_shared_pair_found_once() {
        let mut fixture = StoreFixture::shared_pair();
        fixture.add_edge("d", [1, 2, 6]);
        let pairs = shared_pairs(fixture.store());
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].shared, set(&[1, 2]));
    }

    #[test]
    fn test_mixed_orders_has_no_rewritable_motif() {
        let store = StoreFixture::mixed_orders().into_store();
        let motifs = detect(&store);
        assert!(!motifs.has_rewritable());
    }
}
