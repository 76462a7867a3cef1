//! Testing utilities and helpers for hyperdraw-core.
//!
//! Fixtures for recurring hypergraph shapes and fluent assertions over an
//! [`EdgeStore`], shared by the unit and integration tests of every crate.

use std::collections::HashMap;

use crate::store::{EdgeId, EdgeKey, EdgeStore, NewEdge, NodeId};

/// Test fixture builder for common hypergraph scenarios.
pub struct StoreFixture {
    store: EdgeStore,
    edges: HashMap<String, EdgeId>,
}

impl StoreFixture {
    /// Create a new empty fixture.
    pub fn new(weighted: bool) -> Self {
        Self {
            store: EdgeStore::new(weighted),
            edges: HashMap::new(),
        }
    }

    /// Five edges mixing a 4-edge, two triangles, a pair and a chain link:
    /// `(6,7,8,9) (7,8,15) (8,9,14) (3,6) (1,2,3)`.
    pub fn mixed_orders() -> Self {
        let mut fixture = Self::new(false);
        fixture.add_edge("square", [6, 7, 8, 9]);
        fixture.add_edge("left", [7, 8, 15]);
        fixture.add_edge("right", [8, 9, 14]);
        fixture.add_edge("bridge", [3, 6]);
        fixture.add_edge("tail", [1, 2, 3]);
        fixture
    }

    /// Two hyperedges sharing exactly three nodes.
    pub fn shared_triple() -> Self {
        let mut fixture = Self::new(false);
        fixture.add_edge("a", [1, 2, 3, 4]);
        fixture.add_edge("b", [2, 3, 4, 5]);
        fixture
    }

    /// Three hyperedges whose common intersection is exactly two nodes.
    pub fn shared_pair() -> Self {
        let mut fixture = Self::new(false);
        fixture.add_edge("a", [1, 2, 3]);
        fixture.add_edge("b", [1, 2, 4]);
        fixture.add_edge("c", [1, 2, 5]);
        fixture
    }

    /// A hyperedge nested inside a larger one.
    pub fn nested() -> Self {
        let mut fixture = Self::new(false);
        fixture.add_edge("outer", [1, 2, 3, 4, 5]);
        fixture.add_edge("inner", [2, 3, 4]);
        fixture
    }

    /// Add an undirected hyperedge and track it by name.
    pub fn add_edge<I, T>(&mut self, name: &str, members: I) -> EdgeId
    where
        I: IntoIterator<Item = T>,
        T: Into<NodeId>,
    {
        let edge_id = self
            .store
            .add_edge(NewEdge::new(members))
            .expect("fixture edges are valid");
        self.edges.insert(name.to_string(), edge_id);
        edge_id
    }

    /// Get the store.
    pub const fn store(&self) -> &EdgeStore {
        &self.store
    }

    /// Get the store mutably.
    pub fn store_mut(&mut self) -> &mut EdgeStore {
        &mut self.store
    }

    /// Take the store out of the fixture.
    pub fn into_store(self) -> EdgeStore {
        self.store
    }

    /// Get an edge ID by name.
    pub fn edge_id(&self, name: &str) -> Option<EdgeId> {
        self.edges.get(name).copied()
    }

    /// Get the key of a named edge.
    pub fn edge_key(&self, name: &str) -> Option<&EdgeKey> {
        self.edge_id(name).and_then(|id| self.store.edge_key(id))
    }
}

/// Assertion helpers for testing edge stores.
pub struct StoreAssertions<'a> {
    store: &'a EdgeStore,
}

impl<'a> StoreAssertions<'a> {
    /// Create new assertions for a store.
    pub const fn new(store: &'a EdgeStore) -> Self {
        Self { store }
    }

    /// Assert the number of nodes.
    #[must_use]
    pub fn assert_node_count(self, expected: usize) -> Self {
        assert_eq!(
            self.store.num_nodes(),
            expected,
            "Expected {} nodes, found {}",
            expected,
            self.store.num_nodes()
        );
        self
    }

    /// Assert the number of hyperedges.
    #[must_use]
    pub fn assert_edge_count(self, expected: usize) -> Self {
        assert_eq!(
            self.store.num_edges(),
            expected,
            "Expected {} hyperedges, found {}",
            expected,
            self.store.num_edges()
        );
        self
    }

    /// Assert that a hyperedge is stored.
    #[must_use]
    pub fn assert_has_edge(self, key: &EdgeKey) -> Self {
        assert!(self.store.contains_edge(key), "Expected hyperedge {key}");
        self
    }

    /// Assert that a hyperedge is absent.
    #[must_use]
    pub fn assert_no_edge(self, key: &EdgeKey) -> Self {
        assert!(!self.store.contains_edge(key), "Unexpected hyperedge {key}");
        self
    }

    /// Assert that a node is present.
    #[must_use]
    pub fn assert_has_node(self, node: &NodeId) -> Self {
        assert!(self.store.contains_node(node), "Expected node {node}");
        self
    }

    /// Assert that a node is absent.
    #[must_use]
    pub fn assert_no_node(self, node: &NodeId) -> Self {
        assert!(!self.store.contains_node(node), "Unexpected node {node}");
        self
    }

    /// Assert that every node referenced by an edge is in the node set.
    #[must_use]
    pub fn assert_closed(self) -> Self {
        for (id, key) in self.store.edges() {
            for node in key.nodes().iter() {
                assert!(
                    self.store.contains_node(node),
                    "Hyperedge {id} {key} references missing node {node}"
                );
            }
        }
        self
    }
}
