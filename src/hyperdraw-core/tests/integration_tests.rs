//! Integration tests for hyperdraw-core
//!
//! End-to-end behavior of the edge store through its public API, without
//! duplicating the unit tests in individual modules.

use hyperdraw_core::*;

#[test]
fn test_fixture_usage() {
    let fixture = StoreFixture::mixed_orders();

    let _ = StoreAssertions::new(fixture.store())
        .assert_node_count(9)
        .assert_edge_count(5)
        .assert_has_edge(&EdgeKey::undirected([9, 8, 7, 6]))
        .assert_no_edge(&EdgeKey::undirected([6, 15]))
        .assert_closed();

    assert_eq!(
        fixture.edge_key("bridge"),
        Some(&EdgeKey::undirected([3, 6]))
    );
}

#[test]
fn test_ids_are_dense_and_never_reused() {
    let mut store = EdgeStore::new(false);
    let ids: Vec<EdgeId> = (0..4)
        .map(|i| store.add_edge(NewEdge::new([i, i + 1])).unwrap())
        .collect();
    assert_eq!(
        ids,
        (0..4).map(EdgeId::new).collect::<Vec<_>>()
    );

    store.remove_edge(&EdgeKey::undirected([1, 2])).unwrap();
    let fresh = store.add_edge(NewEdge::new([1, 2])).unwrap();
    assert_eq!(fresh, EdgeId::new(4));
    assert_eq!(store.edge_key(EdgeId::new(1)), None);
    assert_eq!(store.edge_key(fresh), Some(&EdgeKey::undirected([1, 2])));
}

#[test]
fn test_mixed_node_kinds() {
    let mut store = EdgeStore::new(false);
    store.add_edge(NewEdge::new(["alice", "bob"])).unwrap();
    store.add_edge(NewEdge::new([NodeId::from(1), NodeId::from("alice")])).unwrap();

    assert_eq!(store.num_nodes(), 3);
    assert_eq!(store.degree(&NodeId::from("alice")).unwrap(), 2);
}

#[test]
fn test_temporal_and_multiplex_keys() {
    let mut store = EdgeStore::new(true);
    store
        .add_edges(
            EdgeBatch::new(vec![vec![1, 2], vec![1, 2], vec![2, 3]]).with_times([1, 2, 1]),
        )
        .unwrap();
    assert_eq!(store.num_edges(), 3);
    assert_eq!(store.layers().count(), 0);

    store
        .add_edges(EdgeBatch::new(vec![vec![1, 2]]).with_layers(["friends"]))
        .unwrap();
    assert_eq!(store.layers().collect::<Vec<_>>(), vec!["friends"]);
    assert_eq!(
        store
            .get_weight(&EdgeKey::undirected([1, 2]).at_time(2))
            .unwrap(),
        1.0
    );
}

#[test]
fn test_directed_edges() {
    let mut store = EdgeStore::new(false);
    let forward = store.add_edge(NewEdge::directed([1, 2], [3])).unwrap();
    let backward = store.add_edge(NewEdge::directed([3], [1, 2])).unwrap();
    let same = store.add_edge(NewEdge::directed([2, 1], [3])).unwrap();

    assert_ne!(forward, backward);
    assert_eq!(forward, same);
    assert!(store.has_directed_edges());
    assert_eq!(store.edge_key(forward).unwrap().order(), 2);
}

#[test]
fn test_metadata_listing() {
    let mut store = EdgeStore::new(false);
    let mut metadata = PropertyMap::new();
    metadata.insert("community".to_string(), Value::from(2));
    store.add_node("x", Some(metadata.clone()));
    store
        .add_edge(NewEdge::new(["x", "y"]).with_metadata(metadata.clone()))
        .unwrap();

    let nodes: Vec<_> = store.nodes_with_metadata().collect();
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].1, &metadata);
    assert!(nodes[1].1.is_empty());

    let edges: Vec<_> = store.edges_with_metadata().collect();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].2, &metadata);
}

#[test]
fn test_set_weight_respects_weighting() {
    let mut unweighted = StoreFixture::shared_triple().into_store();
    let key = EdgeKey::undirected([1, 2, 3, 4]);
    assert!(matches!(
        unweighted.set_weight(&key, 3.0),
        Err(HyperdrawError::InvalidWeight(_))
    ));

    let mut weighted = EdgeStore::new(true);
    weighted.add_edge(NewEdge::from_key(key.clone())).unwrap();
    weighted.set_weight(&key, 3.0).unwrap();
    assert_eq!(weighted.get_weight(&key).unwrap(), 3.0);
}

#[test]
fn test_store_json_round_trip() {
    let mut store = StoreFixture::mixed_orders().into_store();
    store.add_node("lonely", None);
    store.remove_edge(&EdgeKey::undirected([3, 6])).unwrap();

    let json = serde_json::to_string(&store).unwrap();
    let restored: EdgeStore = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.num_nodes(), store.num_nodes());
    assert_eq!(restored.num_edges(), 4);
    assert_eq!(
        restored.edges().collect::<Vec<_>>(),
        store.edges().collect::<Vec<_>>()
    );
}

#[test]
fn test_deserialized_key_shares_id_with_constructed_key() {
    let key: EdgeKey = serde_json::from_str(
        r#"{"members":{"Undirected":[{"Int":3},{"Int":1},{"Int":2}]},"tag":"None"}"#,
    )
    .unwrap();

    let mut store = EdgeStore::new(false);
    let from_json = store.add_edge(NewEdge::from_key(key.clone())).unwrap();
    let constructed = store.add_edge(NewEdge::new([1, 2, 3])).unwrap();

    assert_eq!(from_json, constructed);
    assert_eq!(store.num_edges(), 1);
    assert_eq!(store.edge_id(&key), Some(constructed));
    assert_eq!(store.remove_edge(&key).unwrap(), constructed);
}

#[test]
fn test_from_edges_promotes_weighted_batch() {
    let batch = EdgeBatch::new([vec![1, 2], vec![2, 3, 4]]).with_weights([2.0, 0.5]);
    let store = EdgeStore::from_edges(false, batch).unwrap();

    assert!(store.is_weighted());
    assert_eq!(store.num_edges(), 2);
    assert_eq!(store.get_weight(&EdgeKey::undirected([4, 3, 2])).unwrap(), 0.5);
}

#[test]
fn test_from_edges_rejects_duplicates_in_weighted_batch() {
    let batch = EdgeBatch::new([vec![1, 2], vec![2, 1]]).with_weights([1.0, 3.0]);
    assert!(matches!(
        EdgeStore::from_edges(true, batch),
        Err(HyperdrawError::InvalidBatch(_))
    ));

    let unweighted = EdgeBatch::new([vec![1, 2], vec![2, 1]]);
    let store = EdgeStore::from_edges(false, unweighted).unwrap();
    assert_eq!(store.num_edges(), 1);
    assert!(!store.is_weighted());
}
