//! Bipartite and extra-node projections.

use std::collections::HashMap;

use common_error::HyperdrawResult;
use hyperdraw_core::{EdgeId, EdgeKey, EdgeStore, NodeId};
use log::debug;

use crate::projection::{GraphObject, Projection, ProjectionMode};

/// Result of [`bipartite_projection`].
///
/// Edges carry a weight: 1 for membership edges, the hyperedge weight for
/// direct edges produced by [`ProjectionMode::ExtraNode`].
#[derive(Debug, Clone)]
pub struct BipartiteProjection {
    mode: ProjectionMode,
    projection: Projection<GraphObject, f64>,
    vertex_weights: HashMap<EdgeId, f64>,
}

impl BipartiteProjection {
    /// The mode the projection was built with.
    pub fn mode(&self) -> ProjectionMode {
        self.mode
    }

    /// The projected graph and its object maps.
    pub fn projection(&self) -> &Projection<GraphObject, f64> {
        &self.projection
    }

    /// Weight copied onto the synthetic vertex of a hyperedge. `None` for
    /// unweighted stores and for hyperedges drawn as direct edges.
    pub fn vertex_weight(&self, edge: EdgeId) -> Option<f64> {
        self.vertex_weights.get(&edge).copied()
    }

    /// Checks whether a hyperedge was given a synthetic vertex.
    pub fn has_edge_vertex(&self, edge: EdgeId) -> bool {
        self.projection.contains_vertex(&GraphObject::Edge(edge))
    }

    /// Checks whether two objects are connected.
    pub fn contains_edge(&self, source: &GraphObject, target: &GraphObject) -> bool {
        self.projection.contains_edge(source, target)
    }

    /// Consumes the result and returns the projection.
    pub fn into_projection(self) -> Projection<GraphObject, f64> {
        self.projection
    }
}

/// Projects the store onto a graph whose vertices are nodes and (synthetic)
/// hyperedges.
///
/// Node vertices are inserted first in `node_order`, then hyperedges in
/// `edge_order`. The output is directed when the store holds any directed
/// hyperedge: tail members point to the synthetic vertex and the synthetic
/// vertex points to head members.
pub fn bipartite_projection(
    store: &EdgeStore,
    mode: ProjectionMode,
    node_order: Option<&[NodeId]>,
    edge_order: Option<&[EdgeId]>,
) -> HyperdrawResult<BipartiteProjection> {
    let nodes = store.resolve_node_order(node_order)?;
    let edges = store.resolve_edge_order(edge_order)?;
    let directed = store.has_directed_edges();

    let mut projection = Projection::new(directed);
    for node in nodes {
        projection.insert_vertex(GraphObject::Node(node));
    }

    let mut vertex_weights = HashMap::new();
    for id in edges {
        let Some(key) = store.edge_key(id) else {
            continue;
        };
        let weight = store.weight_of(id).unwrap_or(1.0);

        if mode == ProjectionMode::ExtraNode && key.size() == 2 {
            add_direct_edge(&mut projection, key, directed, weight)?;
            continue;
        }

        let edge_vertex = GraphObject::Edge(id);
        projection.insert_vertex(edge_vertex.clone());
        if store.is_weighted() {
            vertex_weights.insert(id, weight);
        }

        if directed {
            for tail in key.members().tail() {
                projection.connect(GraphObject::Node(tail.clone()), edge_vertex.clone(), 1.0)?;
            }
            for head in key.members().head() {
                projection.connect(edge_vertex.clone(), GraphObject::Node(head.clone()), 1.0)?;
            }
        } else {
            for node in key.nodes().iter() {
                projection.connect(GraphObject::Node(node.clone()), edge_vertex.clone(), 1.0)?;
            }
        }
    }

    debug!(
        "{mode} projection: {} vertices, {} edges",
        projection.vertex_count(),
        projection.edge_count()
    );

    Ok(BipartiteProjection {
        mode,
        projection,
        vertex_weights,
    })
}

/// Draws a size-2 hyperedge as an ordinary edge between its members.
fn add_direct_edge(
    projection: &mut Projection<GraphObject, f64>,
    key: &EdgeKey,
    directed: bool,
    weight: f64,
) -> HyperdrawResult<()> {
    if directed {
        for tail in key.members().tail() {
            for head in key.members().head() {
                if tail != head {
                    projection.connect(
                        GraphObject::Node(tail.clone()),
                        GraphObject::Node(head.clone()),
                        weight,
                    )?;
                }
            }
        }
    } else {
        let nodes = key.nodes();
        projection.connect(
            GraphObject::Node(nodes[0].clone()),
            GraphObject::Node(nodes[1].clone()),
            weight,
        )?;
    }
    Ok(())
}
