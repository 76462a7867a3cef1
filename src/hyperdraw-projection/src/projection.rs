//! Graph plus the bidirectional map back to the objects it was built from.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use common_error::{HyperdrawError, HyperdrawResult};
use hyperdraw_core::{EdgeId, NodeId};
use serde::{Deserialize, Serialize};

use crate::graph::{Graph, VertexId};

/// A vertex of a bipartite projection: either an original node or the
/// synthetic vertex standing for a hyperedge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GraphObject {
    Node(NodeId),
    Edge(EdgeId),
}

impl GraphObject {
    /// Returns the node if this is a node vertex.
    pub fn as_node(&self) -> Option<&NodeId> {
        match self {
            Self::Node(node) => Some(node),
            Self::Edge(_) => None,
        }
    }

    /// Returns the hyperedge if this is a synthetic edge vertex.
    pub fn as_edge(&self) -> Option<EdgeId> {
        match self {
            Self::Node(_) => None,
            Self::Edge(id) => Some(*id),
        }
    }
}

impl fmt::Display for GraphObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(node) => write!(f, "N:{node}"),
            Self::Edge(id) => write!(f, "E:{id}"),
        }
    }
}

/// How hyperedges are turned into vertices of a bipartite projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMode {
    /// Every hyperedge becomes a synthetic vertex.
    #[default]
    Bipartite,
    /// Size-2 hyperedges become direct edges; larger ones get a synthetic vertex.
    ExtraNode,
}

impl FromStr for ProjectionMode {
    type Err = HyperdrawError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bipartite" => Ok(Self::Bipartite),
            "extra_node" => Ok(Self::ExtraNode),
            other => Err(HyperdrawError::invalid_mode(format!(
                "unknown projection mode '{other}', expected 'bipartite' or 'extra_node'"
            ))),
        }
    }
}

impl fmt::Display for ProjectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bipartite => write!(f, "bipartite"),
            Self::ExtraNode => write!(f, "extra_node"),
        }
    }
}

/// A projected graph whose vertices carry the object `O` they stand for.
///
/// `object_of` is the id → object direction (the vertex payload),
/// `vertex_of` the object → id direction.
#[derive(Debug, Clone)]
pub struct Projection<O, E> {
    graph: Graph<O, E>,
    index: HashMap<O, VertexId>,
}

impl<O, E> Projection<O, E>
where
    O: Clone + Eq + Hash,
{
    /// Creates an empty projection.
    pub fn new(directed: bool) -> Self {
        Self {
            graph: Graph::new(directed),
            index: HashMap::new(),
        }
    }

    /// Returns the vertex of `object`, inserting it if absent.
    pub fn insert_vertex(&mut self, object: O) -> VertexId {
        if let Some(&id) = self.index.get(&object) {
            return id;
        }
        let id = self.graph.add_vertex(object.clone());
        self.index.insert(object, id);
        id
    }

    /// Connects two objects, inserting missing vertices. Returns `false` when
    /// the pair was already connected.
    pub fn connect(&mut self, source: O, target: O, data: E) -> HyperdrawResult<bool> {
        let source = self.insert_vertex(source);
        let target = self.insert_vertex(target);
        self.graph.add_edge(source, target, data)
    }

    /// Returns the vertex standing for `object`.
    pub fn vertex_of(&self, object: &O) -> Option<VertexId> {
        self.index.get(object).copied()
    }

    /// Returns the object a vertex stands for.
    pub fn object_of(&self, id: VertexId) -> Option<&O> {
        self.graph.vertex(id)
    }

    /// Checks whether two objects are connected.
    pub fn contains_edge(&self, source: &O, target: &O) -> bool {
        match (self.vertex_of(source), self.vertex_of(target)) {
            (Some(source), Some(target)) => self.graph.has_edge(source, target),
            _ => false,
        }
    }

    /// Returns the data of the edge between two objects.
    pub fn edge_data(&self, source: &O, target: &O) -> Option<&E> {
        let source = self.vertex_of(source)?;
        let target = self.vertex_of(target)?;
        self.graph.edge(source, target)
    }

    /// Checks whether `object` has a vertex.
    pub fn contains_vertex(&self, object: &O) -> bool {
        self.index.contains_key(object)
    }

    /// Objects adjacent to `object` (successors when directed).
    pub fn neighbors_of(&self, object: &O) -> Vec<&O> {
        self.vertex_of(object)
            .and_then(|id| self.graph.neighbors(id))
            .map(|ids| ids.iter().filter_map(|&id| self.graph.vertex(id)).collect())
            .unwrap_or_default()
    }

    /// Iterates over edges as object pairs with their data.
    pub fn object_edges(&self) -> impl Iterator<Item = (&O, &O, &E)> {
        self.graph.edges().filter_map(|edge| {
            Some((
                self.graph.vertex(edge.source)?,
                self.graph.vertex(edge.target)?,
                &edge.data,
            ))
        })
    }

    /// The underlying graph.
    pub fn graph(&self) -> &Graph<O, E> {
        &self.graph
    }

    /// Returns the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether the projection is directed.
    pub fn is_directed(&self) -> bool {
        self.graph.is_directed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!(
            "bipartite".parse::<ProjectionMode>().unwrap(),
            ProjectionMode::Bipartite
        );
        assert_eq!(
            "extra_node".parse::<ProjectionMode>().unwrap(),
            ProjectionMode::ExtraNode
        );
        assert!(matches!(
            "star".parse::<ProjectionMode>(),
            Err(HyperdrawError::InvalidMode(_))
        ));
    }

    #[test]
    fn test_object_display_uses_namespace_prefix() {
        assert_eq!(GraphObject::Node(NodeId::from(4)).to_string(), "N:4");
        assert_eq!(GraphObject::Edge(EdgeId::new(2)).to_string(), "E:e2");
    }

    #[test]
    fn test_connect_reuses_vertices() {
        let mut projection: Projection<&str, ()> = Projection::new(false);
        assert!(projection.connect("a", "b", ()).unwrap());
        assert!(!projection.connect("b", "a", ()).unwrap());
        assert!(projection.connect("a", "c", ()).unwrap());

        assert_eq!(projection.vertex_count(), 3);
        assert!(projection.contains_edge(&"c", &"a"));
        let a = projection.vertex_of(&"a").unwrap();
        assert_eq!(projection.object_of(a), Some(&"a"));
        assert_eq!(projection.neighbors_of(&"a"), vec![&"b", &"c"]);
    }
}
