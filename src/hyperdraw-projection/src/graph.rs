//! Arena-backed simple graph used as the output of every projection.

use std::collections::HashMap;
use std::fmt;

use common_error::{HyperdrawError, HyperdrawResult};
use serde::{Deserialize, Serialize};

/// Dense vertex identifier, assigned in insertion order.
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
pub struct VertexId(u32);

impl VertexId {
    /// Returns the zero-based index of the vertex.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize)]
struct VertexEntry<N> {
    data: N,
    /// Successors (directed) or neighbors (undirected).
    out: Vec<VertexId>,
    /// Predecessors; empty for undirected graphs.
    inc: Vec<VertexId>,
}

/// An edge of a [`Graph`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge<E> {
    pub source: VertexId,
    pub target: VertexId,
    pub data: E,
}

/// Simple graph: no self loops, at most one edge per vertex pair (ordered
/// pair when directed, unordered otherwise).
#[derive(Debug, Clone, Serialize)]
pub struct Graph<N, E> {
    directed: bool,
    vertices: Vec<VertexEntry<N>>,
    edges: Vec<GraphEdge<E>>,
    #[serde(skip)]
    pairs: HashMap<(VertexId, VertexId), usize>,
}

impl<N, E> Graph<N, E> {
    /// Creates an empty undirected graph.
    pub fn undirected() -> Self {
        Self::new(false)
    }

    /// Creates an empty directed graph.
    pub fn directed() -> Self {
        Self::new(true)
    }

    /// Creates an empty graph.
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            vertices: Vec::new(),
            edges: Vec::new(),
            pairs: HashMap::new(),
        }
    }

    /// Whether edges are ordered pairs.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Returns the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Adds a vertex and returns its identifier.
    pub fn add_vertex(&mut self, data: N) -> VertexId {
        let id = VertexId(self.vertices.len() as u32);
        self.vertices.push(VertexEntry {
            data,
            out: Vec::new(),
            inc: Vec::new(),
        });
        id
    }

    fn pair(&self, source: VertexId, target: VertexId) -> (VertexId, VertexId) {
        if self.directed || source <= target {
            (source, target)
        } else {
            (target, source)
        }
    }

    /// Adds an edge. Returns `false` if the pair is already connected.
    pub fn add_edge(&mut self, source: VertexId, target: VertexId, data: E) -> HyperdrawResult<bool> {
        for id in [source, target] {
            if id.index() >= self.vertices.len() {
                return Err(HyperdrawError::internal(format!("invalid vertex id: {id}")));
            }
        }
        if source == target {
            return Err(HyperdrawError::internal(format!("self loop on vertex {source}")));
        }

        let pair = self.pair(source, target);
        if self.pairs.contains_key(&pair) {
            return Ok(false);
        }
        self.pairs.insert(pair, self.edges.len());
        self.edges.push(GraphEdge {
            source,
            target,
            data,
        });

        self.vertices[source.index()].out.push(target);
        if self.directed {
            self.vertices[target.index()].inc.push(source);
        } else {
            self.vertices[target.index()].out.push(source);
        }
        Ok(true)
    }

    /// Returns a reference to a vertex's data.
    pub fn vertex(&self, id: VertexId) -> Option<&N> {
        self.vertices.get(id.index()).map(|entry| &entry.data)
    }

    /// Returns all vertices with their data.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &N)> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(index, entry)| (VertexId(index as u32), &entry.data))
    }

    /// Returns all edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &GraphEdge<E>> {
        self.edges.iter()
    }

    /// Returns the data of the edge between two vertices.
    pub fn edge(&self, source: VertexId, target: VertexId) -> Option<&E> {
        self.pairs
            .get(&self.pair(source, target))
            .map(|&index| &self.edges[index].data)
    }

    /// Checks if two vertices are connected (from `source` to `target` when
    /// directed).
    pub fn has_edge(&self, source: VertexId, target: VertexId) -> bool {
        self.pairs.contains_key(&self.pair(source, target))
    }

    /// Successors (directed) or neighbors (undirected) of a vertex.
    pub fn neighbors(&self, id: VertexId) -> Option<&[VertexId]> {
        self.vertices.get(id.index()).map(|entry| entry.out.as_slice())
    }

    /// Predecessors of a vertex; neighbors on undirected graphs.
    pub fn predecessors(&self, id: VertexId) -> Option<&[VertexId]> {
        self.vertices.get(id.index()).map(|entry| {
            if self.directed {
                entry.inc.as_slice()
            } else {
                entry.out.as_slice()
            }
        })
    }

    /// Number of incident edges (in + out for directed graphs).
    pub fn degree(&self, id: VertexId) -> Option<usize> {
        self.vertices
            .get(id.index())
            .map(|entry| entry.out.len() + entry.inc.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_vertices_edges_and_neighbors() {
        let mut graph = Graph::undirected();
        let a = graph.add_vertex("alpha");
        let b = graph.add_vertex("beta");
        let c = graph.add_vertex("gamma");

        assert!(graph.add_edge(a, b, 1.0).unwrap());
        assert!(graph.add_edge(c, a, 2.0).unwrap());
        assert!(!graph.add_edge(b, a, 3.0).unwrap());

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.neighbors(a).unwrap(), &[b, c]);
        assert_eq!(graph.edge(b, a), Some(&1.0));
        assert_eq!(graph.degree(a), Some(2));
        assert_eq!(graph.vertex(c), Some(&"gamma"));
    }

    #[test]
    fn test_directed_pairs_are_ordered() {
        let mut graph = Graph::directed();
        let a = graph.add_vertex(());
        let b = graph.add_vertex(());

        assert!(graph.add_edge(a, b, ()).unwrap());
        assert!(graph.add_edge(b, a, ()).unwrap());
        assert!(!graph.add_edge(a, b, ()).unwrap());
        assert!(graph.has_edge(a, b));
        assert_eq!(graph.predecessors(a).unwrap(), &[b]);
        assert_eq!(graph.degree(a), Some(2));
    }

    #[test]
    fn test_invalid_edges_are_rejected() {
        let mut graph: Graph<(), ()> = Graph::undirected();
        let a = graph.add_vertex(());
        assert!(graph.add_edge(a, a, ()).is_err());
        assert!(graph.add_edge(a, VertexId(7), ()).is_err());
    }
}
