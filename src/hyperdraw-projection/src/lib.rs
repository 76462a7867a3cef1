//! Graph projections of a hyperedge store.
//!
//! - [`bipartite_projection`]: nodes plus one synthetic vertex per hyperedge
//!   (optionally drawing pairs as direct edges)
//! - [`clique_projection`]: every hyperedge becomes a clique
//! - [`line_graph`] / [`directed_line_graph`]: hyperedges become vertices,
//!   connected when their overlap reaches a threshold
//!
//! Every projection takes explicit node/edge orders; vertex ids follow them.

pub mod bipartite;
pub mod clique;
pub mod graph;
pub mod line_graph;
pub mod projection;

pub use bipartite::{bipartite_projection, BipartiteProjection};
pub use clique::{clique_projection, CliqueProjection};
pub use graph::{Graph, GraphEdge, VertexId};
pub use line_graph::{directed_line_graph, line_graph, Distance, LineGraph};
pub use projection::{GraphObject, Projection, ProjectionMode};
