//! Simplification of hypergraphs for drawing.
//!
//! Two independent engines, usually composed by [`simplify`]:
//! - [`PolygonalSimplifier`] contracts overlap motifs into fusion nodes until
//!   a fixpoint, then [`unstrangle_edges`] separates nested hyperedges
//! - [`AgglomerativeSimplifier`] merges nodes with similar incidence using a
//!   [`UnionFind`] forest
//!
//! Every stage leaves its input untouched and returns a fresh store.

pub mod agglomerative;
pub mod motifs;
pub mod pipeline;
pub mod polygonal;
pub mod similarity;
pub mod union_find;
pub mod unstrangle;

mod rebuild;

pub use agglomerative::{agglomerative_simplification, Agglomeration, AgglomerativeSimplifier};
pub use motifs::{
    detect, shared_pairs, shared_triples, strangled_pairs, Motifs, SharedPair, SharedTriple,
    StrangledPair,
};
pub use pipeline::{simplify, Simplification};
pub use polygonal::{
    polygonal_simplification, PolygonalOutcome, PolygonalSimplifier, PolygonalStatus,
};
pub use similarity::{jaccard, node_similarity, SimilarityMatrix};
pub use union_find::UnionFind;
pub use unstrangle::unstrangle_edges;
