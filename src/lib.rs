//! hyperdraw - hypergraph store, projections, layouts and simplification
//!
//! hyperdraw keeps a canonical, deduplicated store of hyperedges and derives
//! from it the structures needed to draw a hypergraph: graph projections,
//! packing layouts and planarity-oriented simplifications.
//!
//! ```rust
//! use hyperdraw::core::{EdgeStore, NewEdge};
//! use hyperdraw::layout::{paoh_columns, NodeRanking};
//!
//! let mut store = EdgeStore::new(false);
//! store.add_edge(NewEdge::new([1, 2, 3])).unwrap();
//! store.add_edge(NewEdge::new([3, 4])).unwrap();
//!
//! let ranking = NodeRanking::alphabetic(&store);
//! let layout = paoh_columns(&store, &ranking, None).unwrap();
//! assert_eq!(layout.num_columns(), 2);
//! ```

#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

// Re-export member crates
pub use common_config as config;
pub use common_error as error;
pub use hyperdraw_core as core;
pub use hyperdraw_layout as layout;
pub use hyperdraw_projection as projection;
pub use hyperdraw_simplify as simplify;

/// hyperdraw version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
