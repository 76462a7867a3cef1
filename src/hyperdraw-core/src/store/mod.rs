//! Hyperedge storage.
//!
//! - `NodeId` / `EdgeId` for identity
//! - `EdgeKey` for canonical hyperedge identity
//! - `NewEdge` / `EdgeBatch` for insertion requests
//! - `EdgeStore` for the deduplicating container

mod edge_store;
mod identifiers;
mod insert;
mod key;
mod snapshot;

pub use edge_store::EdgeStore;
pub use identifiers::{EdgeId, NodeId};
pub use insert::{EdgeBatch, NewEdge};
pub use key::{EdgeKey, EdgeMembers, EdgeTag};
pub use snapshot::{EdgeRecord, NodeRecord, StoreSnapshot};
