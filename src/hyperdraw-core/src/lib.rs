//! Core data model for hyperdraw.
//!
//! This crate provides the canonical hyperedge store every other component
//! reads from:
//! - `NodeId` and `EdgeId` for identity
//! - `EdgeKey` for canonical, order-independent hyperedge identity
//! - `EdgeStore` for the deduplicating key ↔ id map with weights and metadata
//! - `Value` and `PropertyMap` for metadata

pub mod store;
pub mod testing;
pub mod types;

mod proptest_utils;

// Re-export commonly used types
pub use common_error::{HyperdrawError, HyperdrawResult};
pub use store::{
    EdgeBatch, EdgeId, EdgeKey, EdgeMembers, EdgeRecord, EdgeStore, EdgeTag, NewEdge, NodeId,
    NodeRecord, StoreSnapshot,
};
pub use testing::{StoreAssertions, StoreFixture};
pub use types::{PropertyMap, Value};
