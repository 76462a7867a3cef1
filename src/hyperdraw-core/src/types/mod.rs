//! Dynamic values attached to nodes and hyperedges as metadata.

mod value;

pub use value::{PropertyMap, Value};
