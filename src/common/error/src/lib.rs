//! Error types and result aliases for hyperdraw.
//!
//! Every crate in the workspace reports failures through [`HyperdrawError`].

mod error;

pub use error::{HyperdrawError, HyperdrawResult};
