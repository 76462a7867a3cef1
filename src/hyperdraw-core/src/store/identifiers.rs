//! Identifiers for nodes and hyperedges.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a node.
///
/// `Int` and `Name` carry caller-supplied identifiers. `Fusion` and `Dummy`
/// are synthetic nodes introduced by simplification; being separate variants
/// they can never collide with a caller id, whatever range the caller uses.
///
/// ```rust
/// use hyperdraw_core::NodeId;
///
/// let real = NodeId::from(-1);
/// let dummy = NodeId::Dummy(1);
///
/// assert_ne!(real, dummy);
/// assert_eq!(dummy.to_string(), "-1");
/// assert!(dummy.is_synthetic());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeId {
    /// Integer identifier supplied by the caller.
    Int(i64),
    /// String identifier supplied by the caller.
    Name(String),
    /// Node standing for a fused intersection of nodes.
    Fusion(u64),
    /// Placeholder that separates a nested hyperedge from its superset.
    Dummy(u64),
}

impl NodeId {
    /// Check if this node was introduced by simplification.
    pub const fn is_synthetic(&self) -> bool {
        matches!(self, Self::Fusion(_) | Self::Dummy(_))
    }

    /// Check if this node carries a caller-supplied identifier.
    pub const fn is_real(&self) -> bool {
        !self.is_synthetic()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Name(name) => write!(f, "{name}"),
            Self::Fusion(counter) => write!(f, "f{counter}"),
            Self::Dummy(counter) => write!(f, "-{counter}"),
        }
    }
}

impl From<i64> for NodeId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<i32> for NodeId {
    fn from(id: i32) -> Self {
        Self::Int(i64::from(id))
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        Self::Int(i64::from(id))
    }
}

impl From<&str> for NodeId {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for NodeId {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<&NodeId> for NodeId {
    fn from(id: &NodeId) -> Self {
        id.clone()
    }
}

/// Dense hyperedge identifier, allocated once per canonical key and never
/// reused within a store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EdgeId(u64);

impl EdgeId {
    /// Wrap a raw id.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}
