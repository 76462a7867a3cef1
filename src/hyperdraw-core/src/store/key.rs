//! Canonical hyperedge keys.
//!
//! A key is the sorted, duplicate-free member set of a hyperedge (one set for
//! undirected edges, a tail and a head set for directed ones) paired with an
//! optional layer label or time value. Constructors canonicalize, so two
//! insertions of the same members in any order produce equal keys.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::NodeId;

/// Members of a hyperedge.
///
/// Deserialization canonicalizes, so keys read back from any serde format
/// compare equal to keys built through the constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawMembers")]
pub enum EdgeMembers {
    /// Unordered member set.
    Undirected(Vec<NodeId>),
    /// Directed hyperedge from `tail` to `head`.
    Directed {
        /// Source side.
        tail: Vec<NodeId>,
        /// Target side.
        head: Vec<NodeId>,
    },
}

/// Wire shape of [`EdgeMembers`] before canonicalization.
#[derive(Deserialize)]
#[serde(rename = "EdgeMembers")]
enum RawMembers {
    Undirected(Vec<NodeId>),
    Directed { tail: Vec<NodeId>, head: Vec<NodeId> },
}

impl From<RawMembers> for EdgeMembers {
    fn from(raw: RawMembers) -> Self {
        match raw {
            RawMembers::Undirected(nodes) => Self::undirected(nodes),
            RawMembers::Directed { tail, head } => Self::directed(tail, head),
        }
    }
}

fn canonical<I, T>(nodes: I) -> Vec<NodeId>
where
    I: IntoIterator<Item = T>,
    T: Into<NodeId>,
{
    let mut nodes: Vec<NodeId> = nodes.into_iter().map(Into::into).collect();
    nodes.sort_unstable();
    nodes.dedup();
    nodes
}

impl EdgeMembers {
    /// Canonical undirected member set.
    pub fn undirected<I, T>(nodes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<NodeId>,
    {
        Self::Undirected(canonical(nodes))
    }

    /// Canonical directed member sets.
    pub fn directed<I, J, T, U>(tail: I, head: J) -> Self
    where
        I: IntoIterator<Item = T>,
        J: IntoIterator<Item = U>,
        T: Into<NodeId>,
        U: Into<NodeId>,
    {
        Self::Directed {
            tail: canonical(tail),
            head: canonical(head),
        }
    }

    fn canonicalized(self) -> Self {
        match self {
            Self::Undirected(nodes) => Self::undirected(nodes),
            Self::Directed { tail, head } => Self::directed(tail, head),
        }
    }

    /// Check if this is a directed member set.
    pub const fn is_directed(&self) -> bool {
        matches!(self, Self::Directed { .. })
    }

    /// Distinct member nodes, sorted. For directed edges this is the union of
    /// tail and head.
    pub fn nodes(&self) -> Cow<'_, [NodeId]> {
        match self {
            Self::Undirected(nodes) => Cow::Borrowed(nodes),
            Self::Directed { tail, head } => {
                let union: BTreeSet<&NodeId> = tail.iter().chain(head).collect();
                Cow::Owned(union.into_iter().cloned().collect())
            }
        }
    }

    /// Source side; the whole member set for undirected edges.
    pub fn tail(&self) -> &[NodeId] {
        match self {
            Self::Undirected(nodes) => nodes,
            Self::Directed { tail, .. } => tail,
        }
    }

    /// Target side; the whole member set for undirected edges.
    pub fn head(&self) -> &[NodeId] {
        match self {
            Self::Undirected(nodes) => nodes,
            Self::Directed { head, .. } => head,
        }
    }

    /// Number of distinct member nodes.
    pub fn size(&self) -> usize {
        self.nodes().len()
    }

    /// Check if a node is a member.
    pub fn contains(&self, node: &NodeId) -> bool {
        match self {
            Self::Undirected(nodes) => nodes.binary_search(node).is_ok(),
            Self::Directed { tail, head } => {
                tail.binary_search(node).is_ok() || head.binary_search(node).is_ok()
            }
        }
    }

    /// Rewrite every member through `f`, re-canonicalizing the result.
    pub fn map_nodes<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&NodeId) -> NodeId,
    {
        match self {
            Self::Undirected(nodes) => Self::undirected(nodes.iter().map(&mut f)),
            Self::Directed { tail, head } => {
                let tail: Vec<NodeId> = tail.iter().map(&mut f).collect();
                Self::directed(tail, head.iter().map(&mut f))
            }
        }
    }

    /// Replace every member found in `removed` by the single `replacement`.
    ///
    /// On directed edges each side keeps the replacement only if it held at
    /// least one removed node.
    pub fn contract(&self, removed: &BTreeSet<NodeId>, replacement: &NodeId) -> Self {
        let side = |nodes: &[NodeId]| -> Vec<NodeId> {
            let hit = nodes.iter().any(|node| removed.contains(node));
            let mut kept: Vec<NodeId> = nodes
                .iter()
                .filter(|node| !removed.contains(node))
                .cloned()
                .collect();
            if hit {
                kept.push(replacement.clone());
            }
            kept
        };
        match self {
            Self::Undirected(nodes) => Self::undirected(side(nodes)),
            Self::Directed { tail, head } => Self::directed(side(tail), side(head)),
        }
    }

    /// Add one node. Directed edges receive it on the tail side.
    pub fn with_node(&self, node: NodeId) -> Self {
        match self {
            Self::Undirected(nodes) => {
                Self::undirected(nodes.iter().cloned().chain(std::iter::once(node)))
            }
            Self::Directed { tail, head } => Self::directed(
                tail.iter().cloned().chain(std::iter::once(node)),
                head.iter().cloned(),
            ),
        }
    }
}

impl<T: Into<NodeId>> From<Vec<T>> for EdgeMembers {
    fn from(nodes: Vec<T>) -> Self {
        Self::undirected(nodes)
    }
}

impl<T: Into<NodeId>, const N: usize> From<[T; N]> for EdgeMembers {
    fn from(nodes: [T; N]) -> Self {
        Self::undirected(nodes)
    }
}

/// Layer or time context of a hyperedge.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum EdgeTag {
    /// Plain hyperedge.
    #[default]
    None,
    /// Layer label of a multiplex hypergraph.
    Layer(String),
    /// Time value of a temporal hypergraph.
    Time(i64),
}

/// Canonical identity of a hyperedge.
///
/// ```rust
/// use hyperdraw_core::EdgeKey;
///
/// let a = EdgeKey::undirected([3, 1, 2]);
/// let b = EdgeKey::undirected([2, 3, 1, 1]);
///
/// assert_eq!(a, b);
/// assert_eq!(a.size(), 3);
/// assert_eq!(a.order(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeKey {
    members: EdgeMembers,
    tag: EdgeTag,
}

impl EdgeKey {
    /// Build a key from members, canonicalizing them.
    pub fn new(members: impl Into<EdgeMembers>) -> Self {
        Self {
            members: members.into().canonicalized(),
            tag: EdgeTag::None,
        }
    }

    /// Key of an undirected hyperedge.
    pub fn undirected<I, T>(nodes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<NodeId>,
    {
        Self {
            members: EdgeMembers::undirected(nodes),
            tag: EdgeTag::None,
        }
    }

    /// Key of a directed hyperedge.
    pub fn directed<I, J, T, U>(tail: I, head: J) -> Self
    where
        I: IntoIterator<Item = T>,
        J: IntoIterator<Item = U>,
        T: Into<NodeId>,
        U: Into<NodeId>,
    {
        Self {
            members: EdgeMembers::directed(tail, head),
            tag: EdgeTag::None,
        }
    }

    /// Attach a tag.
    #[must_use]
    pub fn with_tag(mut self, tag: EdgeTag) -> Self {
        self.tag = tag;
        self
    }

    /// Place the edge in a layer.
    #[must_use]
    pub fn in_layer(self, layer: impl Into<String>) -> Self {
        self.with_tag(EdgeTag::Layer(layer.into()))
    }

    /// Stamp the edge with a time value.
    #[must_use]
    pub fn at_time(self, time: i64) -> Self {
        self.with_tag(EdgeTag::Time(time))
    }

    /// Same tag, new members.
    pub fn with_members(&self, members: EdgeMembers) -> Self {
        Self {
            members: members.canonicalized(),
            tag: self.tag.clone(),
        }
    }

    /// Members of this edge.
    pub fn members(&self) -> &EdgeMembers {
        &self.members
    }

    /// Tag of this edge.
    pub fn tag(&self) -> &EdgeTag {
        &self.tag
    }

    /// Layer label, if any.
    pub fn layer(&self) -> Option<&str> {
        match &self.tag {
            EdgeTag::Layer(layer) => Some(layer),
            _ => None,
        }
    }

    /// Time value, if any.
    pub fn time(&self) -> Option<i64> {
        match self.tag {
            EdgeTag::Time(time) => Some(time),
            _ => None,
        }
    }

    /// Distinct member nodes, sorted.
    pub fn nodes(&self) -> Cow<'_, [NodeId]> {
        self.members.nodes()
    }

    /// Number of distinct member nodes.
    pub fn size(&self) -> usize {
        self.members.size()
    }

    /// `size - 1`. Zero for an empty key.
    pub fn order(&self) -> usize {
        self.size().saturating_sub(1)
    }

    /// Check if a node is a member.
    pub fn contains(&self, node: &NodeId) -> bool {
        self.members.contains(node)
    }

    /// Check if the edge is directed.
    pub const fn is_directed(&self) -> bool {
        self.members.is_directed()
    }
}

fn write_nodes(f: &mut fmt::Formatter<'_>, nodes: &[NodeId]) -> fmt::Result {
    write!(f, "(")?;
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{node}")?;
    }
    write!(f, ")")
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.members {
            EdgeMembers::Undirected(nodes) => write_nodes(f, nodes)?,
            EdgeMembers::Directed { tail, head } => {
                write_nodes(f, tail)?;
                write!(f, " -> ")?;
                write_nodes(f, head)?;
            }
        }
        match &self.tag {
            EdgeTag::None => Ok(()),
            EdgeTag::Layer(layer) => write!(f, "@{layer}"),
            EdgeTag::Time(time) => write!(f, "@t={time}"),
        }
    }
}

impl<T: Into<NodeId>> From<Vec<T>> for EdgeKey {
    fn from(nodes: Vec<T>) -> Self {
        Self::undirected(nodes)
    }
}

impl<T: Into<NodeId>, const N: usize> From<[T; N]> for EdgeKey {
    fn from(nodes: [T; N]) -> Self {
        Self::undirected(nodes)
    }
}
