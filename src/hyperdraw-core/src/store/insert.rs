//! Insertion requests for the edge store.

use common_error::{HyperdrawError, HyperdrawResult};

use super::{EdgeKey, EdgeMembers, EdgeTag, NodeId};
use crate::types::PropertyMap;

/// A single hyperedge insertion.
///
/// ```rust
/// use hyperdraw_core::{EdgeStore, NewEdge};
///
/// let mut store = EdgeStore::new(true);
/// store.add_edge(NewEdge::new([1, 2, 3]).with_weight(2.5)).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NewEdge {
    pub(crate) key: EdgeKey,
    pub(crate) weight: Option<f64>,
    pub(crate) metadata: Option<PropertyMap>,
}

impl NewEdge {
    /// Undirected hyperedge over `members`.
    pub fn new<I, T>(members: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<NodeId>,
    {
        Self::from_key(EdgeKey::undirected(members))
    }

    /// Directed hyperedge from `tail` to `head`.
    pub fn directed<I, J, T, U>(tail: I, head: J) -> Self
    where
        I: IntoIterator<Item = T>,
        J: IntoIterator<Item = U>,
        T: Into<NodeId>,
        U: Into<NodeId>,
    {
        Self::from_key(EdgeKey::directed(tail, head))
    }

    /// Insertion of an already built key.
    pub fn from_key(key: EdgeKey) -> Self {
        Self {
            key,
            weight: None,
            metadata: None,
        }
    }

    /// Place the edge in a layer.
    #[must_use]
    pub fn in_layer(mut self, layer: impl Into<String>) -> Self {
        self.key = self.key.in_layer(layer);
        self
    }

    /// Stamp the edge with a time value.
    #[must_use]
    pub fn at_time(mut self, time: i64) -> Self {
        self.key = self.key.at_time(time);
        self
    }

    /// Explicit weight; overwrites any stored weight.
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Metadata; replaces any stored metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: PropertyMap) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// The canonical key this insertion resolves to.
    pub fn key(&self) -> &EdgeKey {
        &self.key
    }
}

impl From<EdgeKey> for NewEdge {
    fn from(key: EdgeKey) -> Self {
        Self::from_key(key)
    }
}

/// Batch insertion expressed as parallel lists.
///
/// Optional lists must be as long as the member list.
#[derive(Debug, Clone, Default)]
pub struct EdgeBatch {
    members: Vec<EdgeMembers>,
    tags: Option<Vec<EdgeTag>>,
    weights: Option<Vec<f64>>,
    metadata: Option<Vec<PropertyMap>>,
}

impl EdgeBatch {
    /// Batch over the given member sets.
    pub fn new<I, M>(members: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<EdgeMembers>,
    {
        Self {
            members: members.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// One layer label per edge.
    #[must_use]
    pub fn with_layers<I, S>(mut self, layers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(
            layers
                .into_iter()
                .map(|layer| EdgeTag::Layer(layer.into()))
                .collect(),
        );
        self
    }

    /// One time value per edge.
    #[must_use]
    pub fn with_times(mut self, times: impl IntoIterator<Item = i64>) -> Self {
        self.tags = Some(times.into_iter().map(EdgeTag::Time).collect());
        self
    }

    /// One weight per edge.
    #[must_use]
    pub fn with_weights(mut self, weights: impl IntoIterator<Item = f64>) -> Self {
        self.weights = Some(weights.into_iter().collect());
        self
    }

    /// One metadata map per edge.
    #[must_use]
    pub fn with_metadata(mut self, metadata: impl IntoIterator<Item = PropertyMap>) -> Self {
        self.metadata = Some(metadata.into_iter().collect());
        self
    }

    /// Number of edges in the batch.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Check if the batch carries weights.
    pub fn has_weights(&self) -> bool {
        self.weights.is_some()
    }

    /// Zip the parallel lists into single insertions.
    pub(crate) fn into_edges(self) -> HyperdrawResult<Vec<NewEdge>> {
        let count = self.members.len();
        if let Some(weights) = &self.weights {
            if weights.len() != count {
                return Err(HyperdrawError::invalid_weight(format!(
                    "{} weights supplied for {count} edges",
                    weights.len()
                )));
            }
        }
        if let Some(tags) = &self.tags {
            if tags.len() != count {
                return Err(HyperdrawError::invalid_batch(format!(
                    "{} layers or times supplied for {count} edges",
                    tags.len()
                )));
            }
        }
        if let Some(metadata) = &self.metadata {
            if metadata.len() != count {
                return Err(HyperdrawError::invalid_batch(format!(
                    "{} metadata maps supplied for {count} edges",
                    metadata.len()
                )));
            }
        }

        let mut tags = self.tags.map(Vec::into_iter);
        let mut weights = self.weights.map(Vec::into_iter);
        let mut metadata = self.metadata.map(Vec::into_iter);

        let edges = self
            .members
            .into_iter()
            .map(|members| {
                let tag = tags.as_mut().and_then(Iterator::next).unwrap_or_default();
                NewEdge {
                    key: EdgeKey::new(members).with_tag(tag),
                    weight: weights.as_mut().and_then(Iterator::next),
                    metadata: metadata.as_mut().and_then(Iterator::next),
                }
            })
            .collect();
        Ok(edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_zips_lists() {
        let edges = EdgeBatch::new(vec![vec![1, 2], vec![3, 2, 1]])
            .with_layers(["a", "b"])
            .with_weights([1.0, 4.0])
            .into_edges()
            .unwrap();

        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].key, EdgeKey::undirected([1, 2]).in_layer("a"));
        assert_eq!(edges[1].key, EdgeKey::undirected([1, 2, 3]).in_layer("b"));
        assert_eq!(edges[1].weight, Some(4.0));
        assert_eq!(edges[0].metadata, None);
    }

    #[test]
    fn test_batch_length_mismatch() {
        let weights = EdgeBatch::new(vec![vec![1, 2]]).with_weights([1.0, 2.0]).into_edges();
        assert!(matches!(weights, Err(HyperdrawError::InvalidWeight(_))));

        let layers = EdgeBatch::new(vec![vec![1, 2]]).with_layers(Vec::<String>::new()).into_edges();
        assert!(matches!(layers, Err(HyperdrawError::InvalidBatch(_))));
    }
}
