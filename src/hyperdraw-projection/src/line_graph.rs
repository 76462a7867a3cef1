//! Line graphs: hyperedges become vertices, adjacency is overlap.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use common_error::{ensure, HyperdrawError, HyperdrawResult};
use hyperdraw_core::{EdgeId, EdgeStore, NodeId};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::projection::Projection;

/// Line graph over hyperedge ids; edge data is the weight.
pub type LineGraph = Projection<EdgeId, f64>;

/// Overlap measure between two member sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Distance {
    /// Number of shared nodes.
    #[default]
    Intersection,
    /// Shared nodes over the union; 0 for two empty sets.
    Jaccard,
}

impl Distance {
    /// Measures two sorted, duplicate-free node slices.
    pub fn measure(self, a: &[NodeId], b: &[NodeId]) -> f64 {
        let shared = sorted_intersection(a, b);
        match self {
            Self::Intersection => shared as f64,
            Self::Jaccard => {
                let union = a.len() + b.len() - shared;
                if union == 0 {
                    0.0
                } else {
                    shared as f64 / union as f64
                }
            }
        }
    }
}

impl FromStr for Distance {
    type Err = HyperdrawError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "intersection" => Ok(Self::Intersection),
            "jaccard" => Ok(Self::Jaccard),
            other => Err(HyperdrawError::invalid_mode(format!(
                "unknown distance '{other}', expected 'intersection' or 'jaccard'"
            ))),
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Intersection => write!(f, "intersection"),
            Self::Jaccard => write!(f, "jaccard"),
        }
    }
}

fn sorted_intersection(a: &[NodeId], b: &[NodeId]) -> usize {
    let (mut i, mut j, mut count) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                count += 1;
                i += 1;
                j += 1;
            }
        }
    }
    count
}

/// Undirected line graph.
///
/// Only hyperedges sharing at least one node are compared, each unordered
/// pair once. The pair is connected iff `distance` is at least `s`; the edge
/// weight is the measure when `weighted`, 1 otherwise. Every hyperedge is a
/// vertex, in `edge_order`.
pub fn line_graph(
    store: &EdgeStore,
    distance: Distance,
    s: f64,
    weighted: bool,
    edge_order: Option<&[EdgeId]>,
) -> HyperdrawResult<LineGraph> {
    ensure!(s.is_finite(), InvalidParameter: "threshold s must be finite, got {}", s);
    let order = store.resolve_edge_order(edge_order)?;

    let mut graph = Projection::new(false);
    for &id in &order {
        graph.insert_vertex(id);
    }

    let mut visited: HashSet<(EdgeId, EdgeId)> = HashSet::new();
    let mut evaluated = 0usize;
    for &first in &order {
        let first_nodes = member_nodes(store, first)?;
        for node in first_nodes.iter() {
            for &second in store.incident_edges(node)? {
                if second == first {
                    continue;
                }
                let pair = if first < second { (first, second) } else { (second, first) };
                if !visited.insert(pair) {
                    continue;
                }
                evaluated += 1;
                let second_nodes = member_nodes(store, second)?;
                let measure = distance.measure(&first_nodes, &second_nodes);
                if measure >= s {
                    graph.connect(first, second, if weighted { measure } else { 1.0 })?;
                }
            }
        }
    }

    debug!(
        "{distance} line graph (s = {s}): {evaluated} pairs evaluated, {} edges",
        graph.edge_count()
    );
    Ok(graph)
}

/// Directed line graph.
///
/// Every ordered pair `(e1, e2)` with `e1 != e2` is compared by measuring the
/// head of `e1` against the tail of `e2`; `e1 -> e2` is added iff the measure
/// is at least `s`. Undirected hyperedges act as their own head and tail.
pub fn directed_line_graph(
    store: &EdgeStore,
    distance: Distance,
    s: f64,
    weighted: bool,
    edge_order: Option<&[EdgeId]>,
) -> HyperdrawResult<LineGraph> {
    ensure!(s.is_finite(), InvalidParameter: "threshold s must be finite, got {}", s);
    let order = store.resolve_edge_order(edge_order)?;

    let mut sides = Vec::with_capacity(order.len());
    for &id in &order {
        let key = store
            .edge_key(id)
            .ok_or_else(|| HyperdrawError::edge_not_found(id.to_string()))?;
        sides.push((key.members().tail().to_vec(), key.members().head().to_vec()));
    }

    let mut graph = Projection::new(true);
    for &id in &order {
        graph.insert_vertex(id);
    }

    for (i, &first) in order.iter().enumerate() {
        let head = &sides[i].1;
        for (j, &second) in order.iter().enumerate() {
            if i == j {
                continue;
            }
            let measure = distance.measure(head, &sides[j].0);
            if measure >= s {
                graph.connect(first, second, if weighted { measure } else { 1.0 })?;
            }
        }
    }

    debug!(
        "directed {distance} line graph (s = {s}): {} edges over {} hyperedges",
        graph.edge_count(),
        order.len()
    );
    Ok(graph)
}

fn member_nodes(store: &EdgeStore, id: EdgeId) -> HyperdrawResult<Vec<NodeId>> {
    store
        .edge_key(id)
        .map(|key| key.nodes().into_owned())
        .ok_or_else(|| HyperdrawError::edge_not_found(id.to_string()))
}

#[cfg(test)]
mod tests {
    use hyperdraw_core::{NewEdge, StoreFixture};

    use super::*;

    fn nodes(ids: &[i64]) -> Vec<NodeId> {
        ids.iter().copied().map(NodeId::from).collect()
    }

    #[test]
    fn test_measures() {
        let a = nodes(&[1, 2, 3]);
        let b = nodes(&[2, 3, 4, 5]);
        assert_eq!(Distance::Intersection.measure(&a, &b), 2.0);
        assert!((Distance::Jaccard.measure(&a, &b) - 0.4).abs() < 1e-12);
        assert_eq!(Distance::Jaccard.measure(&[], &[]), 0.0);
    }

    #[test]
    fn test_distance_parsing() {
        assert_eq!("jaccard".parse::<Distance>().unwrap(), Distance::Jaccard);
        assert!(matches!(
            "cosine".parse::<Distance>(),
            Err(HyperdrawError::InvalidMode(_))
        ));
    }

    #[test]
    fn test_intersection_line_graph_of_mixed_orders() {
        let fixture = StoreFixture::mixed_orders();
        let graph = line_graph(fixture.store(), Distance::Intersection, 1.0, false, None).unwrap();
        let id = |name: &str| fixture.edge_id(name).unwrap();

        assert_eq!(graph.vertex_count(), 5);
        assert!(graph.contains_edge(&id("square"), &id("left")));
        assert!(graph.contains_edge(&id("square"), &id("right")));
        assert!(graph.contains_edge(&id("left"), &id("right")));
        assert!(graph.contains_edge(&id("square"), &id("bridge")));
        assert!(graph.contains_edge(&id("bridge"), &id("tail")));
        assert!(!graph.contains_edge(&id("left"), &id("tail")));
        assert_eq!(graph.edge_count(), 5);
    }

    #[test]
    fn test_higher_threshold_keeps_wide_overlaps_only() {
        let fixture = StoreFixture::mixed_orders();
        let graph = line_graph(fixture.store(), Distance::Intersection, 2.0, true, None).unwrap();
        let id = |name: &str| fixture.edge_id(name).unwrap();

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.edge_data(&id("square"), &id("left")), Some(&2.0));
        assert_eq!(graph.edge_data(&id("right"), &id("square")), Some(&2.0));
    }

    #[test]
    fn test_non_finite_threshold_is_rejected() {
        let store = StoreFixture::mixed_orders().into_store();
        assert!(matches!(
            line_graph(&store, Distance::Jaccard, f64::NAN, false, None),
            Err(HyperdrawError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_directed_line_graph_matches_head_to_tail() {
        let mut store = EdgeStore::new(false);
        let first = store.add_edge(NewEdge::directed([1], [2, 3])).unwrap();
        let second = store.add_edge(NewEdge::directed([3], [4])).unwrap();
        let third = store.add_edge(NewEdge::directed([4, 5], [1])).unwrap();

        let graph = directed_line_graph(&store, Distance::Intersection, 1.0, false, None).unwrap();
        assert!(graph.is_directed());
        assert!(graph.contains_edge(&first, &second));
        assert!(!graph.contains_edge(&second, &first));
        assert!(graph.contains_edge(&second, &third));
        assert!(graph.contains_edge(&third, &first));
        assert_eq!(graph.edge_count(), 3);
    }
}
