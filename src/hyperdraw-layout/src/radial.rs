//! Radial layout: nodes on a circle, hyperedges as chords or sector arcs.

use std::f64::consts::TAU;

use common_error::{HyperdrawError, HyperdrawResult};
use hyperdraw_core::{EdgeId, EdgeStore};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::packing::first_fit;
use crate::paoh::PlacedEdge;
use crate::ranking::NodeRanking;

/// Angle in radians of the node at `rank` among `n` evenly spaced nodes.
pub fn node_angle(rank: usize, n: usize) -> f64 {
    if n == 0 {
        0.0
    } else {
        TAU * rank as f64 / n as f64
    }
}

/// A hyperedge placed on an arc of a sector ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectorArc {
    pub placed: PlacedEdge,
    /// Angle of the lowest ranked member.
    pub start: f64,
    /// Angle of the highest ranked member.
    pub end: f64,
}

/// One ring of mutually non-overlapping arcs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    /// Radial depth, 1 for the innermost ring.
    pub depth: usize,
    pub arcs: Vec<SectorArc>,
}

impl Sector {
    /// Smallest start and largest end angle over the arcs.
    pub fn span(&self) -> Option<(f64, f64)> {
        self.arcs.iter().fold(None, |span, arc| {
            Some(match span {
                Some((start, end)) => (f64::min(start, arc.start), f64::max(end, arc.end)),
                None => (arc.start, arc.end),
            })
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RadialLayout {
    /// Size-2 hyperedges, drawn as straight chords.
    pub chords: Vec<EdgeId>,
    /// Size-1 hyperedges, drawn on their node.
    pub singletons: Vec<EdgeId>,
    pub sectors: Vec<Sector>,
}

impl RadialLayout {
    /// Index of the sector holding `edge`.
    pub fn sector_of(&self, edge: EdgeId) -> Option<usize> {
        self.sectors
            .iter()
            .position(|sector| sector.arcs.iter().any(|arc| arc.placed.edge == edge))
    }
}

/// Lays hyperedges out around a circle ordered by `ranking`.
///
/// Hyperedges of size 3 or more are packed into sectors with the same
/// first-fit rule as [`paoh_columns`](crate::paoh_columns).
pub fn radial_sectors(
    store: &EdgeStore,
    ranking: &NodeRanking,
    edge_order: Option<&[EdgeId]>,
) -> HyperdrawResult<RadialLayout> {
    let n = ranking.len();
    let mut layout = RadialLayout::default();
    let mut items = Vec::new();

    for id in store.resolve_edge_order(edge_order)? {
        let key = store
            .edge_key(id)
            .ok_or_else(|| HyperdrawError::edge_not_found(id.to_string()))?;
        let interval = ranking.interval(key)?;
        match key.size() {
            1 => layout.singletons.push(id),
            2 => layout.chords.push(id),
            _ => items.push((id, interval)),
        }
    }

    layout.sectors = first_fit(items)
        .into_iter()
        .enumerate()
        .map(|(index, slot)| Sector {
            depth: index + 1,
            arcs: slot
                .into_iter()
                .map(|(edge, interval)| SectorArc {
                    placed: PlacedEdge { edge, interval },
                    start: node_angle(interval.lo, n),
                    end: node_angle(interval.hi, n),
                })
                .collect(),
        })
        .collect();

    debug!(
        "radial: {} chords, {} singletons, {} sectors",
        layout.chords.len(),
        layout.singletons.len(),
        layout.sectors.len()
    );
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use hyperdraw_core::{NewEdge, StoreFixture};

    use super::*;

    #[test]
    fn test_angles_are_evenly_spaced() {
        assert_eq!(node_angle(0, 4), 0.0);
        assert!((node_angle(1, 4) - PI / 2.0).abs() < 1e-12);
        assert_eq!(node_angle(3, 0), 0.0);
    }

    #[test]
    fn test_pairs_become_chords() {
        let fixture = StoreFixture::mixed_orders();
        let ranking = NodeRanking::alphabetic(fixture.store());
        let layout = radial_sectors(fixture.store(), &ranking, None).unwrap();

        let id = |name: &str| fixture.edge_id(name).unwrap();
        assert_eq!(layout.chords, vec![id("bridge")]);
        assert!(layout.singletons.is_empty());
        assert_eq!(layout.sector_of(id("square")), Some(0));
        assert_eq!(layout.sector_of(id("tail")), Some(0));
        assert_eq!(layout.sector_of(id("left")), Some(1));
        assert_eq!(layout.sector_of(id("right")), Some(2));
        assert_eq!(layout.sector_of(id("bridge")), None);

        let depths: Vec<usize> = layout.sectors.iter().map(|s| s.depth).collect();
        assert_eq!(depths, vec![1, 2, 3]);
    }

    #[test]
    fn test_sector_span_covers_its_arcs() {
        let mut store = EdgeStore::new(false);
        store.add_edge(NewEdge::new([0, 1, 2])).unwrap();
        store.add_edge(NewEdge::new([4, 5, 6])).unwrap();
        store.add_edge(NewEdge::new([7])).unwrap();
        let ranking = NodeRanking::from_order(0..8);
        let layout = radial_sectors(&store, &ranking, None).unwrap();

        assert_eq!(layout.sectors.len(), 1);
        assert_eq!(layout.singletons.len(), 1);
        let (start, end) = layout.sectors[0].span().unwrap();
        assert_eq!(start, 0.0);
        assert!((end - node_angle(6, 8)).abs() < 1e-12);
    }
}
