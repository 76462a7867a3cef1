//! PAOH (parallel aggregated ordered hypergraph) column packing.

use common_error::{HyperdrawError, HyperdrawResult};
use hyperdraw_core::{EdgeId, EdgeStore};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::packing::{first_fit, Interval};
use crate::ranking::NodeRanking;

/// A hyperedge placed in a layout with the rank interval it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedEdge {
    pub edge: EdgeId,
    pub interval: Interval,
}

/// Hyperedges drawn as vertical lanes; edges sharing a column never overlap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaohLayout {
    columns: Vec<Vec<PlacedEdge>>,
}

impl PaohLayout {
    /// The columns, left to right.
    pub fn columns(&self) -> &[Vec<PlacedEdge>] {
        &self.columns
    }

    /// Number of columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Index of the column holding `edge`.
    pub fn column_of(&self, edge: EdgeId) -> Option<usize> {
        self.columns
            .iter()
            .position(|column| column.iter().any(|placed| placed.edge == edge))
    }

    /// Every placed edge with its column index.
    pub fn placements(&self) -> impl Iterator<Item = (usize, &PlacedEdge)> {
        self.columns
            .iter()
            .enumerate()
            .flat_map(|(index, column)| column.iter().map(move |placed| (index, placed)))
    }
}

/// Packs hyperedges into columns, visiting them in `edge_order`.
///
/// Each hyperedge spans the closed interval between its lowest and highest
/// ranked member. Hyperedges of every size use the same rule.
pub fn paoh_columns(
    store: &EdgeStore,
    ranking: &NodeRanking,
    edge_order: Option<&[EdgeId]>,
) -> HyperdrawResult<PaohLayout> {
    let mut items = Vec::with_capacity(store.num_edges());
    for id in store.resolve_edge_order(edge_order)? {
        let key = store
            .edge_key(id)
            .ok_or_else(|| HyperdrawError::edge_not_found(id.to_string()))?;
        items.push((id, ranking.interval(key)?));
    }

    let columns: Vec<Vec<PlacedEdge>> = first_fit(items)
        .into_iter()
        .map(|slot| {
            slot.into_iter()
                .map(|(edge, interval)| PlacedEdge { edge, interval })
                .collect()
        })
        .collect();

    debug!(
        "paoh: {} hyperedges packed into {} columns",
        store.num_edges(),
        columns.len()
    );
    Ok(PaohLayout { columns })
}
