//! The composed simplification: polygonal, then unstrangle, then
//! agglomerative.

use std::collections::BTreeMap;

use common_config::SimplificationConfig;
use common_error::HyperdrawResult;
use hyperdraw_core::{EdgeStore, NodeId};
use log::debug;

use crate::agglomerative::agglomerative_simplification;
use crate::polygonal::{polygonal_simplification, PolygonalStatus};
use crate::unstrangle::unstrangle_edges;

/// Result of [`simplify`].
#[derive(Debug, Clone)]
pub struct Simplification {
    pub store: EdgeStore,
    pub polygonal_status: PolygonalStatus,
    pub polygonal_iterations: usize,
    /// Nested pairs left by the polygonal stage.
    pub strangled: usize,
    /// Nodes merged by the agglomerative stage, mapped to their
    /// representative. Empty when no threshold is configured.
    pub merged: BTreeMap<NodeId, NodeId>,
}

/// Runs every configured simplification stage on `store`.
pub fn simplify(store: &EdgeStore, config: &SimplificationConfig) -> HyperdrawResult<Simplification> {
    config.validate()?;

    let polygonal = polygonal_simplification(store, config)?;
    let strangled = polygonal.strangled.len();
    let mut current = polygonal.store;

    if config.unstrangle && strangled > 0 {
        current = unstrangle_edges(&current)?;
    }

    let mut merged = BTreeMap::new();
    if let Some(threshold) = config.agglomerative_threshold {
        let agglomeration = agglomerative_simplification(&current, threshold)?;
        current = agglomeration.store;
        merged = agglomeration.merged;
    }

    debug!(
        "simplified {} -> {} hyperedges, {} -> {} nodes",
        store.num_edges(),
        current.num_edges(),
        store.num_nodes(),
        current.num_nodes()
    );
    Ok(Simplification {
        store: current,
        polygonal_status: polygonal.status,
        polygonal_iterations: polygonal.iterations,
        strangled,
        merged,
    })
}
