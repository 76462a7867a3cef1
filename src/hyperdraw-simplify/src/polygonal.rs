//! Polygonal simplification: iterative contraction of overlap motifs.
//!
//! Each pass scans the current store, rewrites what it can and rebuilds a
//! fresh store. The loop stops at a fixpoint, when only unfixable motifs
//! remain, or at the configured iteration cap.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use common_config::SimplificationConfig;
use common_error::{HyperdrawError, HyperdrawResult};
use hyperdraw_core::{EdgeId, EdgeKey, EdgeStore, NodeId, PropertyMap, Value};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::motifs::{self, SharedPair, SharedTriple, StrangledPair};
use crate::rebuild::StoreBuilder;

/// Why the polygonal loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolygonalStatus {
    /// No rewritable motif is left.
    Converged,
    /// A pass applied no fix, so rewritable motifs remain in the output.
    ///
    /// Every remaining fix was degenerate; retrying would repeat the same
    /// pass, so the loop exits before the cap. Only `Converged` guarantees a
    /// motif-free store.
    Stalled,
    /// The iteration cap was reached with motifs left.
    IterationCap,
}

/// Result of [`PolygonalSimplifier::simplify`].
#[derive(Debug, Clone)]
pub struct PolygonalOutcome {
    pub store: EdgeStore,
    pub status: PolygonalStatus,
    /// Number of rewriting passes run.
    pub iterations: usize,
    pub fixes_applied: usize,
    /// Fixes abandoned because they would leave a hyperedge with fewer than
    /// two nodes.
    pub fixes_failed: usize,
    /// Nested hyperedges of the final store; reported, never rewritten.
    pub strangled: Vec<StrangledPair>,
    /// First fusion counter value not used by this run.
    pub next_fusion: u64,
}

/// Per-pass bookkeeping.
#[derive(Default)]
struct PassStats {
    applied: usize,
    deferred: usize,
    failed: usize,
}

/// Iterative motif contraction.
#[derive(Debug, Clone, Default)]
pub struct PolygonalSimplifier {
    config: SimplificationConfig,
}

impl PolygonalSimplifier {
    /// Creates a simplifier. The configuration is validated.
    pub fn new(config: SimplificationConfig) -> HyperdrawResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimplificationConfig {
        &self.config
    }

    /// Runs passes until no rewritable motif is left or the cap is hit.
    pub fn simplify(&self, store: &EdgeStore) -> HyperdrawResult<PolygonalOutcome> {
        let mut current = store.clone();
        let mut fusion = self.config.fusion_start;
        let mut iterations = 0;
        let mut fixes_applied = 0;
        let mut fixes_failed = 0;

        let status = loop {
            let found = motifs::detect(&current);
            if !found.has_rewritable() {
                debug!("no rewritable motif after {iterations} passes, reached fixpoint");
                break PolygonalStatus::Converged;
            }
            if iterations >= self.config.max_iterations {
                warn!(
                    "polygonal simplification reached max iterations ({}) with {} motifs left",
                    self.config.max_iterations,
                    found.shared_triples.len() + found.shared_pairs.len()
                );
                break PolygonalStatus::IterationCap;
            }
            iterations += 1;

            let (next, stats) =
                self.run_pass(&current, &found.shared_triples, &found.shared_pairs, &mut fusion)?;
            fixes_applied += stats.applied;
            fixes_failed += stats.failed;
            debug!(
                "pass {iterations}: {} fixes applied, {} deferred, {} failed",
                stats.applied, stats.deferred, stats.failed
            );

            if stats.applied == 0 {
                warn!(
                    "polygonal simplification stalled in pass {iterations}: {} motifs cannot be rewritten",
                    stats.failed
                );
                break PolygonalStatus::Stalled;
            }
            current = next;
        };

        let strangled = motifs::strangled_pairs(&current);
        Ok(PolygonalOutcome {
            store: current,
            status,
            iterations,
            fixes_applied,
            fixes_failed,
            strangled,
            next_fusion: fusion,
        })
    }

    /// One pass: shared triples first, then shared pairs. A fix touching a
    /// hyperedge already rewritten in this pass is left for the next one.
    fn run_pass(
        &self,
        store: &EdgeStore,
        triples: &[SharedTriple],
        pairs: &[SharedPair],
        fusion: &mut u64,
    ) -> HyperdrawResult<(EdgeStore, PassStats)> {
        let mut keys: BTreeMap<EdgeId, EdgeKey> =
            store.edges().map(|(id, key)| (id, key.clone())).collect();
        let mut touched: HashSet<EdgeId> = HashSet::new();
        let mut fused_away: BTreeSet<NodeId> = BTreeSet::new();
        let mut fusion_nodes: Vec<(NodeId, PropertyMap)> = Vec::new();
        let mut stats = PassStats::default();

        for triple in triples {
            let affected = triple.edges.to_vec();
            self.apply(
                &mut keys,
                &affected,
                &triple.shared,
                fusion,
                &mut touched,
                &mut stats,
                &mut fusion_nodes,
            )?;
        }

        for pair in pairs {
            let affected: Vec<EdgeId> = store
                .edges()
                .filter(|(_, key)| pair.shared.iter().any(|node| key.contains(node)))
                .map(|(id, _)| id)
                .collect();
            if self.apply(
                &mut keys,
                &affected,
                &pair.shared,
                fusion,
                &mut touched,
                &mut stats,
                &mut fusion_nodes,
            )? {
                fused_away.extend(pair.shared.iter().cloned());
            }
        }

        let mut builder = StoreBuilder::new();
        builder.carry_nodes(store, |node| !fused_away.contains(node))?;
        for (node, metadata) in fusion_nodes {
            builder.add_node(node, metadata);
        }
        for (id, key) in keys {
            let weight = store.weight_of(id).unwrap_or(1.0);
            let metadata = store.metadata_of(id).cloned().unwrap_or_default();
            builder.add_edge(key, weight, metadata);
        }
        Ok((builder.build(store.is_weighted())?, stats))
    }

    /// Contracts `shared` to one fusion node in every `affected` hyperedge.
    ///
    /// Returns whether the fix was applied. Deferred and degenerate fixes
    /// leave `keys` untouched.
    #[allow(clippy::too_many_arguments)]
    fn apply(
        &self,
        keys: &mut BTreeMap<EdgeId, EdgeKey>,
        affected: &[EdgeId],
        shared: &BTreeSet<NodeId>,
        fusion: &mut u64,
        touched: &mut HashSet<EdgeId>,
        stats: &mut PassStats,
        fusion_nodes: &mut Vec<(NodeId, PropertyMap)>,
    ) -> HyperdrawResult<bool> {
        if affected.iter().any(|id| touched.contains(id)) {
            stats.deferred += 1;
            return Ok(false);
        }

        let node = NodeId::Fusion(*fusion);
        match contract_all(keys, affected, shared, &node) {
            Ok(rewritten) => {
                for (id, key) in rewritten {
                    keys.insert(id, key);
                    touched.insert(id);
                }
                fusion_nodes.push((node, fused_metadata(shared)));
                *fusion += 1;
                stats.applied += 1;
                Ok(true)
            }
            Err(err) if err.is_recoverable() => {
                warn!("skipping motif over {}: {err}", display_nodes(shared));
                stats.failed += 1;
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }
}

/// Runs polygonal simplification with `config`.
pub fn polygonal_simplification(
    store: &EdgeStore,
    config: &SimplificationConfig,
) -> HyperdrawResult<PolygonalOutcome> {
    PolygonalSimplifier::new(config.clone())?.simplify(store)
}

/// Rewrites every affected key, failing if one would end up with fewer than
/// two nodes.
fn contract_all(
    keys: &BTreeMap<EdgeId, EdgeKey>,
    affected: &[EdgeId],
    shared: &BTreeSet<NodeId>,
    node: &NodeId,
) -> HyperdrawResult<Vec<(EdgeId, EdgeKey)>> {
    let mut rewritten = Vec::with_capacity(affected.len());
    for &id in affected {
        let key = keys
            .get(&id)
            .ok_or_else(|| HyperdrawError::edge_not_found(id.to_string()))?;
        let contracted = key.with_members(key.members().contract(shared, node));
        if contracted.size() < 2 {
            return Err(HyperdrawError::degenerate(format!(
                "hyperedge {key} would shrink to {contracted}"
            )));
        }
        rewritten.push((id, contracted));
    }
    Ok(rewritten)
}

fn fused_metadata(shared: &BTreeSet<NodeId>) -> PropertyMap {
    let members: Vec<Value> = shared.iter().map(Value::from).collect();
    PropertyMap::from([("fused".to_string(), Value::List(members))])
}

fn display_nodes(nodes: &BTreeSet<NodeId>) -> String {
    let names: Vec<String> = nodes.iter().map(ToString::to_string).collect();
    format!("{{{}}}", names.join(", "))
}

#[cfg(test)]
mod tests {
    use hyperdraw_core::{NewEdge, StoreAssertions, StoreFixture};

    use super::*;

    fn simplifier() -> PolygonalSimplifier {
        PolygonalSimplifier::new(SimplificationConfig::default()).unwrap()
    }

    #[test]
    fn test_shared_triple_becomes_fusion_node() {
        let store = StoreFixture::shared_triple().into_store();
        let outcome = simplifier().simplify(&store).unwrap();

        assert_eq!(outcome.status, PolygonalStatus::Converged);
        assert_eq!(outcome.iterations, 1);
        let fused = NodeId::Fusion(10_000);
        StoreAssertions::new(&outcome.store)
            .assert_edge_count(2)
            .assert_has_edge(&EdgeKey::undirected([NodeId::from(1), fused.clone()]))
            .assert_has_edge(&EdgeKey::undirected([NodeId::from(5), fused.clone()]))
            .assert_has_node(&NodeId::from(3))
            .assert_closed();
        let metadata = outcome.store.get_node_metadata(&fused).unwrap();
        let Some(Value::List(members)) = metadata.get("fused") else {
            panic!("fusion node without member list: {metadata:?}");
        };
        let members: Vec<NodeId> = members
            .iter()
            .map(|value| NodeId::try_from(value).unwrap())
            .collect();
        assert_eq!(members, vec![NodeId::from(2), NodeId::from(3), NodeId::from(4)]);
    }

    #[test]
    fn test_shared_pair_removes_both_nodes() {
        let store = StoreFixture::shared_pair().into_store();
        let outcome = simplifier().simplify(&store).unwrap();

        assert_eq!(outcome.status, PolygonalStatus::Converged);
        let fused = NodeId::Fusion(10_000);
        StoreAssertions::new(&outcome.store)
            .assert_edge_count(3)
            .assert_has_edge(&EdgeKey::undirected([NodeId::from(3), fused.clone()]))
            .assert_has_edge(&EdgeKey::undirected([NodeId::from(5), fused]))
            .assert_no_node(&NodeId::from(1))
            .assert_no_node(&NodeId::from(2))
            .assert_closed();
        assert_eq!(outcome.next_fusion, 10_001);
    }

    #[test]
    fn test_degenerate_fix_stalls() {
        // contracting {1,2,3} would leave the first edge with one node
        let mut store = EdgeStore::new(false);
        store.add_edge(NewEdge::new([1, 2, 3])).unwrap();
        store.add_edge(NewEdge::new([1, 2, 3, 4])).unwrap();
        let outcome = simplifier().simplify(&store).unwrap();

        assert_eq!(outcome.status, PolygonalStatus::Stalled);
        assert_eq!(outcome.fixes_failed, 1);
        assert_eq!(outcome.fixes_applied, 0);
        assert_eq!(outcome.store.num_edges(), 2);
        assert_eq!(outcome.strangled.len(), 1);
    }

    #[test]
    fn test_overlapping_fixes_are_deferred() {
        // a and c both share three nodes with b
        let mut store = EdgeStore::new(false);
        store.add_edge(NewEdge::new([1, 2, 3, 4])).unwrap();
        store.add_edge(NewEdge::new([2, 3, 4, 5, 6, 7])).unwrap();
        store.add_edge(NewEdge::new([5, 6, 7, 8])).unwrap();
        let outcome = simplifier().simplify(&store).unwrap();

        assert_eq!(outcome.status, PolygonalStatus::Converged);
        assert_eq!(outcome.iterations, 2);
        assert_eq!(outcome.fixes_applied, 2);
        StoreAssertions::new(&outcome.store)
            .assert_has_edge(&EdgeKey::undirected([
                NodeId::Fusion(10_000),
                NodeId::Fusion(10_001),
            ]))
            .assert_closed();
    }

    #[test]
    fn test_iteration_cap_is_reported() {
        let mut store = EdgeStore::new(false);
        store.add_edge(NewEdge::new([1, 2, 3, 4])).unwrap();
        store.add_edge(NewEdge::new([2, 3, 4, 5, 6, 7])).unwrap();
        store.add_edge(NewEdge::new([5, 6, 7, 8])).unwrap();
        let config = SimplificationConfig::default().with_max_iterations(1);
        let outcome = PolygonalSimplifier::new(config)
            .unwrap()
            .simplify(&store)
            .unwrap();

        assert_eq!(outcome.status, PolygonalStatus::IterationCap);
        assert_eq!(outcome.iterations, 1);
        assert_eq!(outcome.fixes_applied, 1);
    }

    #[test]
    fn test_weights_survive_rewrites() {
        let mut store = EdgeStore::new(true);
        store.add_edge(NewEdge::new([1, 2, 3, 4]).with_weight(2.0)).unwrap();
        store.add_edge(NewEdge::new([2, 3, 4, 5]).with_weight(3.0)).unwrap();
        let outcome = simplifier().simplify(&store).unwrap();

        let key = EdgeKey::undirected([NodeId::from(5), NodeId::Fusion(10_000)]);
        assert_eq!(outcome.store.get_weight(&key).unwrap(), 3.0);
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let config = SimplificationConfig::default().with_max_iterations(0);
        assert!(PolygonalSimplifier::new(config).is_err());
    }
}
