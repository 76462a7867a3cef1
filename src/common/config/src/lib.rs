//! Configuration management for hyperdraw.
//!
//! Provides the explicit configuration object threaded through simplification
//! call sites, and the execution settings handed to external worker layers.

use common_error::{invalid_param, HyperdrawResult};
use serde::{Deserialize, Serialize};

/// Default cap on polygonal simplification passes.
pub const DEFAULT_MAX_ITERATIONS: usize = 10;

/// First counter value handed out to fusion nodes.
pub const DEFAULT_FUSION_START: u64 = 10_000;

/// Global hyperdraw configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HyperdrawConfig {
    /// Simplification configuration.
    pub simplification: SimplificationConfig,
    /// Execution configuration.
    pub execution: ExecutionConfig,
}

impl HyperdrawConfig {
    /// Validate every section.
    pub fn validate(&self) -> HyperdrawResult<()> {
        self.simplification.validate()?;
        self.execution.validate()
    }
}

/// Simplification engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplificationConfig {
    /// Safety limit on polygonal passes. Not a proven convergence bound.
    pub max_iterations: usize,
    /// Counter value of the first fusion node.
    pub fusion_start: u64,
    /// Run the unstrangle pass after polygonal simplification.
    pub unstrangle: bool,
    /// Similarity threshold for the agglomerative pass; `None` skips it.
    pub agglomerative_threshold: Option<f64>,
}

impl Default for SimplificationConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            fusion_start: DEFAULT_FUSION_START,
            unstrangle: true,
            agglomerative_threshold: None,
        }
    }
}

impl SimplificationConfig {
    /// Set the polygonal iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    /// Set the first fusion node counter.
    #[must_use]
    pub fn with_fusion_start(mut self, start: u64) -> Self {
        self.fusion_start = start;
        self
    }

    /// Enable or disable the unstrangle pass.
    #[must_use]
    pub fn with_unstrangle(mut self, enable: bool) -> Self {
        self.unstrangle = enable;
        self
    }

    /// Enable the agglomerative pass with the given threshold.
    #[must_use]
    pub fn with_agglomerative_threshold(mut self, threshold: f64) -> Self {
        self.agglomerative_threshold = Some(threshold);
        self
    }

    /// Check that the limits are usable.
    pub fn validate(&self) -> HyperdrawResult<()> {
        if self.max_iterations == 0 {
            invalid_param!("max_iterations must be at least 1");
        }
        if let Some(threshold) = self.agglomerative_threshold {
            if !(0.0..=1.0).contains(&threshold) {
                invalid_param!("agglomerative threshold {threshold} outside [0, 1]");
            }
        }
        Ok(())
    }
}

/// Settings for the external layer that runs community detection workers.
///
/// The core never reads these; they exist so callers pass seeds and pool
/// sizes explicitly instead of through process-wide state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ExecutionConfig {
    /// Random seed for stochastic collaborators.
    pub seed: Option<u64>,
    /// Number of worker threads or processes.
    pub workers: Option<usize>,
}

impl ExecutionConfig {
    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the worker count.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Check that the worker count is usable.
    pub fn validate(&self) -> HyperdrawResult<()> {
        if self.workers == Some(0) {
            invalid_param!("workers must be at least 1");
        }
        Ok(())
    }
}
