//! Unit tests for common-config crate

use common_config::{
    ExecutionConfig, HyperdrawConfig, SimplificationConfig, DEFAULT_FUSION_START,
    DEFAULT_MAX_ITERATIONS,
};
use common_error::HyperdrawError;

#[test]
fn test_hyperdraw_config_default() {
    let config = HyperdrawConfig::default();

    assert_eq!(config.simplification.max_iterations, DEFAULT_MAX_ITERATIONS);
    assert_eq!(config.simplification.fusion_start, DEFAULT_FUSION_START);
    assert!(config.simplification.unstrangle);
    assert_eq!(config.simplification.agglomerative_threshold, None);

    assert_eq!(config.execution.seed, None);
    assert_eq!(config.execution.workers, None);
    assert!(config.validate().is_ok());
}

#[test]
fn test_simplification_builder() {
    let config = SimplificationConfig::default()
        .with_max_iterations(3)
        .with_fusion_start(500)
        .with_unstrangle(false)
        .with_agglomerative_threshold(0.75);

    assert_eq!(config.max_iterations, 3);
    assert_eq!(config.fusion_start, 500);
    assert!(!config.unstrangle);
    assert_eq!(config.agglomerative_threshold, Some(0.75));
    assert!(config.validate().is_ok());
}

#[test]
fn test_simplification_validation() {
    assert!(matches!(
        SimplificationConfig::default().with_max_iterations(0).validate(),
        Err(HyperdrawError::InvalidParameter(_))
    ));
    let err = SimplificationConfig::default()
        .with_agglomerative_threshold(1.2)
        .validate()
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "InvalidParameter: agglomerative threshold 1.2 outside [0, 1]"
    );
}

#[test]
fn test_execution_config() {
    let config = ExecutionConfig::default().with_seed(42).with_workers(4);
    assert_eq!(config.seed, Some(42));
    assert_eq!(config.workers, Some(4));
    assert!(config.validate().is_ok());
    assert!(matches!(
        ExecutionConfig::default().with_workers(0).validate(),
        Err(HyperdrawError::InvalidParameter(_))
    ));
}

#[test]
fn test_config_serialization() {
    let config = HyperdrawConfig {
        simplification: SimplificationConfig::default().with_max_iterations(7),
        execution: ExecutionConfig::default().with_seed(9),
    };

    let json = serde_json::to_string(&config).unwrap();
    let restored: HyperdrawConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, config);
}
