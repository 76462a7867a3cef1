//! Core error types for hyperdraw.

use thiserror::Error;

/// Result type alias using `HyperdrawError`.
pub type HyperdrawResult<T> = std::result::Result<T, HyperdrawError>;

/// Core error type for hyperdraw operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HyperdrawError {
    /// Weight supplied on an unweighted store, a non-positive weight, or a
    /// weight/edge count mismatch in batch insertion.
    #[error("InvalidWeight: {0}")]
    InvalidWeight(String),

    /// Malformed batch insertion (duplicate keys, list length mismatch).
    #[error("InvalidBatch: {0}")]
    InvalidBatch(String),

    /// Lookup of an edge key or id with no binding.
    #[error("EdgeNotFound: {0}")]
    EdgeNotFound(String),

    /// Lookup of a node with no binding.
    #[error("NodeNotFound: {0}")]
    NodeNotFound(String),

    /// Unrecognized projection mode or distance name.
    #[error("InvalidMode: {0}")]
    InvalidMode(String),

    /// A motif rewrite would produce a malformed edge.
    #[error("DegenerateRewrite: {0}")]
    DegenerateRewrite(String),

    /// Invalid parameter provided.
    #[error("InvalidParameter: {0}")]
    InvalidParameter(String),

    /// JSON serialization error.
    #[error("SerdeJsonError: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    /// Internal error (bug in hyperdraw).
    #[error("InternalError: {0}")]
    InternalError(String),
}

impl HyperdrawError {
    /// Create a new `InvalidWeight` error.
    pub fn invalid_weight<S: Into<String>>(msg: S) -> Self {
        Self::InvalidWeight(msg.into())
    }

    /// Create a new `InvalidBatch` error.
    pub fn invalid_batch<S: Into<String>>(msg: S) -> Self {
        Self::InvalidBatch(msg.into())
    }

    /// Create a new `EdgeNotFound` error.
    pub fn edge_not_found<S: Into<String>>(msg: S) -> Self {
        Self::EdgeNotFound(msg.into())
    }

    /// Create a new `NodeNotFound` error.
    pub fn node_not_found<S: Into<String>>(msg: S) -> Self {
        Self::NodeNotFound(msg.into())
    }

    /// Create a new `InvalidMode` error.
    pub fn invalid_mode<S: Into<String>>(msg: S) -> Self {
        Self::InvalidMode(msg.into())
    }

    /// Create a new `DegenerateRewrite` error.
    pub fn degenerate<S: Into<String>>(msg: S) -> Self {
        Self::DegenerateRewrite(msg.into())
    }

    /// Create a new `InvalidParameter` error.
    pub fn invalid_parameter<S: Into<String>>(msg: S) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Create a new `InternalError`.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::InternalError(msg.into())
    }

    /// Whether this error is recovered locally inside the simplification loop.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::DegenerateRewrite(_))
    }
}

/// Ensure a condition holds, returning an `InvalidParameter` error if not.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $variant:ident: $($msg:tt)*) => {
        if !$cond {
            return Err($crate::HyperdrawError::$variant(format!($($msg)*)));
        }
    };
    ($cond:expr, $msg:expr) => {
        if !$cond {
            return Err($crate::HyperdrawError::InvalidParameter($msg.to_string()));
        }
    };
}

/// Return early with an `InvalidParameter` error.
#[macro_export]
macro_rules! invalid_param {
    ($($arg:tt)*) => {
        return Err($crate::HyperdrawError::InvalidParameter(format!($($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_threshold(value: f64) -> HyperdrawResult<f64> {
        crate::ensure!(
            (0.0..=1.0).contains(&value),
            InvalidParameter: "threshold {value} outside [0, 1]"
        );
        Ok(value)
    }

    fn reject(name: &str) -> HyperdrawResult<()> {
        crate::invalid_param!("unknown option '{name}'")
    }

    #[test]
    fn test_error_display() {
        let err = HyperdrawError::invalid_weight("weight 2 on unweighted store");
        assert_eq!(err.to_string(), "InvalidWeight: weight 2 on unweighted store");
    }

    #[test]
    fn test_error_constructors() {
        let _ = HyperdrawError::invalid_batch("duplicate edge");
        let _ = HyperdrawError::edge_not_found("(1, 2)");
        let _ = HyperdrawError::node_not_found("7");
        let _ = HyperdrawError::invalid_mode("tripartite");
        let _ = HyperdrawError::internal("unexpected state");
    }

    #[test]
    fn test_only_degenerate_rewrites_are_recoverable() {
        assert!(HyperdrawError::degenerate("size 1").is_recoverable());
        assert!(!HyperdrawError::invalid_mode("x").is_recoverable());
    }

    #[test]
    fn test_macros() {
        assert!(check_threshold(0.5).is_ok());
        assert!(matches!(
            check_threshold(1.5),
            Err(HyperdrawError::InvalidParameter(_))
        ));
        let err = reject("depth").unwrap_err();
        assert_eq!(err.to_string(), "InvalidParameter: unknown option 'depth'");
    }
}
