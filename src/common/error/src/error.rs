//! Core error types for Quilt.

use thiserror::Error;

/// Result type alias using `QuiltError`.
pub type QuiltResult<T> = std::result::Result<T, QuiltError>;

/// Core error type for Quilt operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuiltError {
    /// A strategy was asked to route with an algorithm capability it cannot
    /// dispatch. Configuration-level, never retried.
    #[error("UnsupportedAlgorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Routing index and metadata disagree (e.g. a cartesian combination
    /// referenced a table unit that does not exist). Fatal, never retried.
    #[error("RouteInconsistency: {0}")]
    RouteInconsistency(String),

    /// A per-shard callback failed with a database-access error. Surfaced
    /// unwrapped to preserve the original semantics.
    #[error("DataAccess: {0}")]
    DataAccess(String),

    /// Execution engine error wrapping any non-data-access worker failure.
    #[error("ExecutionError: {0}")]
    ExecutionError(String),

    /// Invalid parameter provided.
    #[error("InvalidParameter: {0}")]
    InvalidParameter(String),

    /// Configuration error.
    #[error("ConfigError: {0}")]
    ConfigError(String),

    /// Internal error (bug in Quilt).
    #[error("InternalError: {0}")]
    InternalError(String),

    /// IO error.
    #[error("IoError: {0}")]
    IoError(#[from] std::io::Error),
}

impl QuiltError {
    /// Create a new `UnsupportedAlgorithm` error.
    pub fn unsupported_algorithm<S: Into<String>>(msg: S) -> Self {
        Self::UnsupportedAlgorithm(msg.into())
    }

    /// Create a new `RouteInconsistency` error.
    pub fn route_inconsistency<S: Into<String>>(msg: S) -> Self {
        Self::RouteInconsistency(msg.into())
    }

    /// Create a new `DataAccess` error.
    pub fn data_access<S: Into<String>>(msg: S) -> Self {
        Self::DataAccess(msg.into())
    }

    /// Create a new `ExecutionError`.
    pub fn execution<S: Into<String>>(msg: S) -> Self {
        Self::ExecutionError(msg.into())
    }

    /// Create a new `InvalidParameter` error.
    pub fn invalid_parameter<S: Into<String>>(msg: S) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Create a new `ConfigError`.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a new `InternalError`.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::InternalError(msg.into())
    }

    /// Whether this error carries database-access semantics that must be
    /// surfaced unwrapped rather than wrapped by the execution engine.
    pub fn is_data_access(&self) -> bool {
        matches!(self, Self::DataAccess(_))
    }
}

/// Ensure a condition holds, returning the given error variant if not.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $msg:expr) => {
        if !$cond {
            return Err($crate::QuiltError::ExecutionError($msg.to_string()));
        }
    };
    ($cond:expr, $variant:ident: $($msg:tt)*) => {
        if !$cond {
            return Err($crate::QuiltError::$variant(format!($($msg)*)));
        }
    };
}

/// Return early with an `InvalidParameter` error.
#[macro_export]
macro_rules! invalid_parameter_err {
    ($($arg:tt)*) => {
        return Err($crate::QuiltError::InvalidParameter(format!($($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QuiltError::unsupported_algorithm("hint algorithm given zero values");
        assert_eq!(
            err.to_string(),
            "UnsupportedAlgorithm: hint algorithm given zero values"
        );
    }

    #[test]
    fn test_error_constructors() {
        let _ = QuiltError::route_inconsistency("t_order_9 not routed");
        let _ = QuiltError::data_access("connection refused");
        let _ = QuiltError::execution("worker failed");
        let _ = QuiltError::invalid_parameter("empty data node");
        let _ = QuiltError::internal("unexpected state");
    }

    #[test]
    fn test_is_data_access() {
        assert!(QuiltError::data_access("boom").is_data_access());
        assert!(!QuiltError::execution("boom").is_data_access());
    }
}
