//! Error types for expression evaluation.

use frep_types::Interval;
use nalgebra::Point3;

/// Errors produced while evaluating an expression.
///
/// These indicate a malformed expression (e.g. `0/0`, `sqrt` of a negative
/// value at a point), not a transient condition - retrying the same query
/// yields the same failure.
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum EvalError {
    /// Point evaluation produced a NaN or infinite value.
    #[error("non-finite value {value} at {point}")]
    NonFiniteValue {
        /// The query point.
        point: Point3<f64>,
        /// The offending result.
        value: f64,
    },

    /// Interval evaluation produced a NaN endpoint.
    ///
    /// Infinite endpoints are *not* an error: they arise legitimately from
    /// conservative division and simply fail to prune, forcing subdivision.
    #[error("NaN interval bound over x={x:?}, y={y:?}, z={z:?}")]
    NanBounds {
        /// The query box's x extent.
        x: Interval,
        /// The query box's y extent.
        y: Interval,
        /// The query box's z extent.
        z: Interval,
    },
}

/// Result alias for evaluation.
pub type EvalResult<T> = Result<T, EvalError>;
