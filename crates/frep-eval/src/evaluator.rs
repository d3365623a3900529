//! The capability contract the octree builder consumes.

use frep_types::Interval;
use nalgebra::Point3;

use crate::error::EvalResult;

/// Evaluation of one bound expression over boxes and points.
///
/// An evaluator is bound to a single expression (one tree node) when it is
/// constructed; both methods answer questions about that expression only.
/// Implementations must be safe to call repeatedly and concurrently - the
/// octree builder invokes them from parallel sibling recursions with no
/// synchronization.
///
/// The sign convention is fixed kernel-wide: **negative means inside**. The
/// builder derives inside/outside from the returned values; evaluators just
/// report the raw numbers.
pub trait Evaluator {
    /// A conservative enclosure of the expression over the box `x × y × z`.
    ///
    /// The result may be wider than the true range, never narrower: a lower
    /// bound `>= 0` must prove the box entirely outside the shape and an
    /// upper bound `< 0` entirely inside.
    ///
    /// # Errors
    ///
    /// Returns an error if the enclosure cannot be computed (malformed
    /// expression).
    fn bounds_over(&self, x: Interval, y: Interval, z: Interval) -> EvalResult<Interval>;

    /// The exact value of the expression at `point`.
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation produces a non-finite value.
    fn value_at(&self, point: Point3<f64>) -> EvalResult<f64>;
}
