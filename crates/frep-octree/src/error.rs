//! Error types for octree rendering.

use frep_eval::EvalError;

/// Errors that abort an octree render.
///
/// A render is all-or-nothing: any evaluator failure anywhere in the
/// recursion discards the partial tree and surfaces here.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RenderError {
    /// The bound evaluator failed; the expression is malformed over the
    /// requested region.
    #[error("evaluator failed during render: {0}")]
    Evaluator(#[from] EvalError),
}

/// Result alias for rendering.
pub type RenderResult<T> = Result<T, RenderError>;
