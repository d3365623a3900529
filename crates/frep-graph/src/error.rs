//! Error types for expression-graph queries.

/// Errors that can occur when querying a node for a payload it does not have.
///
/// These are the recoverable tier of failures: a caller probing whether a
/// node is a constant or an affine form gets a typed `Err` back, not a panic.
/// Passing an id that the tree does not own at all is a programming error and
/// panics instead.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GraphError {
    /// `value` was called on a node that is not a constant.
    #[error("node {id} is not a constant")]
    NotConstant {
        /// The queried node id (1-based arena id).
        id: u32,
    },

    /// `affine_form` was called on a node that is not an affine form.
    #[error("node {id} is not an affine form")]
    NotAffine {
        /// The queried node id (1-based arena id).
        id: u32,
    },
}

/// Result alias for graph queries.
pub type GraphResult<T> = Result<T, GraphError>;
