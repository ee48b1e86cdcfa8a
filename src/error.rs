use thiserror::Error;

/// Top-level error type for the polynav kernel.
#[derive(Debug, Error)]
pub enum PolynavError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Navigation(#[from] NavigationError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors raised by the polygon operations (boolean, offset, decomposition).
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid operation code: {0}")]
    InvalidOperation(String),

    /// An internal invariant was broken. The operation is aborted.
    #[error("internal inconsistency: {0}")]
    Inconsistent(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Errors related to navigation mesh construction.
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("convex decomposition failed: {0}")]
    Decomposition(String),

    #[error("navigation mesh has no cells")]
    EmptyMesh,
}

/// Convenience type alias for results using [`PolynavError`].
pub type Result<T> = std::result::Result<T, PolynavError>;
