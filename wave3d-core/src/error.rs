/// Error types for the math and geometry modules
use thiserror::Error;

/// Result type alias for matrix and vector operations.
pub type MathResult<T> = Result<T, MathError>;

/// Result type alias for mesh and subdivision operations.
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Errors raised by degenerate vectors or transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MathError {
    /// The matrix has a zero determinant and cannot be inverted.
    #[error("matrix is singular (determinant is zero)")]
    SingularMatrix,

    /// A zero-length vector was normalized.
    #[error("cannot normalize a zero-length vector")]
    DegenerateVector,
}

/// Errors raised while building or refining meshes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A mesh needs at least one triangle.
    #[error("mesh must have at least one vertex")]
    EmptyMesh,

    /// An argument is outside the accepted domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A vector or matrix operation failed on degenerate input.
    #[error(transparent)]
    Math(#[from] MathError),
}

impl GeometryError {
    /// Create an invalid argument error.
    #[must_use]
    pub fn invalid_argument(details: impl Into<String>) -> Self {
        Self::InvalidArgument(details.into())
    }
}
