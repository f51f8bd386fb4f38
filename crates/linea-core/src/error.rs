use thiserror::Error;

/// Failures raised by matrix operations and the linear solvers.
///
/// Everything except `Singular` is a shape problem detected before any
/// arithmetic happens; `is_dimension` groups those together.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinalgError {
    #[error("matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("cannot {op} matrices of shape {}x{} and {}x{}", .lhs.0, .lhs.1, .rhs.0, .rhs.1)]
    ShapeMismatch {
        op: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },

    #[error("cannot multiply: A has {lhs_cols} columns but B has {rhs_rows} rows")]
    InnerDimension { lhs_cols: usize, rhs_rows: usize },

    #[error("vector length {found} does not match matrix size {expected}")]
    VectorLength { expected: usize, found: usize },

    #[error("matrix has no inverse: |A| = {determinant:e}")]
    Singular { determinant: f64 },
}

impl LinalgError {
    /// True for every shape-related failure.
    pub fn is_dimension(&self) -> bool {
        !matches!(self, LinalgError::Singular { .. })
    }
}
