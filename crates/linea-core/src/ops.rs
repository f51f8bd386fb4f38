//! Element-wise and algebraic matrix operations.
//!
//! Every function validates shapes up front and returns
//! [`LinalgError`] before touching any numbers. Inputs are borrowed and
//! never modified.

use crate::error::LinalgError;
use crate::math::{Matrix, Vector};

/// Determinants with an absolute value below this are treated as zero.
///
/// The threshold is absolute, so it does not scale with the magnitude of
/// the entries: a well-conditioned matrix with tiny entries can be reported
/// singular and a badly conditioned one with huge entries can pass.
pub const EPS: f64 = 1e-10;

pub fn validate_square(a: &Matrix) -> Result<(), LinalgError> {
    if !a.is_square() {
        return Err(LinalgError::NotSquare {
            rows: a.nrows(),
            cols: a.ncols(),
        });
    }
    Ok(())
}

fn elementwise<F>(a: &Matrix, b: &Matrix, op: &'static str, f: F) -> Result<Matrix, LinalgError>
where
    F: Fn(f64, f64) -> f64,
{
    if a.shape() != b.shape() {
        return Err(LinalgError::ShapeMismatch {
            op,
            lhs: a.shape(),
            rhs: b.shape(),
        });
    }
    let (rows, cols) = a.shape();
    let mut out = Matrix::zeros(rows, cols);
    for r in 0..rows {
        for c in 0..cols {
            out[(r, c)] = f(a[(r, c)], b[(r, c)]);
        }
    }
    Ok(out)
}

pub fn add(a: &Matrix, b: &Matrix) -> Result<Matrix, LinalgError> {
    elementwise(a, b, "add", |x, y| x + y)
}

pub fn subtract(a: &Matrix, b: &Matrix) -> Result<Matrix, LinalgError> {
    elementwise(a, b, "subtract", |x, y| x - y)
}

/// Standard matrix product `A × B`.
pub fn multiply(a: &Matrix, b: &Matrix) -> Result<Matrix, LinalgError> {
    if a.ncols() != b.nrows() {
        return Err(LinalgError::InnerDimension {
            lhs_cols: a.ncols(),
            rhs_rows: b.nrows(),
        });
    }
    let (m, n, p) = (a.nrows(), a.ncols(), b.ncols());
    let mut out = Matrix::zeros(m, p);
    for i in 0..m {
        for j in 0..p {
            let mut acc = 0.0;
            for k in 0..n {
                acc += a[(i, k)] * b[(k, j)];
            }
            out[(i, j)] = acc;
        }
    }
    Ok(out)
}

/// Matrix-vector product `y_i = Σ_j A[i][j] * x[j]`.
pub fn multiply_vector(a: &Matrix, x: &Vector) -> Result<Vector, LinalgError> {
    if a.ncols() != x.len() {
        return Err(LinalgError::VectorLength {
            expected: a.ncols(),
            found: x.len(),
        });
    }
    Ok(a.rows().map(|row| x.dot(row)).collect())
}

pub fn transpose(a: &Matrix) -> Matrix {
    let (rows, cols) = a.shape();
    let mut out = Matrix::zeros(cols, rows);
    for r in 0..rows {
        for c in 0..cols {
            out[(c, r)] = a[(r, c)];
        }
    }
    out
}

/// Determinant by LU decomposition with partial pivoting.
///
/// The empty 0x0 matrix has determinant 1.
pub fn determinant(a: &Matrix) -> Result<f64, LinalgError> {
    validate_square(a)?;
    let n = a.nrows();
    let mut lu = a.clone();
    let mut det = 1.0;

    for k in 0..n {
        let mut pivot_row = k;
        let mut max_val = lu[(k, k)].abs();
        for i in (k + 1)..n {
            let candidate = lu[(i, k)].abs();
            if candidate > max_val {
                max_val = candidate;
                pivot_row = i;
            }
        }
        if lu[(pivot_row, k)] == 0.0 {
            return Ok(0.0);
        }
        if pivot_row != k {
            lu.swap_rows(pivot_row, k);
            det = -det;
        }

        let pivot = lu[(k, k)];
        det *= pivot;
        for i in (k + 1)..n {
            let factor = lu[(i, k)] / pivot;
            for j in (k + 1)..n {
                let upper = lu[(k, j)];
                lu[(i, j)] -= factor * upper;
            }
        }
    }

    Ok(det)
}

/// Determinant by Laplace expansion along the first row.
///
/// Exponential in `n`; kept as an independent reference for [`determinant`].
pub fn cofactor_determinant(a: &Matrix) -> Result<f64, LinalgError> {
    validate_square(a)?;
    Ok(laplace(a))
}

fn laplace(a: &Matrix) -> f64 {
    let n = a.nrows();
    match n {
        0 => 1.0,
        1 => a[(0, 0)],
        2 => a[(0, 0)] * a[(1, 1)] - a[(0, 1)] * a[(1, 0)],
        _ => {
            let mut det = 0.0;
            for col in 0..n {
                let entry = a[(0, col)];
                if entry == 0.0 {
                    continue;
                }
                let sign = if col % 2 == 0 { 1.0 } else { -1.0 };
                det += sign * entry * laplace(&minor(a, 0, col));
            }
            det
        }
    }
}

fn minor(a: &Matrix, skip_row: usize, skip_col: usize) -> Matrix {
    let n = a.nrows();
    let mut out = Matrix::zeros(n - 1, n - 1);
    for r in (0..n).filter(|&r| r != skip_row) {
        let dst_r = if r > skip_row { r - 1 } else { r };
        for c in (0..n).filter(|&c| c != skip_col) {
            let dst_c = if c > skip_col { c - 1 } else { c };
            out[(dst_r, dst_c)] = a[(r, c)];
        }
    }
    out
}

/// Inverse by Gauss-Jordan elimination on `[A | I]` with partial pivoting.
///
/// Fails with [`LinalgError::Singular`] when `|det(A)| < EPS`.
pub fn inverse(a: &Matrix) -> Result<Matrix, LinalgError> {
    let det = determinant(a)?;
    if det.abs() < EPS {
        log::debug!("refusing to invert matrix with |A| = {:e}", det);
        return Err(LinalgError::Singular { determinant: det });
    }

    let n = a.nrows();
    let mut left = a.clone();
    let mut right = Matrix::identity(n);

    for k in 0..n {
        let mut pivot_row = k;
        let mut max_val = left[(k, k)].abs();
        for i in (k + 1)..n {
            let candidate = left[(i, k)].abs();
            if candidate > max_val {
                max_val = candidate;
                pivot_row = i;
            }
        }
        if left[(pivot_row, k)] == 0.0 {
            return Err(LinalgError::Singular { determinant: det });
        }
        left.swap_rows(pivot_row, k);
        right.swap_rows(pivot_row, k);

        let pivot = left[(k, k)];
        for j in 0..n {
            left[(k, j)] /= pivot;
            right[(k, j)] /= pivot;
        }

        for i in 0..n {
            if i == k {
                continue;
            }
            let factor = left[(i, k)];
            if factor == 0.0 {
                continue;
            }
            for j in 0..n {
                let l = left[(k, j)];
                let r = right[(k, j)];
                left[(i, j)] -= factor * l;
                right[(i, j)] -= factor * r;
            }
        }
    }

    Ok(right)
}
