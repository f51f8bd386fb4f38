//! Cramer's rule and the inverse method for square systems `Ax = b`.
//!
//! Both solvers reproduce the classical algorithm step by step and return
//! the intermediate values alongside the solution so they can be displayed.
//!
//! Two failure channels are kept apart on purpose:
//!
//! * a malformed request (non-square `A`, wrong length `b`) is an
//!   `Err(LinalgError)`;
//! * a well-formed system whose determinant is below [`EPS`] is
//!   `Ok(SystemOutcome::Unsolvable { .. })`, carrying the determinant.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LinalgError;
use crate::math::{Matrix, Vector};
use crate::ops::{self, EPS};

const NO_UNIQUE_SOLUTION: &str = "the system has no unique solution: |A| = 0";
const NO_INVERSE: &str = "the system has no unique solution: |A| = 0 and A has no inverse";

/// Result of a solve: either the solver's steps or the reason it stopped.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SystemOutcome<T> {
    Solved(T),
    Unsolvable(Unsolvable),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Unsolvable {
    pub error: String,
    pub determinant: f64,
}

/// Values every solver reports on success.
pub trait SolverSteps {
    fn determinant(&self) -> f64;
    fn solution(&self) -> &Vector;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CramerSteps {
    pub determinant: f64,
    /// `|A_k|` for every column `k`.
    pub per_column_determinants: Vec<f64>,
    /// `A_k`: `A` with column `k` replaced by `b`.
    pub per_column_matrices: Vec<Matrix>,
    pub solution: Vector,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InverseSteps {
    pub determinant: f64,
    pub inverse_matrix: Matrix,
    pub solution: Vector,
}

impl SolverSteps for CramerSteps {
    fn determinant(&self) -> f64 {
        self.determinant
    }

    fn solution(&self) -> &Vector {
        &self.solution
    }
}

impl SolverSteps for InverseSteps {
    fn determinant(&self) -> f64 {
        self.determinant
    }

    fn solution(&self) -> &Vector {
        &self.solution
    }
}

impl<T: SolverSteps> SystemOutcome<T> {
    pub fn is_solved(&self) -> bool {
        matches!(self, SystemOutcome::Solved(_))
    }

    pub fn determinant(&self) -> f64 {
        match self {
            SystemOutcome::Solved(steps) => steps.determinant(),
            SystemOutcome::Unsolvable(u) => u.determinant,
        }
    }

    pub fn solution(&self) -> Option<&Vector> {
        match self {
            SystemOutcome::Solved(steps) => Some(steps.solution()),
            SystemOutcome::Unsolvable(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SystemOutcome::Solved(_) => None,
            SystemOutcome::Unsolvable(u) => Some(&u.error),
        }
    }
}

fn validate_system(a: &Matrix, b: &Vector) -> Result<(), LinalgError> {
    ops::validate_square(a)?;
    if b.len() != a.nrows() {
        return Err(LinalgError::VectorLength {
            expected: a.nrows(),
            found: b.len(),
        });
    }
    Ok(())
}

/// Solve `Ax = b` by Cramer's rule: `x_k = |A_k| / |A|`.
pub fn cramer(a: &Matrix, b: &Vector) -> Result<SystemOutcome<CramerSteps>, LinalgError> {
    validate_system(a, b)?;
    let det_a = ops::determinant(a)?;
    if det_a.abs() < EPS {
        log::debug!("cramer: |A| = {:e} below threshold", det_a);
        return Ok(SystemOutcome::Unsolvable(Unsolvable {
            error: NO_UNIQUE_SOLUTION.to_string(),
            determinant: det_a,
        }));
    }

    let n = a.nrows();
    let mut per_column_determinants = Vec::with_capacity(n);
    let mut per_column_matrices = Vec::with_capacity(n);
    let mut solution = Vector::zeros(n);
    for k in 0..n {
        let a_k = a.with_column(k, b.as_slice());
        let det_k = ops::determinant(&a_k)?;
        log::trace!("cramer: |A_{}| = {}", k + 1, det_k);
        solution[k] = det_k / det_a;
        per_column_determinants.push(det_k);
        per_column_matrices.push(a_k);
    }

    Ok(SystemOutcome::Solved(CramerSteps {
        determinant: det_a,
        per_column_determinants,
        per_column_matrices,
        solution,
    }))
}

/// Solve `Ax = b` as `x = A⁻¹ · b`.
pub fn inverse_solve(a: &Matrix, b: &Vector) -> Result<SystemOutcome<InverseSteps>, LinalgError> {
    validate_system(a, b)?;
    let det_a = ops::determinant(a)?;
    if det_a.abs() < EPS {
        log::debug!("inverse_solve: |A| = {:e} below threshold", det_a);
        return Ok(SystemOutcome::Unsolvable(Unsolvable {
            error: NO_INVERSE.to_string(),
            determinant: det_a,
        }));
    }

    let inverse_matrix = ops::inverse(a)?;
    let solution = ops::multiply_vector(&inverse_matrix, b)?;
    Ok(SystemOutcome::Solved(InverseSteps {
        determinant: det_a,
        inverse_matrix,
        solution,
    }))
}

/// Which classical algorithm to run.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SolveMethod {
    #[default]
    Cramer,
    #[serde(alias = "inverse", alias = "inverse_method")]
    InverseMethod,
}

impl FromStr for SolveMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cramer" => Ok(SolveMethod::Cramer),
            "inverse" | "inversemethod" | "inverse_method" => Ok(SolveMethod::InverseMethod),
            _ => Err(format!(
                "Unknown solve method: {}. Expected `cramer` or `inverse`",
                s
            )),
        }
    }
}

/// Outcome of [`solve`], tagged by the method that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SystemSolution {
    Cramer(SystemOutcome<CramerSteps>),
    InverseMethod(SystemOutcome<InverseSteps>),
}

impl SystemSolution {
    pub fn is_solved(&self) -> bool {
        match self {
            SystemSolution::Cramer(o) => o.is_solved(),
            SystemSolution::InverseMethod(o) => o.is_solved(),
        }
    }

    pub fn determinant(&self) -> f64 {
        match self {
            SystemSolution::Cramer(o) => o.determinant(),
            SystemSolution::InverseMethod(o) => o.determinant(),
        }
    }

    pub fn solution(&self) -> Option<&Vector> {
        match self {
            SystemSolution::Cramer(o) => o.solution(),
            SystemSolution::InverseMethod(o) => o.solution(),
        }
    }
}

pub fn solve(method: SolveMethod, a: &Matrix, b: &Vector) -> Result<SystemSolution, LinalgError> {
    match method {
        SolveMethod::Cramer => cramer(a, b).map(SystemSolution::Cramer),
        SolveMethod::InverseMethod => inverse_solve(a, b).map(SystemSolution::InverseMethod),
    }
}
