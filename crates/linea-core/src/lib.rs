//! linea-core: matrices, linear systems and 2D vector plot layouts.
//!
//! This crate provides a small dense matrix type with the usual operations,
//! two classical solvers for square systems (Cramer's rule and the inverse
//! method) that report their intermediate steps, 2D vector arithmetic, and a
//! deterministic layout generator that turns two vectors into axis ranges,
//! grid lines and arrows ready for plotly.
//!
//! Everything is a pure function over owned or borrowed values; there is no
//! shared state and no I/O.
pub mod config;
pub mod error;
pub mod linear_systems;
pub mod math;
pub mod ops;
pub mod plot;
pub mod vectors;

pub use config::{DashStyle, GridConfig};
pub use error::LinalgError;
pub use linear_systems::{
    cramer, inverse_solve, solve, CramerSteps, InverseSteps, SolveMethod, SystemOutcome,
    SystemSolution, Unsolvable,
};
pub use math::{Matrix, ShapeError, Vector};
pub use ops::EPS;
pub use vectors::{Polar, Vec2};
