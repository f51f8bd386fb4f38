//! Small dense containers used throughout the crate.
//!
//! `Matrix` is a row-major 2D buffer with a runtime-checked shape and
//! `Vector` a 1D buffer. Both are plain owned values: cloning is how a
//! caller gets an independent copy.
pub mod matrix;
pub mod vector;

pub use matrix::{Matrix, ShapeError};
pub use vector::Vector;
