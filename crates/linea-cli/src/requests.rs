//! JSON request and response records for the three calculators, and the
//! handlers that run them against `linea-core`.

use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use linea_core::config::GridConfig;
use linea_core::linear_systems::{solve, SolveMethod, SystemSolution};
use linea_core::math::Matrix;
use linea_core::ops;
use linea_core::plot::{plot_layout, PlotSpec};
use linea_core::vectors::{self, Vec2};
use linea_core::LinalgError;

use crate::parsing::{parse_matrix, parse_vector, NumberInput, ParseError};

/// Reasons a request is rejected outright. Each maps to an `{"error": ...}`
/// response.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Linalg(#[from] LinalgError),

    #[error("matrix B is required for `{0}`")]
    MissingB(&'static str),

    #[error("target matrix B was not provided")]
    MissingTarget,

    #[error("malformed request: {0}")]
    Malformed(String),
}

/// Body written for a rejected request.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&RequestError> for ErrorResponse {
    fn from(err: &RequestError) -> Self {
        ErrorResponse {
            error: err.to_string(),
        }
    }
}

pub fn read_request<P: AsRef<Path>>(path: P) -> Result<String> {
    std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read request: {}", path.as_ref().display()))
}

/// Decode a request body. A body of the wrong shape is a rejected request,
/// not an I/O failure.
pub fn decode_request<T: DeserializeOwned>(content: &str) -> Result<T, RequestError> {
    serde_json::from_str(content).map_err(|e| RequestError::Malformed(e.to_string()))
}

// ---------------------------------------------------------------------------
// Matrix operations
// ---------------------------------------------------------------------------

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MatrixOp {
    Add,
    #[serde(alias = "subtract")]
    Sub,
    #[serde(alias = "multiply")]
    Mul,
    #[serde(alias = "determinant")]
    Det,
    #[serde(alias = "inverse")]
    Inv,
    #[serde(alias = "transpose")]
    Trans,
}

impl MatrixOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatrixOp::Add => "add",
            MatrixOp::Sub => "sub",
            MatrixOp::Mul => "mul",
            MatrixOp::Det => "det",
            MatrixOp::Inv => "inv",
            MatrixOp::Trans => "trans",
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Target {
    #[default]
    A,
    B,
}

#[derive(Deserialize, Debug, Clone)]
pub struct MatrixRequest {
    #[serde(rename = "A")]
    pub a: Vec<Vec<NumberInput>>,
    #[serde(rename = "B", default)]
    pub b: Option<Vec<Vec<NumberInput>>>,
    pub op: MatrixOp,
    #[serde(default)]
    pub target: Option<Target>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum MatrixResponse {
    Matrix {
        #[serde(rename = "resultMatrix")]
        result_matrix: Matrix,
    },
    Scalar {
        scalar: f64,
    },
}

impl MatrixResponse {
    fn matrix(result_matrix: Matrix) -> Self {
        MatrixResponse::Matrix { result_matrix }
    }
}

fn operand_b(b: Option<&Matrix>, op: MatrixOp) -> Result<&Matrix, RequestError> {
    b.ok_or(RequestError::MissingB(op.as_str()))
}

/// Operand of a unary op; `A` unless the request targets `B`.
fn operand_target<'a>(
    a: &'a Matrix,
    b: Option<&'a Matrix>,
    target: Option<Target>,
) -> Result<&'a Matrix, RequestError> {
    match target.unwrap_or_default() {
        Target::A => Ok(a),
        Target::B => b.ok_or(RequestError::MissingTarget),
    }
}

pub fn run_matrix(request: &MatrixRequest) -> Result<MatrixResponse, RequestError> {
    let a = parse_matrix(&request.a)?;
    let b = request.b.as_deref().map(parse_matrix).transpose()?;
    let op = request.op;
    log::debug!("matrix op `{}` on A {:?}", op.as_str(), a.shape());

    let response = match op {
        MatrixOp::Add => MatrixResponse::matrix(ops::add(&a, operand_b(b.as_ref(), op)?)?),
        MatrixOp::Sub => MatrixResponse::matrix(ops::subtract(&a, operand_b(b.as_ref(), op)?)?),
        MatrixOp::Mul => MatrixResponse::matrix(ops::multiply(&a, operand_b(b.as_ref(), op)?)?),
        MatrixOp::Det => MatrixResponse::Scalar {
            scalar: ops::determinant(operand_target(&a, b.as_ref(), request.target)?)?,
        },
        MatrixOp::Inv => {
            MatrixResponse::matrix(ops::inverse(operand_target(&a, b.as_ref(), request.target)?)?)
        }
        MatrixOp::Trans => {
            MatrixResponse::matrix(ops::transpose(operand_target(&a, b.as_ref(), request.target)?))
        }
    };
    Ok(response)
}

// ---------------------------------------------------------------------------
// Linear systems
// ---------------------------------------------------------------------------

#[derive(Deserialize, Debug, Clone)]
pub struct LinearRequest {
    #[serde(rename = "A")]
    pub a: Vec<Vec<NumberInput>>,
    pub b: Vec<NumberInput>,
    #[serde(default)]
    pub method: SolveMethod,
}

/// An unsolvable system is still `Ok`: the record carries the message.
pub fn run_linear(request: &LinearRequest) -> Result<SystemSolution, RequestError> {
    let a = parse_matrix(&request.a)?;
    let b = parse_vector(&request.b)?;
    log::debug!("solving {:?} system with {:?}", a.shape(), request.method);
    Ok(solve(request.method, &a, &b)?)
}

// ---------------------------------------------------------------------------
// Vectors
// ---------------------------------------------------------------------------

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    Polar,
    #[default]
    #[serde(alias = "cartesian")]
    Cart,
}

/// One vector as sent by the client. Polar mode reads `mag`/`deg`,
/// cartesian mode reads `x`/`y`; absent fields count as zero.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct VectorInput {
    pub mag: Option<NumberInput>,
    pub deg: Option<NumberInput>,
    pub x: Option<NumberInput>,
    pub y: Option<NumberInput>,
}

fn field(value: &Option<NumberInput>) -> Result<f64, ParseError> {
    value.as_ref().map_or(Ok(0.0), NumberInput::value)
}

impl VectorInput {
    pub fn resolve(&self, mode: InputMode) -> Result<Vec2, ParseError> {
        match mode {
            InputMode::Polar => Ok(vectors::to_components(field(&self.mag)?, field(&self.deg)?)),
            InputMode::Cart => Ok(Vec2::new(field(&self.x)?, field(&self.y)?)),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VectorsRequest {
    pub input_mode: InputMode,
    #[serde(default)]
    pub v1: VectorInput,
    #[serde(default)]
    pub v2: VectorInput,
    #[serde(default)]
    pub show: GridConfig,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct VectorSummary {
    pub xy: [f64; 2],
    pub mag: f64,
    pub deg: f64,
}

impl From<Vec2> for VectorSummary {
    fn from(v: Vec2) -> Self {
        let polar = v.to_polar();
        VectorSummary {
            xy: [v.x, v.y],
            mag: polar.magnitude,
            deg: polar.degrees,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VectorsResponse {
    pub v1: VectorSummary,
    pub v2: VectorSummary,
    pub sum: [f64; 2],
    pub diff: [f64; 2],
    pub dot: f64,
    pub cross: f64,
    pub plot_spec: PlotSpec,
}

pub fn run_vectors(request: &VectorsRequest) -> Result<VectorsResponse, RequestError> {
    let u = request.v1.resolve(request.input_mode)?;
    let v = request.v2.resolve(request.input_mode)?;
    log::debug!("vectors u = {:?}, v = {:?}", u, v);

    let sum = vectors::add(u, v);
    let diff = vectors::subtract(u, v);
    Ok(VectorsResponse {
        v1: u.into(),
        v2: v.into(),
        sum: [sum.x, sum.y],
        diff: [diff.x, diff.y],
        dot: vectors::dot(u, v),
        cross: vectors::cross(u, v),
        plot_spec: plot_layout(u, v, &request.show),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_b_names_the_operation() {
        let request: MatrixRequest =
            serde_json::from_str(r#"{"A": [["1"]], "op": "mul"}"#).unwrap();
        let err = run_matrix(&request).unwrap_err();
        assert_eq!(err.to_string(), "matrix B is required for `mul`");
    }

    #[test]
    fn vector_fields_default_to_zero() {
        let input: VectorInput = serde_json::from_str(r#"{"x": "3/2"}"#).unwrap();
        assert_eq!(input.resolve(InputMode::Cart).unwrap(), Vec2::new(1.5, 0.0));
        assert_eq!(input.resolve(InputMode::Polar).unwrap(), Vec2::ZERO);
    }
}
