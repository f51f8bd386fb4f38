//! Request files in, JSON responses out.

use std::io::Write;

use linea_cli::parsing::{parse_matrix, parse_number, parse_vector, NumberInput, ParseError};
use linea_cli::requests::{
    decode_request, read_request, run_linear, run_matrix, run_vectors, ErrorResponse,
    LinearRequest, MatrixRequest, RequestError, VectorsRequest,
};
use linea_cli::util::write_json;
use serde_json::{json, Value};

fn matrix_request(body: Value) -> MatrixRequest {
    serde_json::from_value(body).unwrap()
}

fn to_json<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap()
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

#[test]
fn numbers_accept_fractions_and_decimals() {
    assert_eq!(parse_number("7").unwrap(), 7.0);
    assert_eq!(parse_number("0.25").unwrap(), 0.25);
    assert_eq!(parse_number("-1/4").unwrap(), -0.25);
    assert_eq!(parse_number("\t2/8 ").unwrap(), 0.25);
}

#[test]
fn numbers_reject_empty_and_malformed_text() {
    assert_eq!(parse_number(""), Err(ParseError::Empty));
    assert!(matches!(parse_number("3/0"), Err(ParseError::Invalid(_))));
    assert!(matches!(parse_number("x"), Err(ParseError::Invalid(_))));
    assert!(matches!(parse_number("1/-2"), Err(ParseError::Invalid(_))));
}

#[test]
fn matrix_cells_must_be_rectangular() {
    let cells: Vec<Vec<NumberInput>> = vec![
        vec!["1".into(), "2".into()],
        vec!["3".into()],
    ];
    assert_eq!(
        parse_matrix(&cells),
        Err(ParseError::Ragged {
            row: 1,
            expected: 2,
            found: 1
        })
    );
    assert_eq!(parse_matrix(&[]), Err(ParseError::EmptyMatrix));
    assert_eq!(parse_matrix(&[vec![]]), Err(ParseError::NoColumns));
}

#[test]
fn cells_may_mix_numbers_and_text() {
    let cells: Vec<Vec<NumberInput>> =
        serde_json::from_value(json!([[1, "1/2"], ["-3", 4.5]])).unwrap();
    let m = parse_matrix(&cells).unwrap();
    assert_eq!(m.to_rows(), vec![vec![1.0, 0.5], vec![-3.0, 4.5]]);
    assert_eq!(parse_vector(&[]), Err(ParseError::EmptyVector));
}

// ---------------------------------------------------------------------------
// Matrix requests
// ---------------------------------------------------------------------------

#[test]
fn matrix_binary_ops() {
    let sum = run_matrix(&matrix_request(json!({
        "A": [["1", "2"], ["3", "4"]],
        "B": [["5", "6"], ["7", "8"]],
        "op": "add"
    })))
    .unwrap();
    assert_eq!(to_json(&sum), json!({"resultMatrix": [[6.0, 8.0], [10.0, 12.0]]}));

    let product = run_matrix(&matrix_request(json!({
        "A": [["1", "2", "3"]],
        "B": [["1"], ["1"], ["1"]],
        "op": "mul"
    })))
    .unwrap();
    assert_eq!(to_json(&product), json!({"resultMatrix": [[6.0]]}));
}

#[test]
fn matrix_determinant_is_a_scalar() {
    let det = run_matrix(&matrix_request(json!({
        "A": [["4", "7"], ["2", "6"]],
        "op": "det"
    })))
    .unwrap();
    let scalar = to_json(&det)["scalar"].as_f64().unwrap();
    assert!((scalar - 10.0).abs() < 1e-9);
}

#[test]
fn unary_ops_can_target_b() {
    let t = run_matrix(&matrix_request(json!({
        "A": [["1"]],
        "B": [["1", "2", "3"]],
        "op": "trans",
        "target": "B"
    })))
    .unwrap();
    assert_eq!(to_json(&t), json!({"resultMatrix": [[1.0], [2.0], [3.0]]}));

    let missing = run_matrix(&matrix_request(json!({
        "A": [["1"]],
        "op": "inv",
        "target": "B"
    })));
    assert!(matches!(missing, Err(RequestError::MissingTarget)));
}

#[test]
fn matrix_rejections_carry_messages() {
    let no_b = run_matrix(&matrix_request(json!({"A": [["1"]], "op": "add"}))).unwrap_err();
    assert!(matches!(no_b, RequestError::MissingB("add")));

    let mismatch = run_matrix(&matrix_request(json!({
        "A": [["1", "2"]],
        "B": [["1", "2"]],
        "op": "mul"
    })))
    .unwrap_err();
    assert!(matches!(mismatch, RequestError::Linalg(ref e) if e.is_dimension()));

    let singular = run_matrix(&matrix_request(json!({
        "A": [["1", "2"], ["2", "4"]],
        "op": "inv"
    })))
    .unwrap_err();
    let body = to_json(&ErrorResponse::from(&singular));
    assert!(body["error"].as_str().unwrap().contains("no inverse"));

    let bad_cell = run_matrix(&matrix_request(json!({"A": [["1/0"]], "op": "det"}))).unwrap_err();
    assert!(matches!(bad_cell, RequestError::Parse(ParseError::Invalid(_))));
}

// ---------------------------------------------------------------------------
// Linear requests
// ---------------------------------------------------------------------------

#[test]
fn linear_request_defaults_to_cramer() {
    let request: LinearRequest = serde_json::from_value(json!({
        "A": [["2", "1"], ["5", "3"]],
        "b": ["1", "2"]
    }))
    .unwrap();
    let body = to_json(&run_linear(&request).unwrap());
    assert_eq!(body["perColumnDeterminants"].as_array().map(Vec::len), Some(2));
    let x = body["solution"].as_array().unwrap();
    assert!((x[0].as_f64().unwrap() - 1.0).abs() < 1e-9);
    assert!((x[1].as_f64().unwrap() + 1.0).abs() < 1e-9);
}

#[test]
fn linear_request_inverse_method() {
    let request: LinearRequest = serde_json::from_value(json!({
        "A": [["3", "2"], ["1", "2"]],
        "b": ["2", "0"],
        "method": "inverse"
    }))
    .unwrap();
    let body = to_json(&run_linear(&request).unwrap());
    assert!(body.get("inverseMatrix").is_some());
    assert!((body["determinant"].as_f64().unwrap() - 4.0).abs() < 1e-9);
}

#[test]
fn unsolvable_system_is_not_a_rejection() {
    let request: LinearRequest = serde_json::from_value(json!({
        "A": [["1", "2"], ["2", "4"]],
        "b": ["3", "6"]
    }))
    .unwrap();
    let solution = run_linear(&request).unwrap();
    assert!(!solution.is_solved());
    assert!(to_json(&solution).get("error").is_some());
}

#[test]
fn linear_shape_errors_are_rejections() {
    let request: LinearRequest = serde_json::from_value(json!({
        "A": [["1", "2"], ["3", "4"]],
        "b": ["1"]
    }))
    .unwrap();
    assert!(matches!(run_linear(&request), Err(RequestError::Linalg(_))));
}

// ---------------------------------------------------------------------------
// Vector requests
// ---------------------------------------------------------------------------

#[test]
fn cartesian_vectors_response() {
    let request: VectorsRequest = serde_json::from_value(json!({
        "inputMode": "cart",
        "v1": {"x": 3, "y": 4},
        "v2": {"x": "-1", "y": "2"},
        "show": {"parallelogram": true}
    }))
    .unwrap();
    let response = run_vectors(&request).unwrap();
    assert_eq!(response.sum, [2.0, 6.0]);
    assert_eq!(response.diff, [4.0, 2.0]);
    assert_eq!(response.dot, 5.0);
    assert_eq!(response.cross, 10.0);
    assert!((response.v1.mag - 5.0).abs() < 1e-12);

    let body = to_json(&response);
    assert_eq!(body["v1"]["xy"], json!([3.0, 4.0]));
    assert!(body["plotSpec"]["paths"].as_array().is_some_and(|p| p.len() == 1));
    assert_eq!(body["plotSpec"]["xRange"].as_array().map(Vec::len), Some(2));
}

#[test]
fn polar_vectors_are_converted() {
    let request: VectorsRequest = serde_json::from_value(json!({
        "inputMode": "polar",
        "v1": {"mag": 2, "deg": 90},
        "v2": {}
    }))
    .unwrap();
    let response = run_vectors(&request).unwrap();
    assert!(response.v1.xy[0].abs() < 1e-12);
    assert!((response.v1.xy[1] - 2.0).abs() < 1e-12);
    assert!((response.v1.deg - 90.0).abs() < 1e-9);
    assert_eq!(response.v2.xy, [0.0, 0.0]);
    assert_eq!(response.v2.deg, 0.0);
}

#[test]
fn bad_vector_field_is_rejected() {
    let request: VectorsRequest = serde_json::from_value(json!({
        "inputMode": "cart",
        "v1": {"x": "three"},
        "v2": {"x": 1}
    }))
    .unwrap();
    assert!(matches!(run_vectors(&request), Err(RequestError::Parse(_))));
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

#[test]
fn read_request_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"A": [["1", "2"], ["3", "4"]], "op": "trans"}}"#).unwrap();
    let content = read_request(file.path()).unwrap();
    let request: MatrixRequest = decode_request(&content).unwrap();
    let body = to_json(&run_matrix(&request).unwrap());
    assert_eq!(body, json!({"resultMatrix": [[1.0, 3.0], [2.0, 4.0]]}));
}

#[test]
fn read_request_reports_path_on_failure() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    let err = read_request(&missing).unwrap_err();
    assert!(format!("{}", err).contains("missing.json"));
}

#[test]
fn malformed_bodies_are_rejected_requests() {
    let unknown_op = decode_request::<MatrixRequest>(r#"{"A": [["1"]], "op": "pow"}"#);
    assert!(matches!(unknown_op, Err(RequestError::Malformed(_))));

    let bool_cell = decode_request::<MatrixRequest>(r#"{"A": [["1", true]], "op": "det"}"#)
        .unwrap_err();
    let body = to_json(&ErrorResponse::from(&bool_cell));
    assert!(body["error"].as_str().unwrap().starts_with("malformed request"));

    let not_json = decode_request::<LinearRequest>("{\"A\": ");
    assert!(matches!(not_json, Err(RequestError::Malformed(_))));
}

#[test]
fn write_json_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.json");
    let body = ErrorResponse {
        error: "empty matrix is not valid".to_string(),
    };
    write_json(&body, Some(out.as_path())).unwrap();
    let written: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written, json!({"error": "empty matrix is not valid"}));
}
