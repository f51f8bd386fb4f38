//! Request/response boundary for `linea-core`: JSON request files in,
//! JSON responses (and optional plotly HTML) out.
pub mod parsing;
pub mod requests;
pub mod util;
