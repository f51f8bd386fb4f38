use anyhow::Result;
use clap::{Arg, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use linea_cli::requests::{
    decode_request, read_request, run_linear, run_matrix, run_vectors, ErrorResponse,
    LinearRequest, MatrixRequest, RequestError, VectorsRequest,
};
use linea_cli::util::{write_bytes_to_file, write_json};
use linea_core::linear_systems::SolveMethod;
use linea_core::plot::to_plotly;

fn request_arg(help: &'static str) -> Arg {
    Arg::new("request")
        .help(help)
        .required(true)
        .value_parser(clap::value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}

fn output_arg() -> Arg {
    Arg::new("output_file")
        .short('o')
        .long("output")
        .help("Path to write the JSON response. Defaults to stdout.")
        .value_parser(clap::value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("LINEA_LOG", "error,linea=info"))
        .init();

    let matches = Command::new("linea")
        .version(clap::crate_version!())
        .about("Matrix, linear system and 2D vector calculator")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("matrix")
                .about("Add, subtract, multiply, invert, transpose or take the determinant of matrices")
                .arg(request_arg("Path to a matrix request JSON file ({A, B?, op, target?})"))
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("linear")
                .about("Solve a square linear system by Cramer's rule or the inverse method")
                .arg(request_arg("Path to a linear system request JSON file ({A, b, method?})"))
                .arg(output_arg())
                .arg(
                    Arg::new("method")
                        .short('m')
                        .long("method")
                        .help("Override the solve method from the request file.")
                        .value_parser(["cramer", "inverse"])
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("vectors")
                .about("Compute 2D vector operations and a plot layout")
                .arg(request_arg(
                    "Path to a vectors request JSON file ({inputMode, v1, v2, show?})",
                ))
                .arg(output_arg())
                .arg(
                    Arg::new("html")
                        .long("html")
                        .help("Also write the plot as a standalone plotly HTML page.")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    match matches.subcommand() {
        Some(("matrix", sub_m)) => handle_matrix(sub_m),
        Some(("linear", sub_m)) => handle_linear(sub_m),
        Some(("vectors", sub_m)) => handle_vectors(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

/// Write the response, or the `{"error": ...}` body and exit non-zero.
fn respond<T: Serialize>(outcome: Result<T, RequestError>, output: Option<&Path>) -> Result<T> {
    match outcome {
        Ok(response) => {
            write_json(&response, output)?;
            Ok(response)
        }
        Err(e) => {
            log::error!("Request rejected: {}", e);
            write_json(&ErrorResponse::from(&e), output)?;
            std::process::exit(1)
        }
    }
}

fn request_paths(matches: &ArgMatches) -> (&PathBuf, Option<&Path>) {
    let request_path: &PathBuf = matches
        .get_one("request")
        .expect("request is a required argument");
    let output_path = matches.get_one::<PathBuf>("output_file").map(PathBuf::as_path);
    (request_path, output_path)
}

fn handle_matrix(matches: &ArgMatches) -> Result<()> {
    let (request_path, output_path) = request_paths(matches);
    log::info!("[linea::matrix] Request: {:?}", request_path);

    let content = read_request(request_path)?;
    let outcome =
        decode_request::<MatrixRequest>(&content).and_then(|request| run_matrix(&request));
    respond(outcome, output_path)?;
    Ok(())
}

fn handle_linear(matches: &ArgMatches) -> Result<()> {
    let (request_path, output_path) = request_paths(matches);
    log::info!("[linea::linear] Request: {:?}", request_path);

    let method_override = matches
        .get_one::<String>("method")
        .map(|method| SolveMethod::from_str(method))
        .transpose()
        .map_err(anyhow::Error::msg)?;

    let content = read_request(request_path)?;
    let outcome = decode_request::<LinearRequest>(&content).and_then(|mut request| {
        if let Some(method) = method_override {
            request.method = method;
        }
        run_linear(&request)
    });
    let solution = respond(outcome, output_path)?;
    if !solution.is_solved() {
        log::info!(
            "[linea::linear] System has no unique solution (|A| = {})",
            solution.determinant()
        );
    }
    Ok(())
}

fn handle_vectors(matches: &ArgMatches) -> Result<()> {
    let (request_path, output_path) = request_paths(matches);
    log::info!("[linea::vectors] Request: {:?}", request_path);

    let content = read_request(request_path)?;
    let outcome =
        decode_request::<VectorsRequest>(&content).and_then(|request| run_vectors(&request));
    let response = respond(outcome, output_path)?;

    if let Some(html_path) = matches.get_one::<PathBuf>("html") {
        let html = to_plotly(&response.plot_spec).to_html();
        write_bytes_to_file(html_path, html.as_bytes())?;
        log::info!("[linea::vectors] Plot written to {:?}", html_path);
    }
    Ok(())
}
