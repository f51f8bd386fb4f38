use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    fs::File,
    io::{self, Write},
    path::Path,
};

pub fn write_bytes_to_file<P: AsRef<Path>>(path: P, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    Ok(())
}

/// Write `value` as pretty JSON to `path`, or to stdout when no path is given.
pub fn write_json<T: Serialize>(value: &T, path: Option<&Path>) -> Result<()> {
    let mut json = serde_json::to_string_pretty(value).context("Failed to serialize response")?;
    json.push('\n');
    match path {
        Some(path) => write_bytes_to_file(path, json.as_bytes())
            .with_context(|| format!("Failed to write output: {}", path.display())),
        None => io::stdout()
            .lock()
            .write_all(json.as_bytes())
            .context("Failed to write to stdout"),
    }
}
