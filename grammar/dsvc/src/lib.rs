//! DSV command-line front end.
//!
//! Reads a file, picks a dialect, and reports the syntax tree, the decoded
//! records, or the diagnostics.

pub mod commands;
mod tracing_setup;

pub use tracing_setup::init_tracing;

use std::path::{Path, PathBuf};

use dsv_scanner::Dialect;

/// Errors the CLI reports before exiting.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write output: {0}")]
    Write(#[from] std::io::Error),
}

/// Pick the dialect: an explicit choice wins, then the file extension,
/// then comma.
pub fn resolve_dialect(explicit: Option<Dialect>, path: &Path) -> Dialect {
    if let Some(dialect) = explicit {
        return dialect;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| Dialect::from_extension(ext).ok())
        .unwrap_or_default()
}

/// Read a source file as UTF-8.
pub fn read_source(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}
