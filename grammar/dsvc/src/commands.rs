//! Subcommand implementations.
//!
//! Each command writes to the given sink so tests can capture output.

use std::io::Write;

use dsv_grammar::{Parser, Tree};
use dsv_scanner::Dialect;
use tracing::debug;

use crate::CliError;

/// Print the S-expression of the syntax tree.
pub fn parse_source(source: &str, dialect: Dialect, out: &mut impl Write) -> Result<bool, CliError> {
    let tree = parse(source, dialect);
    writeln!(out, "{}", tree.to_sexp())?;
    Ok(!tree.has_error())
}

/// Print diagnostics, one per line. Returns `true` when there are none.
pub fn check_source(
    source: &str,
    dialect: Dialect,
    label: &str,
    out: &mut impl Write,
) -> Result<bool, CliError> {
    let tree = parse(source, dialect);
    for error in tree.errors() {
        writeln!(out, "{label}:{}: error: {error}", error.span())?;
    }
    if tree.errors().is_empty() {
        writeln!(out, "{label}: {} rows, no errors", tree.rows().len())?;
    }
    Ok(tree.errors().is_empty())
}

/// Print each row's decoded field values.
pub fn fields_source(source: &str, dialect: Dialect, out: &mut impl Write) -> Result<bool, CliError> {
    let tree = parse(source, dialect);
    for record in tree.records(source) {
        writeln!(out, "{record:?}")?;
    }
    Ok(!tree.has_error())
}

fn parse(source: &str, dialect: Dialect) -> Tree {
    debug!(%dialect, bytes = source.len(), "parsing");
    Parser::new(dialect).parse(source)
}
