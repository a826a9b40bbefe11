//! DSV CLI
//!
//! `dsv parse|check|fields <FILE> [--dialect csv|psv|tsv]`

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dsv_scanner::Dialect;
use dsvc::commands::{check_source, fields_source, parse_source};
use dsvc::{init_tracing, read_source, resolve_dialect, CliError};

#[derive(Parser)]
#[command(name = "dsv", version, about = "Parse comma-, pipe-, and tab-separated values")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the syntax tree as an S-expression.
    Parse(FileArgs),
    /// Report parse errors; exit non-zero if there are any.
    Check(FileArgs),
    /// Print the decoded field values of every row.
    Fields(FileArgs),
}

#[derive(clap::Args)]
struct FileArgs {
    /// Input file.
    file: PathBuf,
    /// Dialect: csv, psv, or tsv. Defaults to the file extension, then csv.
    #[arg(short, long)]
    dialect: Option<Dialect>,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}

fn run(command: Command) -> Result<bool, CliError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let ok = match command {
        Command::Parse(args) => {
            let (source, dialect) = load(&args)?;
            parse_source(&source, dialect, &mut out)?
        }
        Command::Check(args) => {
            let (source, dialect) = load(&args)?;
            let label = args.file.display().to_string();
            check_source(&source, dialect, &label, &mut out)?
        }
        Command::Fields(args) => {
            let (source, dialect) = load(&args)?;
            fields_source(&source, dialect, &mut out)?
        }
    };
    out.flush()?;
    Ok(ok)
}

fn load(args: &FileArgs) -> Result<(String, Dialect), CliError> {
    let source = read_source(&args.file)?;
    Ok((source, resolve_dialect(args.dialect, &args.file)))
}
