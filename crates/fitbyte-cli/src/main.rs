//! # fitbyte CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fitbyte_cli::schemas::{run_schemas, SchemasArgs};
use fitbyte_cli::validate::{run_validate, ValidateArgs};

/// FitByte payload validation toolkit.
///
/// Checks JSON request bodies against the built-in FitByte schemas or
/// data-defined schema documents.
#[derive(Parser, Debug)]
#[command(name = "fitbyte", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate payload files against a schema.
    Validate(ValidateArgs),

    /// List registered schemas or show one.
    Schemas(SchemasArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level. Logs go to stderr so
    // stdout carries only results.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut stdout = std::io::stdout().lock();
    let result = match &cli.command {
        Commands::Validate(args) => run_validate(args, &mut stdout),
        Commands::Schemas(args) => run_schemas(args, &mut stdout),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_validate_flags() {
        let cli = Cli::try_parse_from([
            "fitbyte", "-vv", "validate", "--schema", "login", "--all", "--json", "a.json", "-",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.schema, "login");
        assert!(args.all && args.json);
        assert_eq!(args.inputs.len(), 2);
    }

    #[test]
    fn validate_requires_an_input() {
        assert!(Cli::try_parse_from(["fitbyte", "validate", "--schema", "login"]).is_err());
    }
}
