//! # Schemas Subcommand
//!
//! Lists the schema catalogue or prints one schema document as JSON, in the
//! same shape the loader accepts.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};

/// Arguments for the `fitbyte schemas` subcommand.
#[derive(Args, Debug)]
pub struct SchemasArgs {
    /// Directory of extra `*.schema.json` / `*.schema.yaml` documents.
    #[arg(long, value_name = "DIR", global = true)]
    pub schema_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<SchemasCommand>,
}

#[derive(Subcommand, Debug)]
pub enum SchemasCommand {
    /// Print a schema document as pretty JSON.
    Show {
        /// Schema name.
        name: String,
    },
}

/// Execute the schemas subcommand, writing to `out`.
pub fn run_schemas(args: &SchemasArgs, out: &mut impl Write) -> Result<u8> {
    let registry = crate::load_registry(args.schema_dir.as_deref())?;

    match &args.command {
        None => {
            for name in registry.names() {
                let fields = registry.get(name).map_or(0, |s| s.len());
                writeln!(out, "{name}\t{fields} fields")?;
            }
        }
        Some(SchemasCommand::Show { name }) => {
            let schema = registry
                .get(name)
                .ok_or_else(|| anyhow!("unknown schema '{name}'"))?;
            writeln!(out, "{}", serde_json::to_string_pretty(&*schema)?)?;
        }
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitbyte_validator::Schema;

    fn run(command: Option<SchemasCommand>) -> Result<String> {
        let args = SchemasArgs {
            schema_dir: None,
            command,
        };
        let mut out = Vec::new();
        run_schemas(&args, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn lists_builtin_schemas_in_order() {
        let listing = run(None).unwrap();
        let names: Vec<&str> = listing
            .lines()
            .map(|l| l.split('\t').next().unwrap())
            .collect();
        assert_eq!(
            names,
            vec![
                "activity-create",
                "activity-update",
                "login",
                "profile-update",
                "register"
            ]
        );
        assert!(listing.contains("profile-update\t7 fields"));
    }

    #[test]
    fn show_prints_a_loadable_document() {
        let printed = run(Some(SchemasCommand::Show {
            name: "login".to_string(),
        }))
        .unwrap();
        let schema = Schema::from_json_str(&printed).unwrap();
        assert_eq!(schema.name(), "login");
        assert_eq!(
            schema.field_names().collect::<Vec<_>>(),
            vec!["email", "password"]
        );
    }

    #[test]
    fn show_unknown_schema_is_an_error() {
        let err = run(Some(SchemasCommand::Show {
            name: "nope".to_string(),
        }))
        .unwrap_err();
        assert!(err.to_string().contains("nope"));
    }
}
