//! # Validate Subcommand
//!
//! Checks payload files against one schema and prints a line per file:
//!
//! ```text
//! OK body.json
//! FAIL bad.json: weight: minimum value is 10
//! ```
//!
//! With `--json`, each file produces one JSON object per line instead.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Args;
use fitbyte_validator::{JsonValidator, ValidationMode, Violation, Violations};
use serde::Serialize;

/// Arguments for the `fitbyte validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Schema to validate against (e.g. `profile-update`).
    #[arg(long, short)]
    pub schema: String,

    /// Directory of extra `*.schema.json` / `*.schema.yaml` documents.
    #[arg(long, value_name = "DIR")]
    pub schema_dir: Option<PathBuf>,

    /// Report every failing field instead of stopping at the first.
    #[arg(long)]
    pub all: bool,

    /// Print one JSON result object per file.
    #[arg(long)]
    pub json: bool,

    /// Payload files to check. `-` reads standard input.
    #[arg(value_name = "FILE", required = true)]
    pub inputs: Vec<PathBuf>,
}

#[derive(Debug, Serialize)]
struct FileReport<'a> {
    path: String,
    valid: bool,
    violations: &'a [Violation],
}

/// Execute the validate subcommand, writing results to `out`.
///
/// Returns exit code: 0 if every payload is valid, 1 if any is not.
/// Operational failures are returned as errors.
pub fn run_validate(args: &ValidateArgs, out: &mut impl Write) -> Result<u8> {
    let registry = crate::load_registry(args.schema_dir.as_deref())?;
    let schema = registry.get(&args.schema).ok_or_else(|| {
        anyhow!(
            "unknown schema '{}' (available: {})",
            args.schema,
            registry.names().join(", ")
        )
    })?;

    let mode = if args.all {
        ValidationMode::CollectAll
    } else {
        ValidationMode::FailFast
    };
    let validator = JsonValidator::new(schema).with_mode(mode);

    let mut failed = 0usize;
    for input in &args.inputs {
        let bytes = read_input(input)?;
        let result = validator.validate_json(&bytes);
        if result.is_err() {
            failed += 1;
        }
        report(out, &display_name(input), &result, args.json)?;
    }

    tracing::info!(
        schema = %args.schema,
        total = args.inputs.len(),
        failed,
        "validation finished"
    );

    Ok(if failed > 0 { 1 } else { 0 })
}

fn display_name(input: &Path) -> String {
    if is_stdin(input) {
        "<stdin>".to_string()
    } else {
        input.display().to_string()
    }
}

fn is_stdin(input: &Path) -> bool {
    input.as_os_str() == "-"
}

fn read_input(input: &Path) -> Result<Vec<u8>> {
    if is_stdin(input) {
        let mut bytes = Vec::new();
        std::io::stdin()
            .read_to_end(&mut bytes)
            .context("failed to read standard input")?;
        return Ok(bytes);
    }
    std::fs::read(input).with_context(|| format!("failed to read {}", input.display()))
}

fn report(
    out: &mut impl Write,
    name: &str,
    result: &Result<(), Violations>,
    json: bool,
) -> Result<()> {
    if json {
        let violations = match result {
            Ok(()) => &[][..],
            Err(v) => v.as_slice(),
        };
        let line = serde_json::to_string(&FileReport {
            path: name.to_string(),
            valid: result.is_ok(),
            violations,
        })?;
        writeln!(out, "{line}")?;
        return Ok(());
    }

    match result {
        Ok(()) => writeln!(out, "OK {name}")?,
        Err(violations) => {
            for v in violations {
                writeln!(out, "FAIL {name}: {}: {}", v.field, v.message())?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitbyte_validator::ViolationKind;
    use serde_json::json;

    fn render(result: &Result<(), Violations>, json: bool) -> String {
        let mut out = Vec::new();
        report(&mut out, "body.json", result, json).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn below_min() -> Violations {
        Violations::from(Violation::new(
            "weight",
            ViolationKind::BelowMinimum { min: 10.0 },
            json!(9),
        ))
    }

    #[test]
    fn text_report_lines() {
        assert_eq!(render(&Ok(()), false), "OK body.json\n");
        assert_eq!(
            render(&Err(below_min()), false),
            "FAIL body.json: weight: minimum value is 10\n"
        );
    }

    #[test]
    fn json_report_line() {
        let line = render(&Err(below_min()), true);
        let parsed: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(parsed["path"], "body.json");
        assert_eq!(parsed["valid"], false);
        assert_eq!(
            parsed["violations"][0],
            json!({"field": "weight", "message": "minimum value is 10", "value": 9})
        );

        let ok: serde_json::Value = serde_json::from_str(render(&Ok(()), true).trim()).unwrap();
        assert_eq!(ok, json!({"path": "body.json", "valid": true, "violations": []}));
    }

    #[test]
    fn dash_means_stdin() {
        assert!(is_stdin(Path::new("-")));
        assert!(!is_stdin(Path::new("./-x")));
        assert_eq!(display_name(Path::new("-")), "<stdin>");
    }
}
