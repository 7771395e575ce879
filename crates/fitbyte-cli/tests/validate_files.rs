//! `fitbyte validate` against payload files on disk.

use std::fs;
use std::path::PathBuf;

use fitbyte_cli::validate::{run_validate, ValidateArgs};

const VALID_PROFILE: &str = r#"{"preference":"CARDIO","weightUnit":"KG","heightUnit":"CM","weight":70,"height":175,"name":"Jo","imageUri":"https://example.com/a.png"}"#;
const BAD_PROFILE: &str = r#"{"preference":"CARDIO","weightUnit":"KG","heightUnit":"CM","weight":9,"height":175,"name":"a","imageUri":"https://example.com/a.png"}"#;

fn args(schema: &str, inputs: Vec<PathBuf>) -> ValidateArgs {
    ValidateArgs {
        schema: schema.to_string(),
        schema_dir: None,
        all: false,
        json: false,
        inputs,
    }
}

fn run(args: &ValidateArgs) -> anyhow::Result<(u8, String)> {
    let mut out = Vec::new();
    let code = run_validate(args, &mut out)?;
    Ok((code, String::from_utf8(out)?))
}

#[test]
fn valid_files_exit_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ok.json");
    fs::write(&path, VALID_PROFILE).unwrap();

    let (code, out) = run(&args("profile-update", vec![path.clone()])).unwrap();
    assert_eq!(code, 0);
    assert_eq!(out, format!("OK {}\n", path.display()));
}

#[test]
fn any_violation_exits_one_and_reports_first_field() {
    let dir = tempfile::tempdir().unwrap();
    let ok = dir.path().join("ok.json");
    let bad = dir.path().join("bad.json");
    fs::write(&ok, VALID_PROFILE).unwrap();
    fs::write(&bad, BAD_PROFILE).unwrap();

    let (code, out) = run(&args("profile-update", vec![ok, bad.clone()])).unwrap();
    assert_eq!(code, 1);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[1],
        format!("FAIL {}: weight: minimum value is 10", bad.display())
    );
}

#[test]
fn all_flag_reports_every_failing_field() {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("bad.json");
    fs::write(&bad, BAD_PROFILE).unwrap();

    let mut args = args("profile-update", vec![bad]);
    args.all = true;
    let (code, out) = run(&args).unwrap();
    assert_eq!(code, 1);
    assert!(out.contains(": weight: minimum value is 10"));
    assert!(out.contains(": name: minimum length is 2"));
}

#[test]
fn malformed_file_is_a_root_violation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("array.json");
    fs::write(&path, "[]").unwrap();

    let mut args = args("login", vec![path]);
    args.json = true;
    let (code, out) = run(&args).unwrap();
    assert_eq!(code, 1);
    let report: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
    assert_eq!(report["violations"][0]["field"], "root");
    assert_eq!(report["violations"][0]["message"], "invalid JSON format");
}

#[test]
fn schema_dir_schemas_are_selectable() {
    let dir = tempfile::tempdir().unwrap();
    let schemas = dir.path().join("schemas");
    fs::create_dir(&schemas).unwrap();
    fs::write(
        schemas.join("goal.schema.json"),
        r#"{"name":"goal-create","fields":[{"name":"target","rule":{"type":"number","notNull":true,"max":100}}]}"#,
    )
    .unwrap();
    let payload = dir.path().join("goal.json");
    fs::write(&payload, r#"{"target": 150}"#).unwrap();

    let mut args = args("goal-create", vec![payload]);
    args.schema_dir = Some(schemas);
    let (code, out) = run(&args).unwrap();
    assert_eq!(code, 1);
    assert!(out.ends_with(": target: maximum value is 100\n"), "{out}");
}

#[test]
fn unknown_schema_is_an_operational_error() {
    let err = run(&args("goal-create", vec![PathBuf::from("x.json")])).unwrap_err();
    assert!(err.to_string().contains("unknown schema 'goal-create'"));
}

#[test]
fn unreadable_file_is_an_operational_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    let err = run(&args("login", vec![missing])).unwrap_err();
    assert!(err.to_string().contains("missing.json"));
}
