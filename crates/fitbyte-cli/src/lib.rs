//! # fitbyte-cli: Command-Line Payload Validation
//!
//! Provides the `fitbyte` command-line interface over the validation engine,
//! for checking captured request bodies offline and for authoring schema
//! documents.
//!
//! ## Subcommands
//!
//! - `fitbyte validate`: check payload files (or stdin) against a schema.
//! - `fitbyte schemas`: list registered schemas, or print one as JSON.
//!
//! ```bash
//! fitbyte validate --schema profile-update body.json
//! fitbyte validate --schema water-log --schema-dir schemas/ --all --json a.json b.json
//! cat body.json | fitbyte validate --schema login -
//! fitbyte schemas show activity-create
//! ```
//!
//! ## Exit Codes
//!
//! `0` every payload valid, `1` at least one violation, `2` operational error
//! (unreadable file, unknown schema, bad schema document).

pub mod schemas;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use fitbyte_validator::SchemaRegistry;

/// Built-in schemas plus any documents found in `schema_dir`.
pub fn load_registry(schema_dir: Option<&Path>) -> Result<SchemaRegistry> {
    let mut registry = SchemaRegistry::builtin();
    if let Some(dir) = schema_dir {
        let added = registry
            .load_dir(dir)
            .with_context(|| format!("failed to load schemas from {}", dir.display()))?;
        tracing::info!(dir = %dir.display(), added, "loaded schema documents");
    }
    Ok(registry)
}
