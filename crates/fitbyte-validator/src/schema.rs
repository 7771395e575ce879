//! # Schemas & Registry
//!
//! A [`Schema`] is an ordered list of uniquely named fields, each bound to
//! one [`Rule`]. Evaluation follows declaration order, which makes the
//! violation surfaced by fail-fast validation deterministic.
//!
//! The payload shapes accepted by the FitByte API are available through
//! [`SchemaId`]. Extra shapes can be loaded from `*.schema.json`,
//! `*.schema.yaml` or `*.schema.yml` documents into a [`SchemaRegistry`]:
//!
//! ```yaml
//! name: goal-create
//! fields:
//!   - name: target
//!     rule: { type: number, notNull: true, min: 1 }
//! ```
//!
//! Schemas are immutable after construction and shared through `Arc`.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::rule::Rule;

/// One named field of a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Field {
    pub name: String,
    pub rule: Rule,
}

/// Named, ordered mapping from field name to [`Rule`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Schema {
    name: String,
    fields: Vec<Field>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Declare a field. Re-declaring an existing name replaces its rule in
    /// place, keeping the original position.
    pub fn field(mut self, name: impl Into<String>, rule: Rule) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(existing) => existing.rule = rule,
            None => self.fields.push(Field { name, rule }),
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in evaluation order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Look up the rule for a field.
    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.rule)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Check field-name uniqueness and every rule's facets.
    ///
    /// Schemas built through [`Schema::field`] are unique by construction;
    /// deserialized documents are not.
    ///
    /// # Errors
    ///
    /// [`SchemaError::DuplicateField`] or [`SchemaError::InvalidRule`].
    pub fn check(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    schema: self.name.clone(),
                    field: field.name.clone(),
                });
            }
            field.rule.check().map_err(|source| SchemaError::InvalidRule {
                schema: self.name.clone(),
                field: field.name.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// Parse and check a JSON schema document.
    pub fn from_json_str(document: &str) -> Result<Self, SchemaError> {
        let schema: Self = serde_json::from_str(document).map_err(|e| SchemaError::Document {
            path: "<inline>".to_string(),
            reason: format!("invalid JSON: {e}"),
        })?;
        schema.check()?;
        Ok(schema)
    }

    /// Parse and check a YAML schema document.
    pub fn from_yaml_str(document: &str) -> Result<Self, SchemaError> {
        let schema: Self = serde_yaml::from_str(document).map_err(|e| SchemaError::Document {
            path: "<inline>".to_string(),
            reason: format!("invalid YAML: {e}"),
        })?;
        schema.check()?;
        Ok(schema)
    }

    /// Load a schema document from disk. The format is chosen by extension:
    /// `.yaml`/`.yml` are YAML, anything else is JSON.
    ///
    /// # Errors
    ///
    /// I/O failures, parse failures (tagged with the path) and rule checks.
    pub fn from_path(path: &Path) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path)?;
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == "yaml" || e == "yml");
        let parsed = if is_yaml {
            Self::from_yaml_str(&content)
        } else {
            Self::from_json_str(&content)
        };
        parsed.map_err(|e| match e {
            SchemaError::Document { reason, .. } => SchemaError::Document {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })
    }
}

/// Built-in payload shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaId {
    ProfileUpdate,
    ActivityCreate,
    ActivityUpdate,
    Login,
    Register,
}

impl SchemaId {
    pub const ALL: [SchemaId; 5] = [
        SchemaId::ProfileUpdate,
        SchemaId::ActivityCreate,
        SchemaId::ActivityUpdate,
        SchemaId::Login,
        SchemaId::Register,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProfileUpdate => "profile-update",
            Self::ActivityCreate => "activity-create",
            Self::ActivityUpdate => "activity-update",
            Self::Login => "login",
            Self::Register => "register",
        }
    }

    /// Build a fresh copy of this shape's schema.
    pub fn schema(&self) -> Schema {
        match self {
            Self::ProfileUpdate => profile_update(),
            Self::ActivityCreate => activity(self.as_str()),
            // Shares the create rules, so fields omitted from a partial
            // update are rejected as null.
            Self::ActivityUpdate => activity(self.as_str()),
            Self::Login | Self::Register => credentials(self.as_str()),
        }
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaId {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| SchemaError::UnknownSchema(s.to_string()))
    }
}

const ACTIVITY_TYPES: [&str; 10] = [
    "Walking",
    "Yoga",
    "Stretching",
    "Cycling",
    "Swimming",
    "Dancing",
    "Hiking",
    "Running",
    "HIIT",
    "JumpRope",
];

fn profile_update() -> Schema {
    Schema::new(SchemaId::ProfileUpdate.as_str())
        .field(
            "preference",
            Rule::string().not_null().one_of(["CARDIO", "WEIGHT"]),
        )
        .field("weightUnit", Rule::string().not_null().one_of(["KG", "LBS"]))
        .field("heightUnit", Rule::string().not_null().one_of(["CM", "INCH"]))
        .field("weight", Rule::number().not_null().min(10.0).max(1000.0))
        .field("height", Rule::number().not_null().min(3.0).max(250.0))
        .field("name", Rule::string().not_null().min_length(2).max_length(60))
        .field("imageUri", Rule::string().not_null().url())
}

fn activity(name: &str) -> Schema {
    Schema::new(name)
        .field("activityType", Rule::string().not_null().one_of(ACTIVITY_TYPES))
        .field("doneAt", Rule::string().not_null())
        .field("durationInMinutes", Rule::number().not_null().min(1.0))
}

fn credentials(name: &str) -> Schema {
    Schema::new(name)
        .field("email", Rule::string().not_null().email())
        .field("password", Rule::string().not_null().min_length(8).max_length(32))
}

/// Name → schema lookup shared by the API and CLI.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Arc<Schema>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every [`SchemaId`] shape.
    pub fn builtin() -> Self {
        let schemas = SchemaId::ALL
            .into_iter()
            .map(|id| (id.as_str().to_string(), Arc::new(id.schema())))
            .collect();
        Self { schemas }
    }

    /// Register a schema under its own name after checking it.
    ///
    /// # Errors
    ///
    /// [`SchemaError::DuplicateSchema`] if the name is taken, or any
    /// [`Schema::check`] failure.
    pub fn insert(&mut self, schema: Schema) -> Result<Arc<Schema>, SchemaError> {
        schema.check()?;
        if self.schemas.contains_key(schema.name()) {
            return Err(SchemaError::DuplicateSchema(schema.name().to_string()));
        }
        let schema = Arc::new(schema);
        self.schemas
            .insert(schema.name().to_string(), Arc::clone(&schema));
        Ok(schema)
    }

    /// Load every schema document in `dir` (non-recursive). Returns the
    /// number of schemas added.
    pub fn load_dir(&mut self, dir: impl AsRef<Path>) -> Result<usize, SchemaError> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir).map_err(|e| SchemaError::Document {
            path: dir.display().to_string(),
            reason: format!("cannot read schema directory: {e}"),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let is_schema = path.file_name().and_then(|n| n.to_str()).is_some_and(|n| {
                n.ends_with(".schema.json")
                    || n.ends_with(".schema.yaml")
                    || n.ends_with(".schema.yml")
            });
            if is_schema {
                paths.push(path);
            }
        }
        paths.sort();

        for path in &paths {
            let schema = Schema::from_path(path)?;
            tracing::debug!(
                schema = schema.name(),
                fields = schema.len(),
                path = %path.display(),
                "loaded schema document"
            );
            self.insert(schema)?;
        }
        Ok(paths.len())
    }

    pub fn get(&self, name: &str) -> Option<Arc<Schema>> {
        self.schemas.get(name).cloned()
    }

    /// Registered names, sorted alphabetically.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
