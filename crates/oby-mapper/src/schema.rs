//! The OBY JSON Schema and its compiled validator.
//!
//! The schema is the wire contract for downstream form filling. Mapping code
//! only sets values; shape, type, and format rules live in
//! `schemas/oby.schema.json` and are enforced here.

use std::fmt;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use jsonschema::error::ValidationErrorKind;
use jsonschema::Validator;
use serde_json::Value;

const BUNDLED_SCHEMA: &str = include_str!("../schemas/oby.schema.json");

static BUNDLED: OnceLock<Result<Arc<ObySchema>, String>> = OnceLock::new();

/// Compiled OBY schema. Read-only after construction and safe to share across
/// concurrent mapping runs.
pub struct ObySchema {
    document: Value,
    version: String,
    validator: Validator,
}

impl ObySchema {
    /// The schema shipped with the crate, compiled once per process.
    pub fn bundled() -> Result<Arc<Self>, SchemaError> {
        BUNDLED
            .get_or_init(|| {
                Self::from_json_str(BUNDLED_SCHEMA)
                    .map(Arc::new)
                    .map_err(|err| err.to_string())
            })
            .clone()
            .map_err(SchemaError::Bundled)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| SchemaError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, SchemaError> {
        let document: Value = serde_json::from_str(raw).map_err(SchemaError::Parse)?;
        Self::from_value(document)
    }

    pub fn from_value(document: Value) -> Result<Self, SchemaError> {
        let validator = jsonschema::options()
            .should_validate_formats(true)
            .build(&document)
            .map_err(|err| SchemaError::Compile(err.to_string()))?;

        let version = document
            .get("version")
            .and_then(Value::as_str)
            .filter(|version| !version.is_empty())
            .ok_or(SchemaError::MissingVersion)?
            .to_string();

        Ok(Self {
            document,
            version,
            validator,
        })
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Version stamped into `_meta.schemaVersion` of generated documents.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Collects every violation rather than stopping at the first.
    pub fn validate(&self, instance: &Value) -> Vec<SchemaViolation> {
        self.validator
            .iter_errors(instance)
            .map(|error| {
                let value = match error.kind {
                    ValidationErrorKind::Required { .. }
                    | ValidationErrorKind::AdditionalProperties { .. } => None,
                    _ => Some(error.instance.clone().into_owned()),
                };
                SchemaViolation {
                    path: error.instance_path.to_string(),
                    message: error.to_string(),
                    value,
                }
            })
            .collect()
    }
}

impl fmt::Debug for ObySchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObySchema")
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

/// One failed schema constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaViolation {
    /// JSON pointer to the offending field; empty for the document root.
    pub path: String,
    /// Validator message; quotes the offending value where there is one.
    pub message: String,
    /// Offending value. `None` when the failure concerns a missing or
    /// unexpected key of the object at `path`.
    pub value: Option<Value>,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "/" } else { &self.path };
        write!(f, "{path} {}", self.message)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("failed to read OBY schema from {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("OBY schema is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("OBY schema failed to compile: {0}")]
    Compile(String),
    #[error("bundled OBY schema is unusable: {0}")]
    Bundled(String),
    #[error("OBY schema has no top-level \"version\" keyword")]
    MissingVersion,
}
