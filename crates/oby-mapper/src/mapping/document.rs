use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::sections::ObySection;

/// Provenance block written at the top of every generated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObyMeta {
    pub schema_version: String,
    pub generated_at: String,
    pub case_id: String,
    pub client_id: String,
}

/// Government-submission payload. Built fresh for each request and never
/// persisted by the mapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObyDocument {
    #[serde(rename = "_meta")]
    pub meta: ObyMeta,
    pub applicant: ObySection,
    pub parent1: ObySection,
    pub parent2: ObySection,
    pub grandparent1: ObySection,
    pub grandparent2: ObySection,
    pub lineage: ObySection,
    pub contact: ObySection,
    pub addresses: ObySection,
    pub documents: ObySection,
    pub declarations: ObySection,
}

impl ObyDocument {
    /// Named sections in document order, excluding `_meta`.
    pub fn sections(&self) -> [(&'static str, &ObySection); 10] {
        [
            ("applicant", &self.applicant),
            ("parent1", &self.parent1),
            ("parent2", &self.parent2),
            ("grandparent1", &self.grandparent1),
            ("grandparent2", &self.grandparent2),
            ("lineage", &self.lineage),
            ("contact", &self.contact),
            ("addresses", &self.addresses),
            ("documents", &self.documents),
            ("declarations", &self.declarations),
        ]
    }

    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// How a mapping run ended; lets callers choose a transport status without
/// parsing error strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MappingOutcome {
    #[default]
    Generated,
    Invalid,
    CaseNotFound,
    Failed,
}

/// Result contract of [`ObyMapper::generate`](super::ObyMapper::generate).
#[derive(Debug, Clone, Serialize)]
pub struct MappingResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ObyDocument>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,
    #[serde(skip)]
    pub outcome: MappingOutcome,
}

impl MappingResult {
    pub(crate) fn generated(document: ObyDocument, warnings: Vec<String>) -> Self {
        Self {
            success: true,
            data: Some(document),
            errors: Vec::new(),
            warnings: Some(warnings),
            outcome: MappingOutcome::Generated,
        }
    }

    pub(crate) fn invalid(
        document: ObyDocument,
        errors: Vec<String>,
        warnings: Vec<String>,
    ) -> Self {
        Self {
            success: false,
            data: Some(document),
            errors,
            warnings: Some(warnings),
            outcome: MappingOutcome::Invalid,
        }
    }

    pub(crate) fn case_not_found(case_id: &str) -> Self {
        Self::failure(
            format!("Case with ID {case_id} not found"),
            MappingOutcome::CaseNotFound,
        )
    }

    pub(crate) fn failed(reason: impl std::fmt::Display) -> Self {
        Self::failure(
            format!("Failed to generate OBY JSON: {reason}"),
            MappingOutcome::Failed,
        )
    }

    fn failure(error: String, outcome: MappingOutcome) -> Self {
        Self {
            success: false,
            data: None,
            errors: vec![error],
            warnings: None,
            outcome,
        }
    }

    pub fn warnings(&self) -> &[String] {
        self.warnings.as_deref().unwrap_or_default()
    }
}
