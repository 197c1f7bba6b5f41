//! Per-entity field mappers. Each mapper is a pure function from source records
//! to one namespaced OBY section plus the completeness warnings it raised.

mod ancestors;
mod applicant;
mod client;
mod declarations;
mod documents;
mod lineage;

use serde_json::{Map, Value};

pub use ancestors::{map_grandparent, map_parent, AncestorSlot};
pub use applicant::{map_applicant, ApplicantProfile};
pub use client::{map_addresses, map_contact};
pub use declarations::map_declarations;
pub use documents::{map_documents, DEFAULT_DOCUMENTS_REQUIRED};
pub use lineage::{detect_claim, map_lineage, AncestorLine, ClaimGeneration, LineageClaim};

/// Flat `OBY-<PREFIX>-<ATTRIBUTE>` record for one section of the document.
pub type ObySection = Map<String, Value>;

/// A mapped section and the warnings produced while mapping it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionOutput {
    pub fields: ObySection,
    pub warnings: Vec<String>,
}

impl SectionOutput {
    fn new(fields: ObySection) -> Self {
        Self {
            fields,
            warnings: Vec::new(),
        }
    }

    fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

/// Writes keys under a fixed entity prefix, defaulting absent values.
struct SectionBuilder {
    prefix: &'static str,
    fields: ObySection,
}

impl SectionBuilder {
    fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            fields: ObySection::new(),
        }
    }

    fn key(&self, attribute: &str) -> String {
        format!("OBY-{}-{}", self.prefix, attribute)
    }

    fn text(&mut self, attribute: &str, value: Option<&str>) -> &mut Self {
        let key = self.key(attribute);
        self.fields
            .insert(key, Value::String(value.unwrap_or_default().to_string()));
        self
    }

    fn flag(&mut self, attribute: &str, value: bool) -> &mut Self {
        let key = self.key(attribute);
        self.fields.insert(key, Value::Bool(value));
        self
    }

    fn finish(&mut self) -> ObySection {
        std::mem::take(&mut self.fields)
    }
}

/// Source text treated as present only when non-empty.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.is_empty())
}
