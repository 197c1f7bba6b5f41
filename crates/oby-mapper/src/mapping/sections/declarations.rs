use serde_json::Value;

use super::{ObySection, SectionOutput};

const DECLARATION_KEYS: &[&str] = &[
    "OBY-DECL-ACCURACY",
    "OBY-DECL-ALLEGIANCE",
    "OBY-DECL-NO-TERRORISM",
    "OBY-DECL-NO-TREASON",
    "OBY-DECL-OATH-WILLINGNESS",
];

/// Legal attestations. Every flag starts `false` and is only ever set by the
/// applicant's own confirmation, never by this mapper.
pub fn map_declarations() -> SectionOutput {
    let fields: ObySection = DECLARATION_KEYS
        .iter()
        .map(|key| (key.to_string(), Value::Bool(false)))
        .collect();
    SectionOutput::new(fields)
}
