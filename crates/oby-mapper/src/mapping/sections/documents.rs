use serde_json::Value;

use super::{ObySection, SectionOutput};
use crate::mapping::domain::CaseRecord;

/// Requirement assumed when the case row carries none, matching the case table default.
pub const DEFAULT_DOCUMENTS_REQUIRED: u32 = 12;

// Document presence is inferred from the aggregate counter only.
// TODO: switch to per-document-type status once uploads are tracked by category.
const APPLICANT_DOCUMENTS_AFTER: u32 = 0;
const PARENT_DOCUMENTS_AFTER: u32 = 2;
const GRANDPARENT_DOCUMENTS_AFTER: u32 = 4;

pub fn map_documents(case: &CaseRecord) -> SectionOutput {
    let collected = case.documents_collected.unwrap_or(0);
    let required = case
        .documents_required
        .filter(|required| *required > 0)
        .unwrap_or(DEFAULT_DOCUMENTS_REQUIRED);

    let applicant_documents = collected > APPLICANT_DOCUMENTS_AFTER;

    let mut fields = ObySection::new();
    fields.insert(
        "OBY-DOC-BIRTH-CERT".to_string(),
        Value::Bool(applicant_documents),
    );
    fields.insert(
        "OBY-DOC-PASSPORT".to_string(),
        Value::Bool(applicant_documents),
    );
    fields.insert(
        "OBY-DOC-PARENT-BIRTH-CERT".to_string(),
        Value::Bool(collected > PARENT_DOCUMENTS_AFTER),
    );
    fields.insert(
        "OBY-DOC-GRANDPARENT-BIRTH-CERT".to_string(),
        Value::Bool(collected > GRANDPARENT_DOCUMENTS_AFTER),
    );

    let mut output = SectionOutput::new(fields);
    if collected < required {
        output.warn(format!(
            "Document collection incomplete: {collected}/{required}"
        ));
    }
    output
}
