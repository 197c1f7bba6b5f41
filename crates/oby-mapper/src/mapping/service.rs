use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use tracing::{debug, info, warn};

use super::document::{MappingResult, ObyDocument, ObyMeta};
use super::domain::{CaseRecord, ClientDetails, FamilyTreeData};
use super::repository::{CaseDataSource, RepositoryError};
use super::sections::{
    map_addresses, map_applicant, map_contact, map_declarations, map_documents, map_grandparent,
    map_lineage, map_parent, AncestorSlot, ObySection, SectionOutput,
};
use crate::schema::{ObySchema, SchemaError};

/// Entry point turning a case identifier into a validated OBY document.
pub struct ObyMapper<S> {
    source: Arc<S>,
    schema: Arc<ObySchema>,
}

impl<S> ObyMapper<S>
where
    S: CaseDataSource + 'static,
{
    pub fn new(source: Arc<S>, schema: Arc<ObySchema>) -> Self {
        Self { source, schema }
    }

    pub fn with_bundled_schema(source: Arc<S>) -> Result<Self, SchemaError> {
        Ok(Self::new(source, ObySchema::bundled()?))
    }

    pub fn schema(&self) -> &ObySchema {
        &self.schema
    }

    /// Loads the case, maps every section, and validates the result.
    ///
    /// Never fails: a missing case, schema violations, and data-source errors
    /// are all reported through the returned [`MappingResult`].
    pub async fn generate(&self, case_id: &str) -> MappingResult {
        debug!(case_id, "generating OBY document");
        match self.try_generate(case_id).await {
            Ok(result) => result,
            Err(err) => {
                warn!(case_id, error = %err, "OBY generation failed");
                MappingResult::failed(err)
            }
        }
    }

    async fn try_generate(&self, case_id: &str) -> Result<MappingResult, GenerationError> {
        let Some(case) = self.source.case_by_id(case_id).await? else {
            info!(case_id, "OBY generation requested for unknown case");
            return Ok(MappingResult::case_not_found(case_id));
        };

        let (client, family_tree) = tokio::try_join!(
            self.source.client_details_by_user(&case.user_id),
            self.source.family_tree_by_user(&case.user_id),
        )?;
        let tree = family_tree
            .map(|record| record.tree_data)
            .unwrap_or_default();

        let meta = ObyMeta {
            schema_version: self.schema.version().to_string(),
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            case_id: case_id.to_string(),
            client_id: case.user_id.clone(),
        };
        let (document, warnings) = assemble_document(meta, &case, client.as_ref(), &tree);

        let instance = document.to_value()?;
        let errors: Vec<String> = self
            .schema
            .validate(&instance)
            .iter()
            .map(ToString::to_string)
            .collect();

        if errors.is_empty() {
            info!(
                case_id,
                warnings = warnings.len(),
                "OBY document generated"
            );
            Ok(MappingResult::generated(document, warnings))
        } else {
            warn!(
                case_id,
                errors = errors.len(),
                warnings = warnings.len(),
                "OBY document failed schema validation"
            );
            Ok(MappingResult::invalid(document, errors, warnings))
        }
    }
}

/// Runs every section mapper in document order and concatenates their warnings.
pub fn assemble_document(
    meta: ObyMeta,
    case: &CaseRecord,
    client: Option<&ClientDetails>,
    tree: &FamilyTreeData,
) -> (ObyDocument, Vec<String>) {
    let mut warnings = Vec::new();
    if client.is_none() {
        warnings.push(format!("Missing client details for user {}", case.user_id));
    }

    let mut take = |output: SectionOutput| -> ObySection {
        warnings.extend(output.warnings);
        output.fields
    };

    let document = ObyDocument {
        meta,
        applicant: take(map_applicant(client, tree.applicant.as_ref())),
        parent1: take(map_parent(tree.parent1.as_ref(), AncestorSlot::Parent1)),
        parent2: take(map_parent(tree.parent2.as_ref(), AncestorSlot::Parent2)),
        grandparent1: take(map_grandparent(
            tree.grandparent1.as_ref(),
            AncestorSlot::Grandparent1,
        )),
        grandparent2: take(map_grandparent(
            tree.grandparent2.as_ref(),
            AncestorSlot::Grandparent2,
        )),
        lineage: take(map_lineage(tree)),
        contact: take(map_contact(client)),
        addresses: take(map_addresses(client)),
        documents: take(map_documents(case)),
        declarations: take(map_declarations()),
    };

    (document, warnings)
}

#[derive(Debug, thiserror::Error)]
enum GenerationError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("document could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),
}
