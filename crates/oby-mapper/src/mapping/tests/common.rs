use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::mapping::domain::{
    CaseRecord, ClientDetails, FamilyTreeData, FamilyTreeMember, FamilyTreeRecord,
};
use crate::mapping::repository::{CaseDataSource, RepositoryError};
use crate::mapping::ObyMapper;
use crate::schema::ObySchema;

pub(super) const USER_ID: &str = "user-42";
pub(super) const CASE_ID: &str = "PL-2024-0042";

pub(super) fn case_record(collected: u32, required: u32) -> CaseRecord {
    CaseRecord {
        case_id: CASE_ID.to_string(),
        user_id: USER_ID.to_string(),
        current_phase: Some("document_collection".to_string()),
        overall_progress: Some(35),
        documents_collected: Some(collected),
        documents_required: Some(required),
        documents_verified: Some(0),
    }
}

pub(super) fn client() -> ClientDetails {
    ClientDetails {
        user_id: USER_ID.to_string(),
        first_name: Some("Anna".to_string()),
        last_name: Some("Kowalska".to_string()),
        birth_date: Some("1988-04-02".to_string()),
        birth_place: Some("Chicago, Illinois, USA".to_string()),
        nationality: Some("American".to_string()),
        passport_number: Some("567123498".to_string()),
        marital_status: Some("Married".to_string()),
        occupation: Some("Architect".to_string()),
        email: Some("anna.kowalska@example.com".to_string()),
        phone: Some("+1 312 555 0142".to_string()),
        address: Some("1200 W Division St".to_string()),
        city: Some("Chicago".to_string()),
        postal_code: Some("60622".to_string()),
        country: Some("USA".to_string()),
        ..ClientDetails::default()
    }
}

pub(super) fn member(first_name: &str, last_name: &str) -> FamilyTreeMember {
    FamilyTreeMember {
        first_name: Some(first_name.to_string()),
        last_name: Some(last_name.to_string()),
        ..FamilyTreeMember::default()
    }
}

pub(super) fn polish_member(first_name: &str, last_name: &str) -> FamilyTreeMember {
    FamilyTreeMember {
        polish_citizen: Some(true),
        birth_place: Some("Rzeszow, Poland".to_string()),
        ..member(first_name, last_name)
    }
}

/// Applicant plus one Polish parent; the second parent and both grandparents are unknown.
pub(super) fn minimal_tree() -> FamilyTreeData {
    FamilyTreeData {
        applicant: Some(FamilyTreeMember {
            birth_date: Some("1988-04-02".to_string()),
            birth_place: Some("Chicago, USA".to_string()),
            ..member("Anna", "Kowalska")
        }),
        parent1: Some(polish_member("Jan", "Kowalski")),
        ..FamilyTreeData::default()
    }
}

pub(super) fn is_populated(value: &Value) -> bool {
    match value {
        Value::String(text) => !text.is_empty(),
        Value::Bool(flag) => *flag,
        Value::Null => false,
        _ => true,
    }
}

#[derive(Default)]
pub(super) struct MemorySource {
    cases: Mutex<HashMap<String, CaseRecord>>,
    clients: Mutex<HashMap<String, ClientDetails>>,
    trees: Mutex<HashMap<String, FamilyTreeRecord>>,
}

impl MemorySource {
    pub(super) fn with_case(self, case: CaseRecord) -> Self {
        self.cases
            .lock()
            .expect("case mutex poisoned")
            .insert(case.case_id.clone(), case);
        self
    }

    pub(super) fn with_client(self, client: ClientDetails) -> Self {
        self.clients
            .lock()
            .expect("client mutex poisoned")
            .insert(client.user_id.clone(), client);
        self
    }

    pub(super) fn with_tree(self, tree_data: FamilyTreeData) -> Self {
        self.trees.lock().expect("tree mutex poisoned").insert(
            USER_ID.to_string(),
            FamilyTreeRecord {
                user_id: USER_ID.to_string(),
                tree_data,
            },
        );
        self
    }
}

#[async_trait]
impl CaseDataSource for MemorySource {
    async fn case_by_id(&self, case_id: &str) -> Result<Option<CaseRecord>, RepositoryError> {
        Ok(self
            .cases
            .lock()
            .expect("case mutex poisoned")
            .get(case_id)
            .cloned())
    }

    async fn client_details_by_user(
        &self,
        user_id: &str,
    ) -> Result<Option<ClientDetails>, RepositoryError> {
        Ok(self
            .clients
            .lock()
            .expect("client mutex poisoned")
            .get(user_id)
            .cloned())
    }

    async fn family_tree_by_user(
        &self,
        user_id: &str,
    ) -> Result<Option<FamilyTreeRecord>, RepositoryError> {
        Ok(self
            .trees
            .lock()
            .expect("tree mutex poisoned")
            .get(user_id)
            .cloned())
    }
}

/// Resolves the case but fails every per-user lookup.
pub(super) struct FlakyClientSource;

#[async_trait]
impl CaseDataSource for FlakyClientSource {
    async fn case_by_id(&self, _case_id: &str) -> Result<Option<CaseRecord>, RepositoryError> {
        Ok(Some(case_record(0, 12)))
    }

    async fn client_details_by_user(
        &self,
        _user_id: &str,
    ) -> Result<Option<ClientDetails>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn family_tree_by_user(
        &self,
        _user_id: &str,
    ) -> Result<Option<FamilyTreeRecord>, RepositoryError> {
        Ok(None)
    }
}

pub(super) fn mapper<S: CaseDataSource + 'static>(source: S) -> ObyMapper<S> {
    ObyMapper::new(
        Arc::new(source),
        ObySchema::bundled().expect("bundled schema compiles"),
    )
}
