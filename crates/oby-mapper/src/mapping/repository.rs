use async_trait::async_trait;

use super::domain::{CaseRecord, ClientDetails, FamilyTreeRecord};

/// Read access to the three records a mapping run needs. Implemented by the
/// surrounding application's data store; the mapper never writes through it.
#[async_trait]
pub trait CaseDataSource: Send + Sync {
    async fn case_by_id(&self, case_id: &str) -> Result<Option<CaseRecord>, RepositoryError>;

    async fn client_details_by_user(
        &self,
        user_id: &str,
    ) -> Result<Option<ClientDetails>, RepositoryError>;

    async fn family_tree_by_user(
        &self,
        user_id: &str,
    ) -> Result<Option<FamilyTreeRecord>, RepositoryError>;
}

/// Error enumeration for data-store failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
