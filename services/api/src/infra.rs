use async_trait::async_trait;
use metrics_exporter_prometheus::PrometheusHandle;
use oby_mapper::config::MappingConfig;
use oby_mapper::error::AppError;
use oby_mapper::mapping::{
    CaseDataSource, CaseRecord, ClientDetails, FamilyTreeRecord, ObyMapper, RepositoryError,
};
use oby_mapper::schema::ObySchema;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

pub(crate) type CaseMapper = ObyMapper<InMemoryCaseStore>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) mapper: Arc<CaseMapper>,
}

/// Shape of the seed file consumed by `serve --seed` and `generate`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct SeedData {
    pub(crate) cases: Vec<CaseRecord>,
    pub(crate) clients: Vec<ClientDetails>,
    pub(crate) family_trees: Vec<FamilyTreeRecord>,
}

/// Read-only store built once from seed data.
#[derive(Default, Clone)]
pub(crate) struct InMemoryCaseStore {
    cases: Arc<HashMap<String, CaseRecord>>,
    clients: Arc<HashMap<String, ClientDetails>>,
    family_trees: Arc<HashMap<String, FamilyTreeRecord>>,
}

impl InMemoryCaseStore {
    pub(crate) fn from_seed(seed: SeedData) -> Self {
        Self {
            cases: Arc::new(
                seed.cases
                    .into_iter()
                    .map(|case| (case.case_id.clone(), case))
                    .collect(),
            ),
            clients: Arc::new(
                seed.clients
                    .into_iter()
                    .map(|client| (client.user_id.clone(), client))
                    .collect(),
            ),
            family_trees: Arc::new(
                seed.family_trees
                    .into_iter()
                    .map(|tree| (tree.user_id.clone(), tree))
                    .collect(),
            ),
        }
    }

    pub(crate) fn from_json_str(raw: &str) -> Result<Self, AppError> {
        let seed: SeedData = serde_json::from_str(raw).map_err(AppError::Seed)?;
        Ok(Self::from_seed(seed))
    }

    pub(crate) fn load(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)?;
        let store = Self::from_json_str(&raw)?;
        info!(
            seed = %path.display(),
            cases = store.case_count(),
            "case store seeded"
        );
        Ok(store)
    }

    pub(crate) fn case_count(&self) -> usize {
        self.cases.len()
    }
}

#[async_trait]
impl CaseDataSource for InMemoryCaseStore {
    async fn case_by_id(&self, case_id: &str) -> Result<Option<CaseRecord>, RepositoryError> {
        Ok(self.cases.get(case_id).cloned())
    }

    async fn client_details_by_user(
        &self,
        user_id: &str,
    ) -> Result<Option<ClientDetails>, RepositoryError> {
        Ok(self.clients.get(user_id).cloned())
    }

    async fn family_tree_by_user(
        &self,
        user_id: &str,
    ) -> Result<Option<FamilyTreeRecord>, RepositoryError> {
        Ok(self.family_trees.get(user_id).cloned())
    }
}

/// The schema named by `OBY_SCHEMA_PATH`, or the bundled one.
pub(crate) fn load_schema(config: &MappingConfig) -> Result<Arc<ObySchema>, AppError> {
    match &config.schema_path {
        Some(path) => {
            info!(schema = %path.display(), "loading OBY schema override");
            Ok(Arc::new(ObySchema::from_path(path)?))
        }
        None => Ok(ObySchema::bundled()?),
    }
}

pub(crate) fn build_mapper(
    store: InMemoryCaseStore,
    config: &MappingConfig,
) -> Result<CaseMapper, AppError> {
    Ok(ObyMapper::new(Arc::new(store), load_schema(config)?))
}
