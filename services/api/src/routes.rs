use crate::infra::AppState;
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use oby_mapper::mapping::{MappingOutcome, MappingResult};
use serde_json::json;
use tracing::info;

pub(crate) fn oby_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/oby-schema", get(schema_endpoint))
        .route("/api/cases/:case_id/oby-json", post(generate_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn schema_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    Json(state.mapper.schema().document().clone())
}

pub(crate) async fn generate_endpoint(
    Path(case_id): Path<String>,
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<MappingResult>) {
    let result = state.mapper.generate(&case_id).await;
    let status = status_for(result.outcome);
    info!(%case_id, status = status.as_u16(), "OBY JSON request served");
    (status, Json(result))
}

fn status_for(outcome: MappingOutcome) -> StatusCode {
    match outcome {
        MappingOutcome::Generated => StatusCode::OK,
        MappingOutcome::CaseNotFound => StatusCode::NOT_FOUND,
        MappingOutcome::Invalid => StatusCode::UNPROCESSABLE_ENTITY,
        MappingOutcome::Failed => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{build_mapper, InMemoryCaseStore};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use oby_mapper::config::MappingConfig;
    use oby_mapper::schema::ObySchema;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    const SEED: &str = r#"{
        "cases": [
            { "caseId": "PL-1", "userId": "u-1", "documentsCollected": 12, "documentsRequired": 12 },
            { "caseId": "PL-2", "userId": "u-2" }
        ],
        "clients": [
            {
                "userId": "u-1",
                "firstName": "Marek",
                "lastName": "Zielinski",
                "birthDate": "1990-07-19",
                "birthPlace": "Sydney, Australia",
                "email": "marek@example.com"
            }
        ],
        "familyTrees": [
            {
                "userId": "u-1",
                "treeData": {
                    "parent1": { "firstName": "Piotr", "lastName": "Zielinski", "polishCitizen": true },
                    "parent2": { "firstName": "Maria", "lastName": "Zielinska" },
                    "grandparent1": { "firstName": "Adam", "lastName": "Zielinski" },
                    "grandparent2": { "firstName": "Zofia", "lastName": "Nowak" }
                }
            },
            {
                "userId": "u-2",
                "treeData": { "applicant": { "firstName": "Ola", "birthDate": "15/03/1950" } }
            }
        ]
    }"#;

    fn app(ready: bool) -> Router {
        app_with(ready, &MappingConfig::default())
    }

    fn app_with(ready: bool, config: &MappingConfig) -> Router {
        let store = InMemoryCaseStore::from_json_str(SEED).expect("seed parses");
        let mapper = build_mapper(store, config).expect("mapper builds");
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            mapper: Arc::new(mapper),
        };
        oby_routes().layer(Extension(state))
    }

    async fn send(router: Router, method: &str, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("request builds");
        let response = router.oneshot(request).await.expect("router responds");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body collects");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn complete_case_returns_ok() {
        let (status, body) = send(app(true), "POST", "/api/cases/PL-1/oby-json").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"]["applicant"]["OBY-A-GN"], json!("Marek"));
        assert_eq!(
            body["data"]["applicant"]["OBY-A-POB-COUNTRY"],
            json!("Australia")
        );
        assert_eq!(body["data"]["lineage"]["OBY-L-GENERATION"], json!("parent"));
        assert_eq!(body["warnings"], json!([]));
    }

    #[tokio::test]
    async fn unknown_case_returns_not_found() {
        let (status, body) = send(app(true), "POST", "/api/cases/PL-404/oby-json").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({ "success": false, "errors": ["Case with ID PL-404 not found"] })
        );
    }

    #[tokio::test]
    async fn schema_violations_return_unprocessable_entity() {
        let (status, body) = send(app(true), "POST", "/api/cases/PL-2/oby-json").await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], json!(false));
        assert!(body["data"].is_object());
        let errors = body["errors"].as_array().expect("errors listed");
        assert!(errors
            .iter()
            .filter_map(Value::as_str)
            .any(|error| error.starts_with("/applicant/OBY-A-DOB")));
    }

    #[tokio::test]
    async fn schema_endpoint_serves_active_schema() {
        let (status, body) = send(app(true), "GET", "/api/oby-schema").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["version"], json!("1.0.0"));
        assert!(body["required"]
            .as_array()
            .expect("required sections")
            .contains(&json!("declarations")));
    }

    /// Bundled schema re-versioned as `version`, written under `dir`.
    fn write_versioned_schema(dir: &std::path::Path, version: &str) -> std::path::PathBuf {
        let mut document = ObySchema::bundled()
            .expect("bundled schema")
            .document()
            .clone();
        document["version"] = json!(version);
        document["properties"]["_meta"]["properties"]["schemaVersion"]["const"] =
            json!(version);

        let path = dir.join("oby.schema.json");
        std::fs::write(&path, document.to_string()).expect("schema written");
        path
    }

    #[tokio::test]
    async fn schema_override_is_served_and_stamped() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = MappingConfig {
            schema_path: Some(write_versioned_schema(dir.path(), "1.1.0")),
            seed_path: None,
        };

        let (status, body) = send(app_with(true, &config), "GET", "/api/oby-schema").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["version"], json!("1.1.0"));

        let (status, body) = send(
            app_with(true, &config),
            "POST",
            "/api/cases/PL-1/oby-json",
        )
        .await;
        assert_eq!(status, StatusCode::OK, "body: {body}");
        assert_eq!(body["data"]["_meta"]["schemaVersion"], json!("1.1.0"));
    }

    #[tokio::test]
    async fn readiness_reflects_startup_flag() {
        let (status, body) = send(app(false), "GET", "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], json!("initializing"));

        let (status, _) = send(app(true), "GET", "/ready").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let (status, body) = send(app(false), "GET", "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[test]
    fn failures_map_to_server_errors() {
        assert_eq!(
            status_for(MappingOutcome::Failed),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(status_for(MappingOutcome::Generated), StatusCode::OK);
    }
}
