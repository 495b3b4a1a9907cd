use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use model_risk::registry::{registry_router, ModelInventory, RegistrationService};
use serde_json::json;

use crate::infra::AppState;

pub(crate) fn with_service_routes<R>(service: Arc<RegistrationService<R>>) -> axum::Router
where
    R: ModelInventory + 'static,
{
    registry_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
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

#[cfg(test)]
mod tests {
    use super::*;
    use model_risk::registry::{ScoringConfig, ScoringEngine};
    use tower::ServiceExt;

    use crate::infra::InMemoryInventory;

    fn router() -> axum::Router {
        let service = Arc::new(RegistrationService::new(
            Arc::new(InMemoryInventory::default()),
            ScoringEngine::new(ScoringConfig::builtin()),
        ));
        with_service_routes(service)
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let response = router()
            .oneshot(
                axum::http::Request::get("/health")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn registry_routes_are_mounted() {
        let response = router()
            .oneshot(
                axum::http::Request::get("/api/v1/scoring")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
    }
}
