use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{
    ModelId, RawRegistration, DEPLOYMENT_MODE_OPTIONS, DOMAIN_OPTIONS, MODEL_STAGE_OPTIONS,
    MODEL_TYPE_OPTIONS,
};
use super::export::{narrative_meets_minimum, NarrativeBundle, NARRATIVE_MIN_CHARS};
use super::normalizer::REQUIRED_FIELDS;
use super::repository::{InventoryError, ModelInventory};
use super::scoring::ScoringError;
use super::service::{RegistrationError, RegistrationService};

/// Router builder exposing HTTP endpoints for registration, assessment
/// retrieval, export, import, and scoring-config introspection.
pub fn registry_router<R>(service: Arc<RegistrationService<R>>) -> Router
where
    R: ModelInventory + 'static,
{
    Router::new()
        .route("/api/v1/models", post(register_handler::<R>))
        .route("/api/v1/models/import", post(import_handler::<R>))
        .route("/api/v1/models/:model_id", get(fetch_handler::<R>))
        .route(
            "/api/v1/models/:model_id/export",
            post(export_handler::<R>),
        )
        .route("/api/v1/scoring", get(scoring_config_handler::<R>))
        .route("/api/v1/vocabularies", get(vocabularies_handler))
        .with_state(service)
}

pub(crate) async fn register_handler<R>(
    State(service): State<Arc<RegistrationService<R>>>,
    axum::Json(raw): axum::Json<RawRegistration>,
) -> Response
where
    R: ModelInventory + 'static,
{
    match service.register(raw) {
        Ok(assessment) => (StatusCode::CREATED, axum::Json(assessment)).into_response(),
        Err(RegistrationError::Validation(error)) => {
            let payload = json!({
                "error": error.to_string(),
                "required_fields": REQUIRED_FIELDS,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(RegistrationError::Scoring(ScoringError::UnknownCategory { factor, level })) => {
            let payload = json!({
                "error": format!(
                    "level '{level}' is not in the scoring table for factor '{factor}'"
                ),
                "factor": factor.key(),
                "level": level,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn fetch_handler<R>(
    State(service): State<Arc<RegistrationService<R>>>,
    Path(model_id): Path<String>,
) -> Response
where
    R: ModelInventory + 'static,
{
    let id = ModelId(model_id);
    match service.fetch(&id) {
        Ok(entry) => (StatusCode::OK, axum::Json(entry)).into_response(),
        Err(RegistrationError::Inventory(InventoryError::NotFound)) => {
            let payload = json!({
                "error": "model not found",
                "model_id": id.0,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn export_handler<R>(
    State(service): State<Arc<RegistrationService<R>>>,
    Path(model_id): Path<String>,
    axum::Json(narratives): axum::Json<NarrativeBundle>,
) -> Response
where
    R: ModelInventory + 'static,
{
    if !narrative_meets_minimum(&narratives.owner_risk_narrative) {
        let payload = json!({
            "error": format!(
                "owner_risk_narrative must be at least {NARRATIVE_MIN_CHARS} characters"
            ),
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
    }

    let id = ModelId(model_id);
    match service.export(&id, narratives) {
        Ok(envelope) => (StatusCode::OK, axum::Json(envelope)).into_response(),
        Err(RegistrationError::Inventory(InventoryError::NotFound)) => {
            let payload = json!({
                "error": "model not found",
                "model_id": id.0,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn import_handler<R>(
    State(service): State<Arc<RegistrationService<R>>>,
    body: axum::body::Bytes,
) -> Response
where
    R: ModelInventory + 'static,
{
    match service.import(&body) {
        Ok(entry) => (StatusCode::OK, axum::Json(entry)).into_response(),
        Err(RegistrationError::Import(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

/// Expose the active scoring table, tier thresholds, and version so the form
/// layer renders its controlled vocabularies from the same source of truth
/// the engine scores against.
pub(crate) async fn scoring_config_handler<R>(
    State(service): State<Arc<RegistrationService<R>>>,
) -> Response
where
    R: ModelInventory + 'static,
{
    (StatusCode::OK, axum::Json(service.engine().config().clone())).into_response()
}

/// Fixed option lists for the descriptive (non-scored) selects. Risk-factor
/// vocabularies come from `/api/v1/scoring` since they are version-bound.
pub(crate) async fn vocabularies_handler() -> Response {
    let payload = json!({
        "domain": DOMAIN_OPTIONS,
        "model_type": MODEL_TYPE_OPTIONS,
        "deployment_mode": DEPLOYMENT_MODE_OPTIONS,
        "model_stage": MODEL_STAGE_OPTIONS,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

fn internal_error(error: RegistrationError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
