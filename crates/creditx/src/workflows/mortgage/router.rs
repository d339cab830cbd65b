use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{ApplicationDraft, ApplicationId, SectionUpdate};
use super::feasibility::{FeasibilityReport, FeasibilityShortfall};
use super::financials::FinancialSnapshot;
use super::repository::{ApplicationRepository, RepositoryError};
use super::service::{ApplicationServiceError, MortgageApplicationService};

/// Router builder exposing HTTP endpoints for the wizard backend and feasibility checks.
pub fn mortgage_router<R>(service: Arc<MortgageApplicationService<R>>) -> Router
where
    R: ApplicationRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/mortgage/feasibility",
            post(feasibility_handler::<R>),
        )
        .route("/api/v1/mortgage/applications", post(create_handler::<R>))
        .route(
            "/api/v1/mortgage/applications/:application_id",
            get(status_handler::<R>).delete(delete_handler::<R>),
        )
        .route(
            "/api/v1/mortgage/applications/:application_id/sections",
            put(section_handler::<R>),
        )
        .route(
            "/api/v1/mortgage/applications/:application_id/feasibility",
            post(evaluate_handler::<R>),
        )
        .with_state(service)
}

/// Body for saving one wizard section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionUpdateRequest {
    pub expected_version: u64,
    #[serde(flatten)]
    pub update: SectionUpdate,
}

/// Body for persisting an evaluation. An empty body skips the version check; a
/// non-empty body must parse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EvaluateRequest {
    #[serde(default)]
    pub expected_version: Option<u64>,
}

/// Evaluation response with the verdict, the eligibility flag and the explanation.
#[derive(Debug, Clone, Serialize)]
pub struct FeasibilityResponse {
    pub eligible: bool,
    pub summary: String,
    pub shortfalls: Vec<FeasibilityShortfall>,
    #[serde(flatten)]
    pub report: FeasibilityReport,
}

impl From<FeasibilityReport> for FeasibilityResponse {
    fn from(report: FeasibilityReport) -> Self {
        Self {
            eligible: report.is_eligible(),
            summary: report.summary(),
            shortfalls: report.shortfalls(),
            report,
        }
    }
}

pub(crate) async fn feasibility_handler<R>(
    State(service): State<Arc<MortgageApplicationService<R>>>,
    Json(snapshot): Json<FinancialSnapshot>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    let report = service.evaluate_snapshot(&snapshot);
    (StatusCode::OK, Json(FeasibilityResponse::from(report))).into_response()
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<MortgageApplicationService<R>>>,
    Json(draft): Json<ApplicationDraft>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    match service.create(draft) {
        Ok(record) => (StatusCode::CREATED, Json(record.status_view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<MortgageApplicationService<R>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    let id = ApplicationId(application_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn section_handler<R>(
    State(service): State<Arc<MortgageApplicationService<R>>>,
    Path(application_id): Path<String>,
    Json(request): Json<SectionUpdateRequest>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    let id = ApplicationId(application_id);
    match service.update_section(&id, request.expected_version, request.update) {
        Ok(record) => (StatusCode::OK, Json(record.status_view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn evaluate_handler<R>(
    State(service): State<Arc<MortgageApplicationService<R>>>,
    Path(application_id): Path<String>,
    body: Bytes,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    let id = ApplicationId(application_id);
    let expected_version = match parse_evaluate_body(&body) {
        Ok(request) => request.expected_version,
        Err(err) => {
            let payload = json!({ "error": format!("invalid evaluation body: {err}") });
            return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
        }
    };
    match service.evaluate(&id, expected_version) {
        Ok(report) => (StatusCode::OK, Json(FeasibilityResponse::from(report))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<MortgageApplicationService<R>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    let id = ApplicationId(application_id);
    match service.delete(&id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

fn parse_evaluate_body(body: &[u8]) -> Result<EvaluateRequest, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(EvaluateRequest::default());
    }
    serde_json::from_slice(body)
}

fn error_response(err: ApplicationServiceError) -> Response {
    let status = match &err {
        ApplicationServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ApplicationServiceError::Repository(
            RepositoryError::Conflict | RepositoryError::VersionConflict { .. },
        ) => StatusCode::CONFLICT,
        ApplicationServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": err.to_string() });
    (status, Json(payload)).into_response()
}
