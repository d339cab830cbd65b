use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use creditx::workflows::assistant::{assistant_router, AssistantService, CompletionClient};
use creditx::workflows::mortgage::{
    mortgage_router, ApplicationRepository, MortgageApplicationService,
};
use serde_json::json;
use std::sync::Arc;

/// Mortgage and assistant endpoints plus the operational probes.
pub(crate) fn with_application_routes<R, C>(
    mortgage: Arc<MortgageApplicationService<R>>,
    assistant: Arc<AssistantService<C>>,
) -> Router
where
    R: ApplicationRepository + 'static,
    C: CompletionClient + 'static,
{
    mortgage_router(mortgage)
        .merge(assistant_router(assistant))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let (status, label) = if ready {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "initializing")
    };

    (status, Json(json!({ "status": label })))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
