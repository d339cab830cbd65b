use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;

use super::client::CompletionClient;
use super::documents::DocumentReviewRequest;
use super::error::AssistantError;
use super::service::AssistantService;
use crate::workflows::mortgage::PropertyDetails;

/// Router builder exposing the model-backed helper endpoints.
pub fn assistant_router<C>(service: Arc<AssistantService<C>>) -> Router
where
    C: CompletionClient + 'static,
{
    Router::new()
        .route(
            "/api/v1/assistant/property-estimate",
            post(estimate_handler::<C>),
        )
        .route(
            "/api/v1/assistant/document-review",
            post(document_review_handler::<C>),
        )
        .with_state(service)
}

pub(crate) async fn estimate_handler<C>(
    State(service): State<Arc<AssistantService<C>>>,
    Json(property): Json<PropertyDetails>,
) -> Response
where
    C: CompletionClient + 'static,
{
    match service.estimate_property(&property).await {
        Ok(estimate) => (StatusCode::OK, Json(estimate)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn document_review_handler<C>(
    State(service): State<Arc<AssistantService<C>>>,
    Json(review): Json<DocumentReviewRequest>,
) -> Response
where
    C: CompletionClient + 'static,
{
    match service.review_document(&review).await {
        Ok(validation) => {
            let check = validation.to_check();
            let payload = json!({
                "validation": validation,
                "check": check,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

fn error_response(err: AssistantError) -> Response {
    let status = err.status_code();
    let payload = json!({
        "error": err.to_string(),
        "kind": err.kind(),
    });
    (status, Json(payload)).into_response()
}
