use super::common::*;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::mortgage::router::status_handler;
use crate::workflows::mortgage::MortgageApplicationService;

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("encode body")))
        .expect("request builds")
}

#[tokio::test]
async fn stateless_feasibility_route_returns_verdict_and_figures() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/mortgage/feasibility",
            json!({
                "propertyPrice": 800000,
                "liquidAssets": "160000",
                "employmentIncomes": [{ "grossAnnualIncome": 150000 }],
                "donation": "unknown"
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["eligible"], json!(true));
    assert_eq!(payload["verdict"]["sufficientIncome"], json!(true));
    assert_eq!(payload["verdict"]["meetsTwentyPercentEquity"], json!(true));
    assert_eq!(payload["verdict"]["meetsTenPercentHardEquity"], json!(true));
    assert!(payload["figures"]["totalCharge"].is_string());
    assert_eq!(payload["shortfalls"], json!([]));
}

#[tokio::test]
async fn wizard_flow_over_http_persists_verdict() {
    let (service, repository) = build_service();
    let router = router_with_service(service);

    let created = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/mortgage/applications",
            json!({ "applicants": [{
                "firstName": "Lea",
                "lastName": "Muster",
                "email": "lea.muster@example.ch"
            }] }),
        ))
        .await
        .expect("create executes");
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = read_json_body(created).await;
    let id = created["applicationId"]
        .as_str()
        .expect("application id")
        .to_string();
    assert_eq!(created["currentStep"], json!("financials"));

    let saved = router
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/mortgage/applications/{id}/sections"),
            json!({
                "expectedVersion": 1,
                "section": "financials",
                "financials": {
                    "propertyPrice": 800000,
                    "liquidAssets": 80000,
                    "employmentIncomes": [{ "grossAnnualIncome": 150000 }]
                }
            }),
        ))
        .await
        .expect("section executes");
    assert_eq!(saved.status(), StatusCode::OK);
    assert_eq!(read_json_body(saved).await["version"], json!(2));

    let evaluated = router
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/v1/mortgage/applications/{id}/feasibility"),
            json!({ "expectedVersion": 2 }),
        ))
        .await
        .expect("evaluate executes");
    assert_eq!(evaluated.status(), StatusCode::OK);
    let evaluated = read_json_body(evaluated).await;
    assert_eq!(evaluated["eligible"], json!(false));
    assert_eq!(evaluated["shortfalls"][0]["rule"], json!("insufficient_income"));

    let stored = repository
        .records
        .lock()
        .expect("repository mutex poisoned")
        .values()
        .next()
        .cloned()
        .expect("record stored");
    assert_eq!(stored.version, 3);
    assert_eq!(
        stored.feasibility.map(|verdict| verdict.meets_twenty_percent_equity),
        Some(false)
    );
}

#[tokio::test]
async fn stale_section_update_returns_conflict() {
    let (service, _) = build_service();
    let record = service.create(draft()).expect("application created");
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/mortgage/applications/{}/sections", record.application_id),
            json!({
                "expectedVersion": 7,
                "section": "property",
                "property": {
                    "street": "Seestrasse 12",
                    "postalCode": "8002",
                    "city": "Zürich",
                    "kind": "apartment"
                }
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("modified concurrently"));
}

#[tokio::test]
async fn evaluate_without_body_skips_version_check() {
    let (service, _) = build_service();
    let record = service.create(draft()).expect("application created");
    let router = router_with_service(service);

    let response = router
        .oneshot(
            Request::post(format!(
                "/api/v1/mortgage/applications/{}/feasibility",
                record.application_id
            ))
            .body(Body::empty())
            .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn evaluate_with_stale_version_returns_conflict() {
    let (service, repository) = build_service();
    let record = service.create(draft()).expect("application created");
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            &format!("/api/v1/mortgage/applications/{}/feasibility", record.application_id),
            json!({ "expectedVersion": record.version + 1 }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let stored = repository
        .records
        .lock()
        .expect("repository mutex poisoned")
        .get(&record.application_id)
        .cloned()
        .expect("record stored");
    assert_eq!(stored.version, record.version);
    assert!(stored.feasibility.is_none());
}

#[tokio::test]
async fn evaluate_rejects_malformed_body_instead_of_skipping_version_check() {
    let (service, repository) = build_service();
    let record = service.create(draft()).expect("application created");
    let router = router_with_service(service);
    let uri = format!("/api/v1/mortgage/applications/{}/feasibility", record.application_id);

    for body in [
        json!({ "expectedVersion": "1" }),
        json!({ "expected_version": 1 }),
        json!([1]),
    ] {
        let response = router
            .clone()
            .oneshot(json_request("POST", &uri, body.clone()))
            .await
            .expect("route executes");
        assert_eq!(
            response.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "body {body} must be rejected"
        );
        let payload = read_json_body(response).await;
        assert!(payload["error"].is_string());
    }

    let stored = repository
        .records
        .lock()
        .expect("repository mutex poisoned")
        .get(&record.application_id)
        .cloned()
        .expect("record stored");
    assert_eq!(stored.version, record.version);
}

#[tokio::test]
async fn empty_object_body_evaluates_without_version_check() {
    let (service, _) = build_service();
    let record = service.create(draft()).expect("application created");
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            &format!("/api/v1/mortgage/applications/{}/feasibility", record.application_id),
            json!({}),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn wire_format_uses_camel_case_keys() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let created = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/mortgage/applications",
            json!({ "applicants": [{
                "firstName": "Lea",
                "lastName": "Muster",
                "email": "lea.muster@example.ch",
                "employmentStatus": "employed"
            }] }),
        ))
        .await
        .expect("create executes");
    let created = read_json_body(created).await;
    assert!(created.get("application_id").is_none());
    assert!(created["completedSteps"].is_array());
    assert_eq!(created["readyForReview"], json!(false));
    let id = created["applicationId"].as_str().expect("application id");

    let fetched = router
        .clone()
        .oneshot(
            Request::get(format!("/api/v1/mortgage/applications/{id}"))
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("fetch executes");
    let fetched = read_json_body(fetched).await;
    assert_eq!(fetched["applicants"][0]["firstName"], json!("Lea"));
    assert_eq!(fetched["applicants"][0]["employmentStatus"], json!("employed"));
    assert!(fetched["createdAt"].is_string());
    assert!(fetched["wizard"]["currentStep"].is_string());

    let verdict = router
        .oneshot(json_request(
            "POST",
            "/api/v1/mortgage/feasibility",
            json!({
                "propertyPrice": 800000,
                "liquidAssets": 160000,
                "employmentIncomes": [{ "grossAnnualIncome": 60000 }]
            }),
        ))
        .await
        .expect("feasibility executes");
    let verdict = read_json_body(verdict).await;
    let shortfall = &verdict["shortfalls"][0];
    assert_eq!(shortfall["rule"], json!("insufficient_income"));
    assert!(shortfall["totalCharge"].is_string());
    assert!(shortfall["affordableCharge"].is_string());
    assert!(shortfall.get("total_charge").is_none());
}

#[tokio::test]
async fn status_handler_returns_not_found_for_unknown_application() {
    let (service, _) = build_service();

    let response = status_handler(State(Arc::new(service)), Path("app-unknown".to_string())).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn status_handler_maps_repository_outage_to_internal_error() {
    let service = Arc::new(MortgageApplicationService::new(Arc::new(
        UnavailableRepository,
    )));

    let response = status_handler(State(service), Path("app-000001".to_string())).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn delete_route_returns_no_content_then_not_found() {
    let (service, _) = build_service();
    let record = service.create(draft()).expect("application created");
    let router = router_with_service(service);
    let uri = format!("/api/v1/mortgage/applications/{}", record.application_id);

    let first = router
        .clone()
        .oneshot(Request::delete(&uri).body(Body::empty()).expect("request builds"))
        .await
        .expect("route executes");
    assert_eq!(first.status(), StatusCode::NO_CONTENT);

    let second = router
        .oneshot(Request::get(&uri).body(Body::empty()).expect("request builds"))
        .await
        .expect("route executes");
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
}
