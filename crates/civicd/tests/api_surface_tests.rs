//! API Surface Tests
//!
//! Drives the full router in-process with `tower::ServiceExt::oneshot`:
//! authentication, the response envelope, and the marketplace flow as the
//! dashboards exercise it over HTTP.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use civicd::config::DaemonConfig;
use civicd::server::{app, AppState};

const CONFIG: &str = r#"
[[users]]
id = "cit-1"
name = "John Doe"
email = "john@civicconnect.test"
role = "citizen"
token = "tok-cit"

[[users]]
id = "adm-1"
name = "City Admin"
email = "admin@civicconnect.test"
role = "admin"
token = "tok-adm"

[[users]]
id = "off-1"
name = "Officer Raj"
email = "raj@civicconnect.test"
role = "officer"
token = "tok-off"

[[users]]
id = "ven-1"
name = "Vera"
email = "vera@civicconnect.test"
role = "vendor"
token = "tok-ven1"
business_name = "FixIt Co"
service_type = "repairs"

[[users]]
id = "ven-2"
name = "Quinn"
email = "quinn@civicconnect.test"
role = "vendor"
token = "tok-ven2"
business_name = "QuickFix Ltd"
service_type = "repairs"
verified = true
"#;

fn test_app() -> Router {
    let config: DaemonConfig = toml::from_str(CONFIG).unwrap();
    let directory = config.build_directory().unwrap();
    let engine = civic_common::DispatchEngine::new(directory);
    app(Arc::new(AppState::new(engine)))
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_health_needs_no_credential() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/v1/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_missing_bearer_is_rejected_with_envelope() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/api/complaints/my", None, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "forbidden");
}

#[tokio::test]
async fn test_unknown_token_is_rejected() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/api/complaints/my", Some("bogus"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");
}

#[tokio::test]
async fn test_admin_endpoints_reject_other_roles() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/api/admin/complaints", Some("tok-cit"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");
}

#[tokio::test]
async fn test_marketplace_flow_over_http() {
    let app = test_app();

    // Citizen files a complaint.
    let (status, body) = send(
        &app,
        "POST",
        "/api/complaints",
        Some("tok-cit"),
        Some(json!({
            "category": "Road Damage",
            "description": "Large pothole on Main Street",
            "location": "Main Street, Sector 4"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "Pending");
    assert_eq!(body["data"]["citizen_name"], "John Doe");
    let id = body["data"]["id"].as_str().unwrap().to_string();

    // Admin routes it to the marketplace.
    let (status, body) = send(
        &app,
        "POST",
        "/api/admin/route-private",
        Some("tok-adm"),
        Some(json!({ "complaint_id": id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "Awaiting Quotes");

    // Both vendors now see the job.
    let (_, body) = send(&app, "GET", "/api/vendor/jobs", Some("tok-ven1"), None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // Two bids land.
    for (token, price, eta) in [("tok-ven1", 50.0, "2 days"), ("tok-ven2", 40.0, "1 day")] {
        let (status, _) = send(
            &app,
            "POST",
            "/api/vendor/quote",
            Some(token),
            Some(json!({ "complaint_id": id, "price": price, "estimated_time": eta })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    // A second bid from the same vendor conflicts.
    let (status, body) = send(
        &app,
        "POST",
        "/api/vendor/quote",
        Some("tok-ven1"),
        Some(json!({ "complaint_id": id, "price": 45.0, "estimated_time": "1 day" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "duplicate_quote");

    // The owner sees both quotes; a vendor sees only its own.
    let uri = format!("/api/complaints/{}/quotes", id);
    let (_, body) = send(&app, "GET", &uri, Some("tok-cit"), None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    let (_, body) = send(&app, "GET", &uri, Some("tok-ven2"), None).await;
    let mine = body["data"].as_array().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["business_name"], "QuickFix Ltd");

    // Owner approves the cheaper bid.
    let (status, body) = send(
        &app,
        "POST",
        "/api/citizen/approve-quote",
        Some("tok-cit"),
        Some(json!({ "complaint_id": id, "vendor_id": "ven-2" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "In Progress");
    assert_eq!(body["data"]["vendor_id"], "ven-2");

    // The losing vendor cannot resolve it.
    let (status, body) = send(
        &app,
        "POST",
        "/api/officer/update-status",
        Some("tok-ven1"),
        Some(json!({ "id": id, "status": "Resolved" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");

    // The bound vendor can.
    let (status, body) = send(
        &app,
        "POST",
        "/api/officer/update-status",
        Some("tok-ven2"),
        Some(json!({
            "id": id,
            "status": "Resolved",
            "resolution_notes": "pothole filled",
            "proof_notes": "photos attached"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "Resolved");
    assert_eq!(body["data"]["resolution_notes"], "pothole filled");
}

#[tokio::test]
async fn test_government_flow_and_double_route_conflict() {
    let app = test_app();

    let (_, body) = send(
        &app,
        "POST",
        "/api/complaints",
        Some("tok-cit"),
        Some(json!({
            "category": "Street Light",
            "description": "Flickering constantly",
            "location": "Avenue 5"
        })),
    )
    .await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "POST",
        "/api/admin/assign",
        Some("tok-adm"),
        Some(json!({ "complaint_id": id, "officer_id": "off-1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "In Progress");
    assert_eq!(body["data"]["officer_name"], "Officer Raj");

    // Re-routing the same complaint conflicts and keeps the binding.
    let (status, body) = send(
        &app,
        "POST",
        "/api/admin/route-private",
        Some("tok-adm"),
        Some(json!({ "complaint_id": id })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "invalid_transition");

    let (_, body) = send(&app, "GET", "/api/officer/assigned", Some("tok-off"), None).await;
    let assigned = body["data"].as_array().unwrap();
    assert_eq!(assigned.len(), 1);
    assert_eq!(assigned[0]["id"], id.as_str());
}

#[tokio::test]
async fn test_profile_and_vendor_verification() {
    let app = test_app();

    let (_, body) = send(&app, "GET", "/api/profile", Some("tok-ven1"), None).await;
    assert_eq!(body["data"]["business_name"], "FixIt Co");
    assert_eq!(body["data"]["verified"], false);

    let (status, body) = send(
        &app,
        "POST",
        "/api/admin/verify-vendor",
        Some("tok-adm"),
        Some(json!({ "vendor_id": "ven-1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["verified"], true);

    let (status, body) = send(
        &app,
        "POST",
        "/api/profile",
        Some("tok-cit"),
        Some(json!({ "name": "John Q. Doe", "phone": "555-0100" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "John Q. Doe");
    assert_eq!(body["data"]["phone"], "555-0100");
}
