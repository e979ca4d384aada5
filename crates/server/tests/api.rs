//! Router-level tests: JSON in, JSON out, status codes per the contract.
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use migration::MigratorTrait;
use sea_orm::Database;
use serde_json::{Value, json};
use server::ServerState;
use store::DbStore;
use tower::ServiceExt;

async fn app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    server::router(ServerState {
        store: Arc::new(DbStore::new(db)),
    })
}

async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    let request = match body {
        Some(body) => builder
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn register(app: &Router, pin: &str) -> Value {
    let (status, body) = request(
        app,
        "POST",
        "/api/auth/register",
        Some(json!({ "pin": pin })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["user"].clone()
}

async fn create_tracker(app: &Router, user_id: &str, name: &str) -> Value {
    let (status, body) = request(
        app,
        "POST",
        "/api/trackers",
        Some(json!({ "userId": user_id, "name": name, "currency": "USD" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}

#[tokio::test]
async fn register_then_login_round_trips_the_pin() {
    let app = app().await;

    let user = register(&app, "1234").await;
    assert_eq!(user["pin"], "1234");
    assert_eq!(user["preferredCurrency"], "USD");

    let (status, body) = request(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "pin": "1234" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], user["id"]);
}

#[tokio::test]
async fn duplicate_pin_registration_conflicts() {
    let app = app().await;
    register(&app, "1234").await;

    let (status, _) = request(
        &app,
        "POST",
        "/api/auth/register",
        Some(json!({ "pin": "1234" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn malformed_pin_is_a_client_error() {
    let app = app().await;

    let (status, _) = request(
        &app,
        "POST",
        "/api/auth/register",
        Some(json!({ "pin": "12" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = request(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "pin": "not4" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_pin_login_is_unauthorized() {
    let app = app().await;

    let (status, _) = request(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "pin": "0000" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn tracker_lifecycle() {
    let app = app().await;
    let user = register(&app, "1234").await;
    let user_id = user["id"].as_str().unwrap();

    let tracker = create_tracker(&app, user_id, "Groceries").await;
    assert_eq!(tracker["name"], "Groceries");

    let (status, listed) =
        request(&app, "GET", &format!("/api/trackers?userId={user_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let tracker_id = tracker["id"].as_str().unwrap();
    let (status, body) =
        request(&app, "DELETE", &format!("/api/trackers/{tracker_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, listed) =
        request(&app, "GET", &format!("/api/trackers?userId={user_id}"), None).await;
    assert!(listed.as_array().unwrap().is_empty());

    let (status, _) =
        request(&app, "DELETE", &format!("/api/trackers/{tracker_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn expense_against_a_missing_tracker_is_not_found() {
    let app = app().await;
    register(&app, "1234").await;

    let (status, _) = request(
        &app,
        "POST",
        "/api/expenses",
        Some(json!({
            "trackerId": uuid::Uuid::new_v4().to_string(),
            "amount": 10.0,
            "category": "Food",
            "date": "2024-03-01"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn summary_reports_exact_totals_sorted_descending() {
    let app = app().await;
    let user = register(&app, "1234").await;
    let tracker = create_tracker(&app, user["id"].as_str().unwrap(), "Groceries").await;
    let tracker_id = tracker["id"].as_str().unwrap();

    for (amount, category) in [(10.50, "Food"), (5.25, "Food"), (3.00, "Transport")] {
        let (status, _) = request(
            &app,
            "POST",
            "/api/expenses",
            Some(json!({
                "trackerId": tracker_id,
                "amount": amount,
                "category": category,
                "date": "2024-03-01"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = request(
        &app,
        "GET",
        &format!("/api/summary?trackerId={tracker_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["grandTotal"], json!(18.75));
    let entries = body["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["category"], "Food");
    assert_eq!(entries[0]["total"], json!(15.75));
    assert_eq!(entries[1]["category"], "Transport");
    assert_eq!(entries[1]["total"], json!(3.0));
}

#[tokio::test]
async fn expense_validation_is_a_client_error() {
    let app = app().await;
    let user = register(&app, "1234").await;
    let tracker = create_tracker(&app, user["id"].as_str().unwrap(), "Groceries").await;
    let tracker_id = tracker["id"].as_str().unwrap();

    for payload in [
        json!({ "trackerId": tracker_id, "amount": -1.0, "category": "Food", "date": "2024-03-01" }),
        json!({ "trackerId": tracker_id, "amount": 1.0, "category": "", "date": "2024-03-01" }),
        json!({ "trackerId": tracker_id, "amount": 1.0, "category": "Food", "date": "bad" }),
    ] {
        let (status, _) = request(&app, "POST", "/api/expenses", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
