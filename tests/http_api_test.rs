//! HTTP API tests over the real router and a containerized Postgres.
//!
//! Run with: `cargo test --test http_api_test` (requires Docker).

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

mod common;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use common::{seed_journey, setup_test_db};
use serde_json::{Value, json};
use sqlx::PgPool;
use train_station::server::{AppState, build_router};
use train_station::types::JourneyId;
use uuid::Uuid;

fn test_server(pool: &PgPool) -> TestServer {
    TestServer::new(build_router(AppState::new(pool.clone()))).expect("build test server")
}

fn user_header() -> (HeaderName, HeaderValue) {
    let uuid = Uuid::new_v4().to_string();
    (
        HeaderName::from_static("x-user-id"),
        HeaderValue::from_str(&uuid).expect("uuid is a valid header value"),
    )
}

fn order_body(journey: JourneyId, seats: &[(i32, i32)]) -> Value {
    let tickets: Vec<Value> = seats
        .iter()
        .map(|(cargo, seat)| {
            json!({"cargo_number": cargo, "seat_number": seat, "journey": journey})
        })
        .collect();
    json!({ "tickets": tickets })
}

#[tokio::test]
async fn station_crud_roundtrip() {
    let (_container, pool) = setup_test_db().await;
    let server = test_server(&pool);

    let response = server
        .post("/api/stations")
        .json(&json!({"name": "Central", "latitude": 50.45, "longitude": 30.52}))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let created: Value = response.json();
    assert_eq!(created["name"], "Central");

    let response = server.get("/api/stations").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let stations: Value = response.json();
    assert_eq!(stations.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn order_creation_requires_identity() {
    let (_container, pool) = setup_test_db().await;
    let journey = seed_journey(&pool, 2, 3).await;
    let server = test_server(&pool);

    let response = server
        .post("/api/orders")
        .json(&order_body(journey, &[(1, 1)]))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn order_creation_echoes_the_created_order() {
    let (_container, pool) = setup_test_db().await;
    let journey = seed_journey(&pool, 2, 3).await;
    let server = test_server(&pool);
    let (name, value) = user_header();

    let response = server
        .post("/api/orders")
        .add_header(name, value)
        .json(&order_body(journey, &[(1, 1), (1, 2)]))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let order: Value = response.json();
    assert!(order["id"].is_number());
    assert!(order["created_at"].is_string());
    assert_eq!(order["tickets"].as_array().map(Vec::len), Some(2));
    assert_eq!(order["tickets"][0]["cargo_number"], 1);
    assert_eq!(order["tickets"][0]["journey"], json!(journey));
}

#[tokio::test]
async fn conflicting_order_reports_seat_taken() {
    let (_container, pool) = setup_test_db().await;
    let journey = seed_journey(&pool, 2, 3).await;
    let server = test_server(&pool);

    let (name, value) = user_header();
    let response = server
        .post("/api/orders")
        .add_header(name, value)
        .json(&order_body(journey, &[(1, 1)]))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let (name, value) = user_header();
    let response = server
        .post("/api/orders")
        .add_header(name, value)
        .json(&order_body(journey, &[(1, 1)]))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["code"], "SEAT_TAKEN");
    assert_eq!(body["errors"]["index"], 0);
    assert_eq!(body["errors"]["cargo_number"], 1);
}

#[tokio::test]
async fn empty_order_returns_empty_order_code() {
    let (_container, pool) = setup_test_db().await;
    seed_journey(&pool, 2, 3).await;
    let server = test_server(&pool);
    let (name, value) = user_header();

    let response = server
        .post("/api/orders")
        .add_header(name, value)
        .json(&json!({"tickets": []}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["code"], "EMPTY_ORDER");
}

#[tokio::test]
async fn invalid_seat_reports_field_errors() {
    let (_container, pool) = setup_test_db().await;
    let journey = seed_journey(&pool, 2, 3).await;
    let server = test_server(&pool);
    let (name, value) = user_header();

    let response = server
        .post("/api/orders")
        .add_header(name, value)
        .json(&order_body(journey, &[(5, 9)]))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["errors"]["index"], 0);
    assert_eq!(
        body["errors"]["fields"]["cargo_number"],
        "cargo_number must be between 1 and 2"
    );
    assert_eq!(
        body["errors"]["fields"]["seat_number"],
        "seat_number must be between 1 and 3"
    );
}

#[tokio::test]
async fn journey_list_and_detail_shapes() {
    let (_container, pool) = setup_test_db().await;
    let journey = seed_journey(&pool, 2, 3).await;
    let server = test_server(&pool);
    let (name, value) = user_header();

    let response = server
        .post("/api/orders")
        .add_header(name, value)
        .json(&order_body(journey, &[(2, 3)]))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let response = server.get("/api/journeys").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let list: Value = response.json();
    assert_eq!(list[0]["route"], "Central → Harbor");
    assert_eq!(list[0]["tickets_available"], 5);

    let response = server.get(&format!("/api/journeys/{journey}")).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let detail: Value = response.json();
    assert_eq!(detail["route"], "Central → Harbor");
    assert_eq!(
        detail["taken_seats"],
        json!([{"cargo_number": 2, "seat_number": 3}])
    );

    let response = server.get("/api/journeys/9999").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn order_listing_is_scoped_to_the_header_identity() {
    let (_container, pool) = setup_test_db().await;
    let journey = seed_journey(&pool, 2, 3).await;
    let server = test_server(&pool);

    let (name, value) = user_header();
    let response = server
        .post("/api/orders")
        .add_header(name.clone(), value.clone())
        .json(&order_body(journey, &[(1, 1)]))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let response = server.get("/api/orders").add_header(name, value).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let mine: Value = response.json();
    assert_eq!(mine.as_array().map(Vec::len), Some(1));

    let (other_name, other_value) = user_header();
    let response = server
        .get("/api/orders")
        .add_header(other_name, other_value)
        .await;
    let theirs: Value = response.json();
    assert_eq!(theirs.as_array().map(Vec::len), Some(0));
}
