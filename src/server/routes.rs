//! Router configuration for the booking service.

use super::health::{health_check, readiness_check};
use super::state::AppState;
use crate::api::{crews, journeys, orders, routes, stations, train_types, trains};
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// Reference-data CRUD, journey read shapes and the order write path live
/// under `/api`; health probes stay at the root, outside any auth concern.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Reference data
        .route("/stations", post(stations::create_station).get(stations::list_stations))
        .route("/crews", post(crews::create_crew).get(crews::list_crews))
        .route(
            "/train-types",
            post(train_types::create_train_type).get(train_types::list_train_types),
        )
        .route("/trains", post(trains::create_train).get(trains::list_trains))
        .route("/trains/:id", get(trains::get_train))
        .route("/routes", post(routes::create_route).get(routes::list_routes))
        // Journeys: write representation plus list/detail read shapes
        .route(
            "/journeys",
            post(journeys::create_journey).get(journeys::list_journeys),
        )
        .route("/journeys/:id", get(journeys::get_journey))
        // Orders: the transactional booking path (requires identity)
        .route("/orders", post(orders::create_order).get(orders::list_orders));

    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
