//! Order endpoints: `POST /api/orders`, `GET /api/orders`.
//!
//! Both endpoints require the caller's identity (see [`crate::auth`]).
//! Order creation is all-or-nothing: the whole ticket batch commits in one
//! transaction or not at all, and failures name the offending request's
//! position in the batch.

use crate::auth::AuthUser;
use crate::booking::{self, Order, TicketRequest};
use crate::error::AppError;
use crate::queries;
use crate::server::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

/// Request body for creating an order.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    /// The seats to book, in order. Must be non-empty.
    pub tickets: Vec<TicketRequest>,
}

/// Create an order booking one or more seats.
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:8080/api/orders \
///   -H "X-User-Id: 550e8400-e29b-41d4-a716-446655440000" \
///   -H "Content-Type: application/json" \
///   -d '{
///     "tickets": [
///       {"cargo_number": 1, "seat_number": 1, "journey": 1},
///       {"cargo_number": 1, "seat_number": 2, "journey": 1}
///     ]
///   }'
/// ```
///
/// Success returns 201 with the materialized order. Validation failures
/// and seat conflicts return 400 with the failing batch position and a
/// field → message map; nothing is persisted in that case.
pub async fn create_order(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let order = booking::create_order(&state.pool, user, &request.tickets).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// List the caller's orders, tickets nested.
pub async fn list_orders(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Order>>, AppError> {
    let orders = queries::list_orders(&state.pool, user).await?;
    Ok(Json(orders))
}
