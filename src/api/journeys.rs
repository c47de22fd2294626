//! Journey endpoints: `POST /api/journeys`, `GET /api/journeys`,
//! `GET /api/journeys/:id`.
//!
//! Reads come in two shapes chosen by call-site intent: the list shape
//! renders related records as display strings and annotates availability;
//! the detail shape resolves the route, nests full crew records and lists
//! the taken seat addresses.

use crate::catalog::{self, Journey, NewJourney};
use crate::error::AppError;
use crate::queries;
use crate::queries::journeys::{JourneyDetail, JourneyListItem};
use crate::server::state::AppState;
use crate::types::JourneyId;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// Create a journey.
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:8080/api/journeys \
///   -H "Content-Type: application/json" \
///   -d '{
///     "route": 1,
///     "train": 1,
///     "departure_time": "2026-09-01T08:00:00Z",
///     "arrival_time": "2026-09-01T12:30:00Z",
///     "crew": [1, 2]
///   }'
/// ```
pub async fn create_journey(
    State(state): State<AppState>,
    Json(request): Json<NewJourney>,
) -> Result<(StatusCode, Json<Journey>), AppError> {
    let journey = catalog::create_journey(&state.pool, &request).await?;
    Ok((StatusCode::CREATED, Json(journey)))
}

/// List journeys in the compact shape, `tickets_available` included.
///
/// Availability for the whole result set is computed in one grouped query.
pub async fn list_journeys(
    State(state): State<AppState>,
) -> Result<Json<Vec<JourneyListItem>>, AppError> {
    let journeys = queries::list_journeys(&state.pool).await?;
    Ok(Json(journeys))
}

/// Get a journey in the resolved detail shape, taken seats included.
pub async fn get_journey(
    State(state): State<AppState>,
    Path(id): Path<JourneyId>,
) -> Result<Json<JourneyDetail>, AppError> {
    queries::journey_detail(&state.pool, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Journey", id))
}
