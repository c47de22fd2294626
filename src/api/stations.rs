//! Station endpoints: `POST /api/stations`, `GET /api/stations`.

use crate::catalog::{self, NewStation, Station};
use crate::error::AppError;
use crate::server::state::AppState;
use axum::{Json, extract::State, http::StatusCode};

/// Create a station.
pub async fn create_station(
    State(state): State<AppState>,
    Json(request): Json<NewStation>,
) -> Result<(StatusCode, Json<Station>), AppError> {
    let station = catalog::create_station(&state.pool, &request).await?;
    Ok((StatusCode::CREATED, Json(station)))
}

/// List all stations.
pub async fn list_stations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Station>>, AppError> {
    Ok(Json(catalog::list_stations(&state.pool).await?))
}
