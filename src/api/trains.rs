//! Train endpoints: `POST /api/trains`, `GET /api/trains`,
//! `GET /api/trains/:id`.

use super::parse_id_list;
use crate::catalog::{self, NewTrain, Train};
use crate::error::AppError;
use crate::server::state::AppState;
use crate::types::TrainId;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

/// Query parameters for listing trains.
#[derive(Debug, Deserialize)]
pub struct ListTrainsQuery {
    /// Comma-separated train type ids to filter by.
    pub train_type: Option<String>,
}

/// Create a train.
pub async fn create_train(
    State(state): State<AppState>,
    Json(request): Json<NewTrain>,
) -> Result<(StatusCode, Json<Train>), AppError> {
    let train = catalog::create_train(&state.pool, &request).await?;
    Ok((StatusCode::CREATED, Json(train)))
}

/// List trains, optionally filtered by train type
/// (`?train_type=1,2`).
pub async fn list_trains(
    State(state): State<AppState>,
    Query(query): Query<ListTrainsQuery>,
) -> Result<Json<Vec<Train>>, AppError> {
    let filter = query
        .train_type
        .as_deref()
        .map(|raw| parse_id_list("train_type", raw))
        .transpose()?;

    let trains = catalog::list_trains(&state.pool, filter.as_deref()).await?;
    Ok(Json(trains))
}

/// Get a single train.
pub async fn get_train(
    State(state): State<AppState>,
    Path(id): Path<TrainId>,
) -> Result<Json<Train>, AppError> {
    catalog::get_train(&state.pool, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Train", id))
}
