//! Train type endpoints: `POST /api/train-types`, `GET /api/train-types`.

use crate::catalog::{self, NewTrainType, TrainType};
use crate::error::AppError;
use crate::server::state::AppState;
use axum::{Json, extract::State, http::StatusCode};

/// Create a train type.
pub async fn create_train_type(
    State(state): State<AppState>,
    Json(request): Json<NewTrainType>,
) -> Result<(StatusCode, Json<TrainType>), AppError> {
    let train_type = catalog::create_train_type(&state.pool, &request).await?;
    Ok((StatusCode::CREATED, Json(train_type)))
}

/// List all train types.
pub async fn list_train_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<TrainType>>, AppError> {
    Ok(Json(catalog::list_train_types(&state.pool).await?))
}
