//! Crew endpoints: `POST /api/crews`, `GET /api/crews`.

use crate::catalog::{self, Crew, NewCrew};
use crate::error::AppError;
use crate::server::state::AppState;
use axum::{Json, extract::State, http::StatusCode};

/// Create a crew member.
pub async fn create_crew(
    State(state): State<AppState>,
    Json(request): Json<NewCrew>,
) -> Result<(StatusCode, Json<Crew>), AppError> {
    let crew = catalog::create_crew(&state.pool, &request).await?;
    Ok((StatusCode::CREATED, Json(crew)))
}

/// List all crew members.
pub async fn list_crews(State(state): State<AppState>) -> Result<Json<Vec<Crew>>, AppError> {
    Ok(Json(catalog::list_crews(&state.pool).await?))
}
