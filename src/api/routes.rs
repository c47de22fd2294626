//! Route endpoints: `POST /api/routes`, `GET /api/routes`.

use super::parse_id_list;
use crate::catalog::{self, NewRoute, Route};
use crate::error::AppError;
use crate::server::state::AppState;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;

/// Query parameters for listing routes.
#[derive(Debug, Deserialize)]
pub struct ListRoutesQuery {
    /// Comma-separated source station ids to filter by.
    pub source: Option<String>,
}

/// Create a route between two stations.
pub async fn create_route(
    State(state): State<AppState>,
    Json(request): Json<NewRoute>,
) -> Result<(StatusCode, Json<Route>), AppError> {
    let route = catalog::create_route(&state.pool, &request).await?;
    Ok((StatusCode::CREATED, Json(route)))
}

/// List routes, optionally filtered by source station (`?source=1,2`).
pub async fn list_routes(
    State(state): State<AppState>,
    Query(query): Query<ListRoutesQuery>,
) -> Result<Json<Vec<Route>>, AppError> {
    let filter = query
        .source
        .as_deref()
        .map(|raw| parse_id_list("source", raw))
        .transpose()?;

    let routes = catalog::list_routes(&state.pool, filter.as_deref()).await?;
    Ok(Json(routes))
}
