//! Film catalog: paged listing and single lookup.

use axum::{
    extract::{Query, State},
    Json,
};
use tracing::debug;

use crate::error::AppError;
use crate::handlers::http::{AppPath, AppState};
use crate::models::{Film, FilmListParams};

/// GET /films?filter=&sort=&page=
pub async fn list_films(
    State(state): State<AppState>,
    Query(params): Query<FilmListParams>,
) -> Result<Json<Vec<Film>>, AppError> {
    let query = params.resolve()?;
    debug!(?query, "listing films");
    Ok(Json(state.films().list(&query).await?))
}

/// GET /films/:id
pub async fn get_film(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Film>, AppError> {
    Ok(Json(state.films().get_by_id(id).await?))
}
