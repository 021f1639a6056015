//! HTTP handlers for the movie catalogue.
//! Bodies are validated here, before the service sees them; absent results
//! become 404s.

use crate::{errors::AppError, models::movie_dto::MovieDto, services::movie_service::MovieService};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;

/// GET `/api/movieworld` — every movie.
pub async fn list_movies(
    State(service): State<MovieService>,
) -> Result<Json<Vec<MovieDto>>, AppError> {
    info!("REST request to get all movies");
    Ok(Json(service.list_all().await?))
}

/// GET `/api/movieworld/{id}`
pub async fn get_movie(
    State(service): State<MovieService>,
    Path(id): Path<i64>,
) -> Result<Json<MovieDto>, AppError> {
    info!("REST request to get movie with id: {}", id);
    service
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// GET `/api/movieworld/{id}/with-reviews` — movie plus whatever the review
/// service returned. A review outage still answers 200, without `reviews`.
pub async fn get_movie_with_reviews(
    State(service): State<MovieService>,
    Path(id): Path<i64>,
) -> Result<Json<MovieDto>, AppError> {
    info!("REST request to get movie with id: {} including reviews", id);
    service
        .get_with_reviews(id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// POST `/api/movieworld` — 201 with the stored movie.
pub async fn create_movie(
    State(service): State<MovieService>,
    payload: Result<Json<MovieDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(dto) = payload?;
    info!("REST request to create a new movie: {:?}", dto.title);
    dto.validate()?;

    let created = service.create(dto).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT `/api/movieworld/{id}` — full replace of every field except `id`.
pub async fn update_movie(
    State(service): State<MovieService>,
    Path(id): Path<i64>,
    payload: Result<Json<MovieDto>, JsonRejection>,
) -> Result<Json<MovieDto>, AppError> {
    let Json(dto) = payload?;
    info!("REST request to update movie with id: {}", id);
    dto.validate()?;

    service
        .update(id, dto)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// DELETE `/api/movieworld/{id}` — 204, or 404 if there was nothing to delete.
pub async fn delete_movie(
    State(service): State<MovieService>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    info!("REST request to delete movie with id: {}", id);
    if service.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

fn not_found(id: i64) -> AppError {
    AppError::not_found(format!("movie `{}` not found", id))
}
