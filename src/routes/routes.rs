//! Defines routes for the movie catalogue.
//!
//! ## Structure
//! - **Catalogue endpoints** (base path `/api/movieworld`)
//!   - `GET    /api/movieworld`                   — list movies
//!   - `POST   /api/movieworld`                   — create movie
//!   - `GET    /api/movieworld/{id}`              — fetch one movie
//!   - `PUT    /api/movieworld/{id}`              — replace a movie
//!   - `DELETE /api/movieworld/{id}`              — delete a movie
//!   - `GET    /api/movieworld/{id}/with-reviews` — fetch with reviews attached
//!
//! - **Probes**
//!   - `GET /api/movieworld/health` — liveness
//!   - `GET /readyz`                — readiness (database round-trip)
//!
//! `health` is a static segment, so it wins over `{id}`.

use crate::{
    handlers::{
        health_handlers::{health, readyz},
        movie_handlers::{
            create_movie, delete_movie, get_movie, get_movie_with_reviews, list_movies,
            update_movie,
        },
    },
    services::movie_service::MovieService,
};
use axum::{Router, routing::get};

/// Build and return the router for all catalogue routes.
///
/// The router carries shared state (`MovieService`) to all handlers.
pub fn routes() -> Router<MovieService> {
    Router::new()
        .route("/readyz", get(readyz))
        .route("/api/movieworld/health", get(health))
        .route("/api/movieworld", get(list_movies).post(create_movie))
        .route(
            "/api/movieworld/{id}",
            get(get_movie).put(update_movie).delete(delete_movie),
        )
        .route(
            "/api/movieworld/{id}/with-reviews",
            get(get_movie_with_reviews),
        )
}
