//! Core data models for the movie catalogue.
//!
//! `Movie` is the persisted entity and maps to the `movies` table via
//! `sqlx::FromRow`; `MovieDto` is what travels over HTTP. The `mapper`
//! module converts between the two.

pub mod mapper;
pub mod movie;
pub mod movie_dto;
