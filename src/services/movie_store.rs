//! src/services/movie_store.rs
//!
//! Persistence for `Movie` rows. `MovieStore` is the seam the service layer
//! talks to; `SqliteMovieStore` is the SQLite-backed implementation. Every
//! call is a single statement, with no caching and no cross-row transactions.

use crate::models::movie::Movie;
use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("movie `{0}` not found")]
    MovieNotFound(i64),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait MovieStore: Send + Sync {
    /// All movies, ordered by id.
    async fn list(&self) -> StoreResult<Vec<Movie>>;

    async fn get(&self, id: i64) -> StoreResult<Option<Movie>>;

    /// Insert when `movie.id` is `None`, otherwise update the row with that id.
    ///
    /// Returns the stored row with `id` populated and `reviews` unset. Updating an id that no
    /// longer exists yields `MovieNotFound`.
    async fn save(&self, movie: Movie) -> StoreResult<Movie>;

    async fn exists(&self, id: i64) -> StoreResult<bool>;

    /// Remove the row if present. Deleting a missing id is not an error.
    async fn delete(&self, id: i64) -> StoreResult<()>;

    /// Cheap round-trip used by the readiness probe.
    async fn ping(&self) -> StoreResult<()>;
}

const MOVIE_COLUMNS: &str =
    "id, title, director, release_date, duration_minutes, genre, image_path, description";

#[derive(Clone)]
pub struct SqliteMovieStore {
    /// Shared SQLite connection pool.
    db: Arc<SqlitePool>,
}

impl SqliteMovieStore {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }

    async fn insert(&self, movie: &Movie) -> StoreResult<Movie> {
        let sql = format!(
            "INSERT INTO movies (
                title, director, release_date, duration_minutes, genre, image_path, description
             ) VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING {MOVIE_COLUMNS}"
        );
        let saved = sqlx::query_as::<_, Movie>(&sql)
            .bind(&movie.title)
            .bind(&movie.director)
            .bind(movie.release_date)
            .bind(movie.duration_minutes)
            .bind(&movie.genre)
            .bind(&movie.image_path)
            .bind(&movie.description)
            .fetch_one(&*self.db)
            .await?;
        Ok(saved)
    }

    async fn update(&self, id: i64, movie: &Movie) -> StoreResult<Movie> {
        let sql = format!(
            "UPDATE movies SET
                title = ?, director = ?, release_date = ?, duration_minutes = ?,
                genre = ?, image_path = ?, description = ?
             WHERE id = ?
             RETURNING {MOVIE_COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&sql)
            .bind(&movie.title)
            .bind(&movie.director)
            .bind(movie.release_date)
            .bind(movie.duration_minutes)
            .bind(&movie.genre)
            .bind(&movie.image_path)
            .bind(&movie.description)
            .bind(id)
            .fetch_one(&*self.db)
            .await
            .map_err(|err| match err {
                sqlx::Error::RowNotFound => StoreError::MovieNotFound(id),
                other => StoreError::Sqlx(other),
            })
    }
}

#[async_trait]
impl MovieStore for SqliteMovieStore {
    async fn list(&self) -> StoreResult<Vec<Movie>> {
        let sql = format!("SELECT {MOVIE_COLUMNS} FROM movies ORDER BY id ASC");
        let rows = sqlx::query_as::<_, Movie>(&sql)
            .fetch_all(&*self.db)
            .await?;
        Ok(rows)
    }

    async fn get(&self, id: i64) -> StoreResult<Option<Movie>> {
        let sql = format!("SELECT {MOVIE_COLUMNS} FROM movies WHERE id = ?");
        let row = sqlx::query_as::<_, Movie>(&sql)
            .bind(id)
            .fetch_optional(&*self.db)
            .await?;
        Ok(row)
    }

    async fn save(&self, movie: Movie) -> StoreResult<Movie> {
        match movie.id {
            None => self.insert(&movie).await,
            Some(id) => self.update(id, &movie).await,
        }
    }

    async fn exists(&self, id: i64) -> StoreResult<bool> {
        let found: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movies WHERE id = ?")
            .bind(id)
            .fetch_one(&*self.db)
            .await?;
        Ok(found > 0)
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM movies WHERE id = ?")
            .bind(id)
            .execute(&*self.db)
            .await?;
        tracing::debug!("deleted {} row(s) for movie {}", result.rows_affected(), id);
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&*self.db)
            .await?;
        Ok(())
    }
}
