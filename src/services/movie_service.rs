//! MovieService — the six catalogue use cases, composed from a `MovieStore`
//! and a `ReviewSource`.
//!
//! Each public operation is wrapped in [`observe`], which records the
//! operation name, elapsed time and outcome.

use crate::{
    models::{
        mapper::to_dto_list,
        movie::Movie,
        movie_dto::{MovieDto, ValidationError},
    },
    services::{
        movie_store::{MovieStore, StoreError},
        review_client::ReviewSource,
    },
};
use std::{future::Future, sync::Arc, time::Instant};
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Catalogue use cases. Cheap to clone; shared as axum router state.
#[derive(Clone)]
pub struct MovieService {
    store: Arc<dyn MovieStore>,
    reviews: Arc<dyn ReviewSource>,
}

impl MovieService {
    pub fn new(store: Arc<dyn MovieStore>, reviews: Arc<dyn ReviewSource>) -> Self {
        Self { store, reviews }
    }

    /// Every movie, in id order.
    pub async fn list_all(&self) -> ServiceResult<Vec<MovieDto>> {
        observe("list_all", async {
            info!("Fetching all movies");
            let movies = self.store.list().await?;
            Ok(to_dto_list(movies))
        })
        .await
    }

    pub async fn get_by_id(&self, id: i64) -> ServiceResult<Option<MovieDto>> {
        observe("get_by_id", async {
            info!("Fetching movie with id: {}", id);
            let movie = self.store.get(id).await?;
            Ok(movie.map(MovieDto::from))
        })
        .await
    }

    /// Like [`get_by_id`](Self::get_by_id), with `reviews` filled from the
    /// review service. A failed lookup leaves `reviews` unset.
    pub async fn get_with_reviews(&self, id: i64) -> ServiceResult<Option<MovieDto>> {
        observe("get_with_reviews", async {
            info!("Fetching movie with id: {} including reviews", id);
            let Some(mut movie) = self.store.get(id).await? else {
                return Ok(None);
            };
            movie.reviews = self.reviews.fetch_reviews(id).await;
            Ok(Some(MovieDto::from(movie)))
        })
        .await
    }

    /// Persist a new movie. Any `id` in `input` is discarded.
    pub async fn create(&self, input: MovieDto) -> ServiceResult<MovieDto> {
        observe("create", async {
            info!("Creating new movie: {:?}", input.title);
            let mut movie = Movie::try_from(input)?;
            movie.id = None;
            movie.reviews = None;
            let saved = self.store.save(movie).await?;
            Ok(MovieDto::from(saved))
        })
        .await
    }

    /// Replace every mutable field of movie `id`. `None` if it does not exist.
    pub async fn update(&self, id: i64, input: MovieDto) -> ServiceResult<Option<MovieDto>> {
        observe("update", async {
            info!("Updating movie with id: {}", id);
            let Some(mut movie) = self.store.get(id).await? else {
                return Ok(None);
            };
            movie.apply_update(input)?;
            let saved = self.store.save(movie).await?;
            Ok(Some(MovieDto::from(saved)))
        })
        .await
    }

    /// Remove movie `id`. `false` if it did not exist.
    ///
    /// Existence is checked before the delete; a concurrent delete in between
    /// still reports `true`.
    pub async fn delete(&self, id: i64) -> ServiceResult<bool> {
        observe("delete", async {
            info!("Deleting movie with id: {}", id);
            if !self.store.exists(id).await? {
                return Ok(false);
            }
            self.store.delete(id).await?;
            Ok(true)
        })
        .await
    }

    /// Readiness of the backing store.
    pub async fn ready(&self) -> ServiceResult<()> {
        Ok(self.store.ping().await?)
    }
}

/// Time `fut` and log its outcome under `operation`.
async fn observe<T, F>(operation: &'static str, fut: F) -> ServiceResult<T>
where
    F: Future<Output = ServiceResult<T>>,
{
    let started = Instant::now();
    let result = fut.await;
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    match &result {
        Ok(_) => debug!(operation, elapsed_ms, outcome = "success", "service call completed"),
        Err(err) => error!(
            operation,
            elapsed_ms,
            outcome = "error",
            error = %err,
            "service call failed"
        ),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::memory_pool, services::movie_store::SqliteMovieStore};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use serde_json::{Value, json};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Review source that answers with a fixed payload and counts calls.
    struct StubReviews {
        payload: Option<Value>,
        calls: AtomicUsize,
    }

    impl StubReviews {
        fn new(payload: Option<Value>) -> Arc<Self> {
            Arc::new(Self {
                payload,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ReviewSource for StubReviews {
        async fn fetch_reviews(&self, _movie_id: i64) -> Option<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.payload.clone()
        }
    }

    async fn service_with(reviews: Arc<StubReviews>) -> MovieService {
        let store = SqliteMovieStore::new(Arc::new(memory_pool().await));
        MovieService::new(Arc::new(store), reviews)
    }

    async fn service() -> MovieService {
        service_with(StubReviews::new(None)).await
    }

    fn inception() -> MovieDto {
        MovieDto {
            title: Some("Inception".into()),
            director: Some("Christopher Nolan".into()),
            release_date: NaiveDate::from_ymd_opt(2010, 7, 16),
            duration_minutes: Some(148),
            genre: Some("Sci-Fi".into()),
            image_path: Some("images/inception.jpg".into()),
            description: Some("A thief who steals corporate secrets.".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_assigns_fresh_id_and_ignores_input_id() {
        let svc = service().await;
        let first = svc.create(inception()).await.unwrap();
        let second = svc
            .create(MovieDto {
                id: first.id,
                ..inception()
            })
            .await
            .unwrap();

        assert!(first.id.is_some());
        assert!(second.id.is_some());
        assert_ne!(first.id, second.id);
        assert_eq!(svc.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn create_never_echoes_reviews() {
        let svc = service().await;
        let created = svc
            .create(MovieDto {
                reviews: Some(json!(["smuggled"])),
                ..inception()
            })
            .await
            .unwrap();
        assert_eq!(created.reviews, None);
    }

    #[tokio::test]
    async fn create_rejects_invalid_input() {
        let svc = service().await;
        let err = svc
            .create(MovieDto {
                director: Some("".into()),
                ..inception()
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::Required("Director"))
        ));
        assert!(svc.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_by_id_round_trips_input_fields() {
        let svc = service().await;
        let input = inception();
        let created = svc.create(input.clone()).await.unwrap();

        let fetched = svc.get_by_id(created.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(
            fetched,
            MovieDto {
                id: created.id,
                ..input
            }
        );
        assert!(svc.get_by_id(9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_all_on_empty_store_is_empty() {
        assert!(service().await.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_with_reviews_attaches_payload() {
        let reviews = StubReviews::new(Some(json!([{"rating": 5}])));
        let svc = service_with(reviews.clone()).await;
        let id = svc.create(inception()).await.unwrap().id.unwrap();

        let movie = svc.get_with_reviews(id).await.unwrap().unwrap();

        assert_eq!(movie.reviews, Some(json!([{"rating": 5}])));
        assert_eq!(movie.title.as_deref(), Some("Inception"));
        assert_eq!(reviews.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn get_with_reviews_degrades_when_lookup_fails() {
        let svc = service_with(StubReviews::new(None)).await;
        let id = svc.create(inception()).await.unwrap().id.unwrap();

        let movie = svc.get_with_reviews(id).await.unwrap().unwrap();

        assert_eq!(movie.id, Some(id));
        assert_eq!(movie.reviews, None);
    }

    #[tokio::test]
    async fn get_with_reviews_skips_lookup_for_unknown_movie() {
        let reviews = StubReviews::new(Some(json!([])));
        let svc = service_with(reviews.clone()).await;

        assert!(svc.get_with_reviews(12).await.unwrap().is_none());
        assert_eq!(reviews.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn update_overwrites_all_fields_but_id() {
        let svc = service().await;
        let id = svc.create(inception()).await.unwrap().id.unwrap();

        let updated = svc
            .update(
                id,
                MovieDto {
                    id: Some(id + 100),
                    title: Some("Tenet".into()),
                    director: Some("Christopher Nolan".into()),
                    release_date: NaiveDate::from_ymd_opt(2020, 8, 26),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, Some(id));
        assert_eq!(updated.title.as_deref(), Some("Tenet"));
        assert_eq!(updated.duration_minutes, None);
        assert_eq!(updated.genre, None);
        assert_eq!(updated.image_path, None);
        assert_eq!(updated.description, None);
        assert_eq!(svc.get_by_id(id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn update_unknown_movie_is_none_and_store_untouched() {
        let svc = service().await;
        let existing = svc.create(inception()).await.unwrap();

        assert!(svc.update(4242, inception()).await.unwrap().is_none());
        assert_eq!(svc.list_all().await.unwrap(), vec![existing]);
    }

    #[tokio::test]
    async fn delete_reports_whether_movie_existed() {
        let svc = service().await;
        let id = svc.create(inception()).await.unwrap().id.unwrap();

        assert!(svc.delete(id).await.unwrap());
        assert!(svc.get_by_id(id).await.unwrap().is_none());
        assert!(!svc.delete(id).await.unwrap());
    }

    #[tokio::test]
    async fn delete_unknown_movie_leaves_store_alone() {
        let svc = service().await;
        svc.create(inception()).await.unwrap();

        assert!(!svc.delete(77).await.unwrap());
        assert_eq!(svc.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn ready_when_store_answers() {
        service().await.ready().await.unwrap();
    }
}
