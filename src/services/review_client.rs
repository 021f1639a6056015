//! Client for the external Movie Review service.
//!
//! Reviews are an optional enrichment: every failure (transport, timeout,
//! non-2xx status, undecodable body) is logged here and reported to the
//! caller as "no reviews".

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("review service answered {0}")]
    Status(reqwest::StatusCode),
    #[error("could not decode review payload: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Anything that can produce the review payload for a movie.
#[async_trait]
pub trait ReviewSource: Send + Sync {
    /// Reviews for `movie_id`, or `None` when they cannot be obtained.
    async fn fetch_reviews(&self, movie_id: i64) -> Option<Value>;
}

/// HTTP client for `GET {base_url}/api/moviereview/movie/{id}`.
#[derive(Clone)]
pub struct HttpReviewClient {
    client: Client,
    base_url: String,
}

impl HttpReviewClient {
    /// Build a client against `base_url` (e.g. `http://moviereview:8081`)
    /// whose requests give up after `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ReviewError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ReviewError::Network)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn reviews_url(&self, movie_id: i64) -> String {
        format!("{}/api/moviereview/movie/{}", self.base_url, movie_id)
    }

    async fn try_fetch(&self, movie_id: i64) -> Result<Value, ReviewError> {
        let response = self
            .client
            .get(self.reviews_url(movie_id))
            .send()
            .await
            .map_err(ReviewError::Network)?;

        if !response.status().is_success() {
            return Err(ReviewError::Status(response.status()));
        }

        response.json::<Value>().await.map_err(ReviewError::Decode)
    }
}

#[async_trait]
impl ReviewSource for HttpReviewClient {
    async fn fetch_reviews(&self, movie_id: i64) -> Option<Value> {
        match self.try_fetch(movie_id).await {
            Ok(reviews) => Some(reviews),
            Err(err) => {
                warn!(movie_id, error = %err, "Error fetching reviews for movie");
                None
            }
        }
    }
}
