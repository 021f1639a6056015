//! Represents a movie row in the catalogue.

use chrono::NaiveDate;
use serde_json::Value;
use sqlx::FromRow;

/// A single movie in the catalogue.
///
/// Maps 1:1 to the `movies` table, except for `reviews` which is filled in at
/// read time from the review service and never written back.
#[derive(Clone, FromRow, Debug, PartialEq)]
pub struct Movie {
    /// Database-assigned identifier. `None` until the movie is first saved.
    pub id: Option<i64>,

    /// Movie title (non-blank).
    pub title: String,

    /// Director name (non-blank).
    pub director: String,

    /// Theatrical release date.
    pub release_date: NaiveDate,

    /// Running time in minutes, positive when set.
    pub duration_minutes: Option<i32>,

    /// Free-text genre.
    pub genre: Option<String>,

    /// Relative path to a static poster image.
    pub image_path: Option<String>,

    /// Synopsis, at most 2000 characters.
    pub description: Option<String>,

    /// Reviews fetched from the review service. Not persisted.
    #[sqlx(skip)]
    pub reviews: Option<Value>,
}
