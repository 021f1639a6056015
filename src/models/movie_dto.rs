//! Wire representation of a movie, used for request bodies and responses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Longest description the catalogue stores.
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// JSON shape of a movie.
///
/// Every field is optional on the way in so that a missing `title` produces a
/// validation error (400) instead of a body rejection. `id` is ignored on
/// create and on update; `reviews` is only populated by the with-reviews read.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovieDto {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub director: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub duration_minutes: Option<i32>,
    pub genre: Option<String>,
    pub image_path: Option<String>,
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Value>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("Duration must be positive")]
    NonPositiveDuration,
    #[error("Description must be at most 2000 characters")]
    DescriptionTooLong,
}

impl MovieDto {
    /// Check the constraints a movie must satisfy before it reaches the store.
    ///
    /// Reports the first violation, in field order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(self.title.as_deref()) {
            return Err(ValidationError::Required("Title"));
        }
        if is_blank(self.director.as_deref()) {
            return Err(ValidationError::Required("Director"));
        }
        if self.release_date.is_none() {
            return Err(ValidationError::Required("Release date"));
        }
        if matches!(self.duration_minutes, Some(minutes) if minutes <= 0) {
            return Err(ValidationError::NonPositiveDuration);
        }
        if self
            .description
            .as_deref()
            .is_some_and(|d| d.chars().count() > MAX_DESCRIPTION_LEN)
        {
            return Err(ValidationError::DescriptionTooLong);
        }
        Ok(())
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inception() -> MovieDto {
        MovieDto {
            title: Some("Inception".into()),
            director: Some("Christopher Nolan".into()),
            release_date: NaiveDate::from_ymd_opt(2010, 7, 16),
            duration_minutes: Some(148),
            ..Default::default()
        }
    }

    #[test]
    fn accepts_minimal_movie() {
        let dto = MovieDto {
            duration_minutes: None,
            ..inception()
        };
        assert_eq!(dto.validate(), Ok(()));
    }

    #[test]
    fn rejects_blank_title() {
        let dto = MovieDto {
            title: Some("   ".into()),
            ..inception()
        };
        assert_eq!(dto.validate(), Err(ValidationError::Required("Title")));
    }

    #[test]
    fn rejects_missing_director_and_date() {
        let no_director = MovieDto {
            director: None,
            ..inception()
        };
        assert_eq!(
            no_director.validate(),
            Err(ValidationError::Required("Director"))
        );

        let no_date = MovieDto {
            release_date: None,
            ..inception()
        };
        assert_eq!(
            no_date.validate(),
            Err(ValidationError::Required("Release date"))
        );
    }

    #[test]
    fn rejects_zero_and_negative_duration() {
        for minutes in [0, -90] {
            let dto = MovieDto {
                duration_minutes: Some(minutes),
                ..inception()
            };
            assert_eq!(dto.validate(), Err(ValidationError::NonPositiveDuration));
        }
    }

    #[test]
    fn rejects_oversized_description() {
        let dto = MovieDto {
            description: Some("x".repeat(MAX_DESCRIPTION_LEN + 1)),
            ..inception()
        };
        assert_eq!(dto.validate(), Err(ValidationError::DescriptionTooLong));
    }

    #[test]
    fn uses_camel_case_on_the_wire() {
        let json = serde_json::json!({
            "title": "Inception",
            "director": "Christopher Nolan",
            "releaseDate": "2010-07-16",
            "durationMinutes": 148,
            "imagePath": "images/inception.jpg"
        });
        let dto: MovieDto = serde_json::from_value(json).unwrap();
        assert_eq!(dto.release_date, NaiveDate::from_ymd_opt(2010, 7, 16));
        assert_eq!(dto.image_path.as_deref(), Some("images/inception.jpg"));

        let out = serde_json::to_value(&dto).unwrap();
        assert_eq!(out["durationMinutes"], 148);
        assert!(out.get("reviews").is_none());
    }
}
