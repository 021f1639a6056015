//! Conversions between the persisted [`Movie`] and the wire-facing [`MovieDto`].

use super::{
    movie::Movie,
    movie_dto::{MovieDto, ValidationError},
};

impl From<Movie> for MovieDto {
    fn from(movie: Movie) -> Self {
        Self {
            id: movie.id,
            title: Some(movie.title),
            director: Some(movie.director),
            release_date: Some(movie.release_date),
            duration_minutes: movie.duration_minutes,
            genre: movie.genre,
            image_path: movie.image_path,
            description: movie.description,
            reviews: movie.reviews,
        }
    }
}

impl TryFrom<MovieDto> for Movie {
    type Error = ValidationError;

    /// Copies every field, `id` and `reviews` included. Fails if the DTO does
    /// not pass [`MovieDto::validate`].
    fn try_from(dto: MovieDto) -> Result<Self, Self::Error> {
        let (title, director, release_date) = required_fields(&dto)?;
        Ok(Self {
            id: dto.id,
            title,
            director,
            release_date,
            duration_minutes: dto.duration_minutes,
            genre: dto.genre,
            image_path: dto.image_path,
            description: dto.description,
            reviews: dto.reviews,
        })
    }
}

impl Movie {
    /// Overwrite every mutable field from `dto`.
    ///
    /// `id` and `reviews` are left untouched. On a validation error `self` is
    /// not modified.
    pub fn apply_update(&mut self, dto: MovieDto) -> Result<(), ValidationError> {
        let (title, director, release_date) = required_fields(&dto)?;
        self.title = title;
        self.director = director;
        self.release_date = release_date;
        self.duration_minutes = dto.duration_minutes;
        self.genre = dto.genre;
        self.image_path = dto.image_path;
        self.description = dto.description;
        Ok(())
    }
}

/// Map a batch of movies for a list response.
pub fn to_dto_list(movies: Vec<Movie>) -> Vec<MovieDto> {
    movies.into_iter().map(MovieDto::from).collect()
}

/// Handlers validate first; this repeats the check for callers outside HTTP.
fn required_fields(
    dto: &MovieDto,
) -> Result<(String, String, chrono::NaiveDate), ValidationError> {
    dto.validate()?;
    match (&dto.title, &dto.director, dto.release_date) {
        (Some(title), Some(director), Some(date)) => Ok((title.clone(), director.clone(), date)),
        (None, _, _) => Err(ValidationError::Required("Title")),
        (_, None, _) => Err(ValidationError::Required("Director")),
        (_, _, None) => Err(ValidationError::Required("Release date")),
    }
}
