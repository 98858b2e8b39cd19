use axum::extract::{Query, State};
use axum::response::Response;
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AdminUser;
use crate::db;
use crate::db::movies::MovieFields;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::extract::{ApiJson, ApiPath};
use crate::utils::response::{created, message, success};

#[derive(Debug, Default, Deserialize)]
pub struct MovieFilter {
    pub search: Option<String>,
    pub genre: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MovieRequest {
    pub title: String,
    pub genre: Option<String>,
    pub description: Option<String>,
    pub duration_min: Option<i32>,
    pub poster_url: Option<String>,
    pub release_date: Option<String>,
    pub end_date: Option<String>,
}

impl MovieRequest {
    fn into_fields(self) -> Result<MovieFields, AppError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::ValidationError("title is required".to_string()));
        }
        if self.duration_min.is_some_and(|d| d <= 0) {
            return Err(AppError::ValidationError(
                "duration_min must be positive".to_string(),
            ));
        }

        let release_date = optional_date("release_date", self.release_date)?;
        let end_date = optional_date("end_date", self.end_date)?;
        if let (Some(release), Some(end)) = (release_date, end_date) {
            if end < release {
                return Err(AppError::ValidationError(RUN_DATES.to_string()));
            }
        }

        Ok(MovieFields {
            title,
            genre: non_blank(self.genre),
            description: non_blank(self.description),
            duration: self.duration_min,
            release_date,
            end_date,
            poster_url: non_blank(self.poster_url),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Empty strings from form inputs mean "no date".
fn optional_date(field: &str, raw: Option<String>) -> Result<Option<NaiveDate>, AppError> {
    match non_blank(raw) {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                AppError::ValidationError(format!("{} must be a date in YYYY-MM-DD format", field))
            }),
    }
}

const RUN_DATES: &str = "end_date must not be before release_date";

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Movie with id '{}' was not found", id))
}

/// GET /api/movies
pub async fn list_movies(
    State(state): State<AppState>,
    Query(filter): Query<MovieFilter>,
) -> Result<Response, AppError> {
    let search = non_blank(filter.search);
    let genre = non_blank(filter.genre);
    let movies = db::movies::list(&state.pool, search.as_deref(), genre.as_deref()).await?;
    Ok(success(movies))
}

/// GET /api/movies/:id
pub async fn get_movie(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Response, AppError> {
    let movie = db::movies::find(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(success(movie))
}

/// GET /api/movies/:id/showtimes
pub async fn list_movie_showtimes(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Response, AppError> {
    let showtimes = db::showtimes::list_for_movie(&state.pool, id).await?;
    Ok(success(showtimes))
}

/// POST /api/movies
pub async fn create_movie(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiJson(req): ApiJson<MovieRequest>,
) -> Result<Response, AppError> {
    let fields = req.into_fields()?;
    let movie = db::movies::insert(&state.pool, &fields)
        .await
        .map_err(|e| AppError::on_check_violation(e, RUN_DATES))?;
    tracing::info!(movie_id = %movie.id, title = %movie.title, "Movie created");
    Ok(created(movie))
}

/// PUT /api/movies/:id
pub async fn update_movie(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<MovieRequest>,
) -> Result<Response, AppError> {
    let fields = req.into_fields()?;
    let movie = db::movies::update(&state.pool, id, &fields)
        .await
        .map_err(|e| AppError::on_check_violation(e, RUN_DATES))?
        .ok_or_else(|| not_found(id))?;
    Ok(success(movie))
}

/// DELETE /api/movies/:id
pub async fn delete_movie(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Response, AppError> {
    let deleted = db::movies::delete(&state.pool, id).await.map_err(|e| {
        AppError::on_foreign_key_violation(e, "Movie has showtimes with bookings and cannot be removed")
    })?;
    if !deleted {
        return Err(not_found(id));
    }
    tracing::info!(movie_id = %id, "Movie removed");
    Ok(message("Movie removed"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> MovieRequest {
        MovieRequest {
            title: " Dune ".to_string(),
            genre: Some("Sci-Fi".to_string()),
            description: Some("".to_string()),
            duration_min: Some(155),
            poster_url: None,
            release_date: Some("2026-10-01".to_string()),
            end_date: Some("".to_string()),
        }
    }

    #[test]
    fn blank_strings_become_none() {
        let fields = request().into_fields().unwrap();
        assert_eq!(fields.title, "Dune");
        assert_eq!(fields.description, None);
        assert_eq!(fields.end_date, None);
        assert_eq!(fields.release_date, NaiveDate::from_ymd_opt(2026, 10, 1));
    }

    #[test]
    fn rejects_end_before_release() {
        let req = MovieRequest {
            end_date: Some("2026-09-01".to_string()),
            ..request()
        };
        assert!(matches!(req.into_fields(), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn rejects_blank_title_and_bad_duration() {
        let blank = MovieRequest {
            title: "  ".to_string(),
            ..request()
        };
        assert!(blank.into_fields().is_err());

        let negative = MovieRequest {
            duration_min: Some(0),
            ..request()
        };
        assert!(negative.into_fields().is_err());
    }
}
