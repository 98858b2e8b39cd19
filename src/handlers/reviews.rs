use axum::extract::State;
use axum::response::Response;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::db;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::extract::{ApiJson, ApiPath};
use crate::utils::response::{created, success};

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub movie_id: Uuid,
    pub rating: i16,
    pub review_text: Option<String>,
}

fn validate_rating(rating: i16) -> Result<i16, AppError> {
    if !(1..=5).contains(&rating) {
        return Err(AppError::ValidationError(
            "rating must be between 1 and 5".to_string(),
        ));
    }
    Ok(rating)
}

/// GET /api/reviews/:movie_id
pub async fn list_reviews(
    State(state): State<AppState>,
    ApiPath(movie_id): ApiPath<Uuid>,
) -> Result<Response, AppError> {
    let reviews = db::reviews::list_for_movie(&state.pool, movie_id).await?;
    Ok(success(reviews))
}

/// POST /api/reviews
pub async fn create_review(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(req): ApiJson<ReviewRequest>,
) -> Result<Response, AppError> {
    let rating = validate_rating(req.rating)?;

    if !db::movies::exists(&state.pool, req.movie_id).await? {
        return Err(AppError::NotFound(format!(
            "Movie with id '{}' was not found",
            req.movie_id
        )));
    }

    let text = req
        .review_text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());
    let review = db::reviews::insert(&state.pool, user.id, req.movie_id, rating, text)
        .await
        .map_err(|e| AppError::on_unique_violation(e, "You have already reviewed this movie"))?;

    Ok(created(review))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_must_be_one_to_five() {
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
        assert_eq!(validate_rating(1).unwrap(), 1);
        assert_eq!(validate_rating(5).unwrap(), 5);
    }
}
