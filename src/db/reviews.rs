use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::{Review, ReviewWithAuthor};

pub async fn list_for_movie<'e, E: PgExecutor<'e>>(
    executor: E,
    movie_id: Uuid,
) -> Result<Vec<ReviewWithAuthor>, sqlx::Error> {
    sqlx::query_as(
        "SELECT r.*, u.first_name, u.last_name \
         FROM reviews r JOIN users u ON r.user_id = u.id \
         WHERE r.movie_id = $1 \
         ORDER BY r.created_at DESC",
    )
    .bind(movie_id)
    .fetch_all(executor)
    .await
}

/// Fails with a unique violation on a second review of the same movie.
pub async fn insert<'e, E: PgExecutor<'e>>(
    executor: E,
    user_id: Uuid,
    movie_id: Uuid,
    rating: i16,
    review_text: Option<&str>,
) -> Result<Review, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO reviews (user_id, movie_id, rating, review_text) \
         VALUES ($1, $2, $3, $4) \
         RETURNING *",
    )
    .bind(user_id)
    .bind(movie_id)
    .bind(rating)
    .bind(review_text)
    .fetch_one(executor)
    .await
}
