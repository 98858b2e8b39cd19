use chrono::NaiveDate;
use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::Movie;

pub struct MovieFields {
    pub title: String,
    pub genre: Option<String>,
    pub description: Option<String>,
    pub duration: Option<i32>,
    pub release_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub poster_url: Option<String>,
}

/// `%term%` with `\`, `%` and `_` escaped, so the term only matches literally.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Case-insensitive substring filters on title and genre, newest release first.
pub async fn list<'e, E: PgExecutor<'e>>(
    executor: E,
    search: Option<&str>,
    genre: Option<&str>,
) -> Result<Vec<Movie>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM movies \
         WHERE ($1::TEXT IS NULL OR title ILIKE $1 ESCAPE '\\') \
           AND ($2::TEXT IS NULL OR genre ILIKE $2 ESCAPE '\\') \
         ORDER BY release_date DESC",
    )
    .bind(search.map(contains_pattern))
    .bind(genre.map(contains_pattern))
    .fetch_all(executor)
    .await
}

pub async fn find<'e, E: PgExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<Option<Movie>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM movies WHERE id = $1")
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn insert<'e, E: PgExecutor<'e>>(
    executor: E,
    movie: &MovieFields,
) -> Result<Movie, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO movies (title, genre, description, duration, release_date, end_date, poster_url) \
         VALUES ($1, $2, $3, $4, COALESCE($5, CURRENT_DATE), $6, $7) \
         RETURNING *",
    )
    .bind(&movie.title)
    .bind(&movie.genre)
    .bind(&movie.description)
    .bind(movie.duration)
    .bind(movie.release_date)
    .bind(movie.end_date)
    .bind(&movie.poster_url)
    .fetch_one(executor)
    .await
}

pub async fn update<'e, E: PgExecutor<'e>>(
    executor: E,
    id: Uuid,
    movie: &MovieFields,
) -> Result<Option<Movie>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE movies SET title = $2, genre = $3, description = $4, duration = $5, \
             release_date = COALESCE($6, release_date), end_date = $7, poster_url = $8, \
             updated_at = NOW() \
         WHERE id = $1 \
         RETURNING *",
    )
    .bind(id)
    .bind(&movie.title)
    .bind(&movie.genre)
    .bind(&movie.description)
    .bind(movie.duration)
    .bind(movie.release_date)
    .bind(movie.end_date)
    .bind(&movie.poster_url)
    .fetch_optional(executor)
    .await
}

/// Returns whether a row was deleted. Fails with a foreign key violation while
/// any of the movie's showtimes still has bookings.
pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM movies WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn exists<'e, E: PgExecutor<'e>>(executor: E, id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM movies WHERE id = $1)")
        .bind(id)
        .fetch_one(executor)
        .await
}
