use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::Screen;

pub async fn list<'e, E: PgExecutor<'e>>(executor: E) -> Result<Vec<Screen>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM screens ORDER BY name")
        .fetch_all(executor)
        .await
}

pub async fn find<'e, E: PgExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<Option<Screen>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM screens WHERE id = $1")
        .bind(id)
        .fetch_optional(executor)
        .await
}
