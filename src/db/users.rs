use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::{User, UserRole};

pub struct NewUser<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub password_hash: &'a str,
}

pub async fn find_by_email<'e, E: PgExecutor<'e>>(
    executor: E,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(executor)
        .await
}

pub async fn find<'e, E: PgExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(executor)
        .await
}

/// New accounts always get the `user` role.
pub async fn insert<'e, E: PgExecutor<'e>>(
    executor: E,
    user: &NewUser<'_>,
) -> Result<User, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO users (first_name, last_name, email, phone, password_hash, role) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING *",
    )
    .bind(user.first_name)
    .bind(user.last_name)
    .bind(user.email)
    .bind(user.phone)
    .bind(user.password_hash)
    .bind(UserRole::User)
    .fetch_one(executor)
    .await
}

pub async fn list<'e, E: PgExecutor<'e>>(executor: E) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users ORDER BY created_at DESC")
        .fetch_all(executor)
        .await
}

pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn set_role<'e, E: PgExecutor<'e>>(
    executor: E,
    email: &str,
    role: UserRole,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("UPDATE users SET role = $2 WHERE email = $1 RETURNING *")
        .bind(email)
        .bind(role)
        .fetch_optional(executor)
        .await
}
