use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Movie {
    pub id: Uuid,
    pub title: String,
    pub genre: Option<String>,
    pub description: Option<String>,
    /// Running time in minutes.
    pub duration: Option<i32>,
    pub release_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub poster_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
