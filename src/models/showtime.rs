use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Showtime {
    pub id: Uuid,
    pub movie_id: Uuid,
    pub screen_id: Uuid,
    pub show_date: NaiveDate,
    pub show_time: NaiveTime,
    pub price: Decimal,
    pub available_seats: i32,
    pub created_at: DateTime<Utc>,
}
