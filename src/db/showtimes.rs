use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgExecutor};
use uuid::Uuid;

use crate::models::{SeatMap, Showtime};

/// What the booking path needs to know about a locked showtime.
#[derive(Debug, Clone, FromRow)]
pub struct SeatingRow {
    pub id: Uuid,
    pub price: Decimal,
    pub available_seats: i32,
    pub total_seats: i32,
    pub seats_per_row: i32,
}

impl SeatingRow {
    pub fn seat_map(&self) -> SeatMap {
        SeatMap::new(self.total_seats, self.seats_per_row)
    }
}

pub struct NewShowtime {
    pub movie_id: Uuid,
    pub screen_id: Uuid,
    pub show_date: NaiveDate,
    pub show_time: NaiveTime,
    pub price: Decimal,
    pub available_seats: i32,
}

/// Loads a showtime with its screen layout and takes a row lock on the
/// showtime until the surrounding transaction ends.
pub async fn lock_for_booking<'e, E: PgExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<Option<SeatingRow>, sqlx::Error> {
    sqlx::query_as(
        "SELECT s.id, s.price, s.available_seats, sc.total_seats, sc.seats_per_row \
         FROM showtimes s JOIN screens sc ON sc.id = s.screen_id \
         WHERE s.id = $1 FOR UPDATE OF s",
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

/// Returns `None` when the screen already has a showtime at that date and time.
pub async fn insert_if_absent<'e, E: PgExecutor<'e>>(
    executor: E,
    showtime: &NewShowtime,
) -> Result<Option<Showtime>, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO showtimes (movie_id, screen_id, show_date, show_time, price, available_seats) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         ON CONFLICT (screen_id, show_date, show_time) DO NOTHING \
         RETURNING *",
    )
    .bind(showtime.movie_id)
    .bind(showtime.screen_id)
    .bind(showtime.show_date)
    .bind(showtime.show_time)
    .bind(showtime.price)
    .bind(showtime.available_seats)
    .fetch_optional(executor)
    .await
}

pub async fn adjust_available_seats<'e, E: PgExecutor<'e>>(
    executor: E,
    id: Uuid,
    delta: i32,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE showtimes SET available_seats = available_seats + $2 WHERE id = $1")
        .bind(id)
        .bind(delta)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn find<'e, E: PgExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<Option<Showtime>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM showtimes WHERE id = $1")
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn list_for_movie<'e, E: PgExecutor<'e>>(
    executor: E,
    movie_id: Uuid,
) -> Result<Vec<Showtime>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM showtimes WHERE movie_id = $1 ORDER BY show_date, show_time")
        .bind(movie_id)
        .fetch_all(executor)
        .await
}
