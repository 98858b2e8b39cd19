//! Expands a date range and a daily start time into showtimes.
//!
//! Dates are calendar dates: iteration uses `NaiveDate` successors, never
//! instants, so daylight-saving changes cannot skip or repeat a day.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::db::showtimes::NewShowtime;
use crate::models::Showtime;
use crate::utils::error::AppError;

/// Body of `POST /api/showtimes`. Dates are `YYYY-MM-DD`, the time `HH:MM`
/// or `HH:MM:SS`. `show_date` schedules a single day when no range is given.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShowtimeBatchRequest {
    pub movie_id: Option<Uuid>,
    pub screen_id: Option<Uuid>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub show_date: Option<String>,
    pub show_time: Option<String>,
    pub price: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowtimeBatch {
    pub movie_id: Uuid,
    pub screen_id: Uuid,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub show_time: NaiveTime,
    pub price: Decimal,
}

impl ShowtimeBatchRequest {
    pub fn validate(self, max_days: i64) -> Result<ShowtimeBatch, AppError> {
        let movie_id = self.movie_id.ok_or_else(|| missing("movie_id"))?;
        let screen_id = self.screen_id.ok_or_else(|| missing("screen_id"))?;

        let start = self
            .start_date
            .as_deref()
            .or(self.show_date.as_deref())
            .ok_or_else(|| missing("start_date"))?;
        let end = self
            .end_date
            .as_deref()
            .or(self.show_date.as_deref())
            .ok_or_else(|| missing("end_date"))?;
        let start = parse_date("start_date", start)?;
        let end = parse_date("end_date", end)?;

        let show_time = parse_time(self.show_time.as_deref().ok_or_else(|| missing("show_time"))?)?;

        let price = parse_price(self.price.ok_or_else(|| missing("price"))?)?;

        let days = (end - start).num_days() + 1;
        if days > max_days {
            return Err(AppError::ValidationError(format!(
                "Date range spans {} days; at most {} can be scheduled at once",
                days, max_days
            )));
        }

        Ok(ShowtimeBatch {
            movie_id,
            screen_id,
            start,
            end,
            show_time,
            price,
        })
    }
}

fn missing(field: &str) -> AppError {
    AppError::ValidationError(format!("Missing required field: {}", field))
}

fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::ValidationError(format!("{} must be a date in YYYY-MM-DD format", field))
    })
}

/// Prices are stored as `NUMERIC(10, 2)`: positive, whole cents, below 10^8.
fn parse_price(price: Decimal) -> Result<Decimal, AppError> {
    if price <= Decimal::ZERO {
        return Err(AppError::ValidationError(
            "price must be greater than zero".to_string(),
        ));
    }
    if price.normalize().scale() > 2 {
        return Err(AppError::ValidationError(
            "price must not have more than two decimal places".to_string(),
        ));
    }
    if price >= max_price() {
        return Err(AppError::ValidationError(format!(
            "price must be less than {}",
            max_price()
        )));
    }
    Ok(price)
}

/// Upper bound (exclusive) of any stored money amount.
pub(crate) fn max_price() -> Decimal {
    Decimal::new(100_000_000, 0)
}

fn parse_time(raw: &str) -> Result<NaiveTime, AppError> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map_err(|_| AppError::ValidationError("show_time must be HH:MM or HH:MM:SS".to_string()))
}

/// Every date in `[start, end]` whose screening would not already have begun
/// at `now`. An inverted range is empty.
pub fn plan_show_dates(
    start: NaiveDate,
    end: NaiveDate,
    show_time: NaiveTime,
    now: NaiveDateTime,
) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut current = start;
    while current <= end {
        if current.and_time(show_time) >= now {
            dates.push(current);
        }
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }
    dates
}

/// Creates the batch in a single transaction: a failed insert leaves no
/// partial schedule behind. Dates the screen already has a showtime for at
/// that time are skipped.
pub async fn generate(
    pool: &PgPool,
    batch: &ShowtimeBatch,
    now: NaiveDateTime,
) -> Result<Vec<Showtime>, AppError> {
    let mut tx = pool.begin().await?;

    if !db::movies::exists(&mut *tx, batch.movie_id).await? {
        return Err(AppError::NotFound(format!(
            "Movie '{}' was not found",
            batch.movie_id
        )));
    }
    let screen = db::screens::find(&mut *tx, batch.screen_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Screen '{}' was not found", batch.screen_id)))?;

    let dates = plan_show_dates(batch.start, batch.end, batch.show_time, now);
    let mut created = Vec::with_capacity(dates.len());
    for show_date in dates {
        let row = NewShowtime {
            movie_id: batch.movie_id,
            screen_id: screen.id,
            show_date,
            show_time: batch.show_time,
            price: batch.price,
            available_seats: screen.total_seats,
        };
        match db::showtimes::insert_if_absent(&mut *tx, &row).await? {
            Some(showtime) => created.push(showtime),
            None => tracing::debug!(
                screen_id = %screen.id,
                %show_date,
                show_time = %batch.show_time,
                "Screen already has a showtime at this slot, skipping"
            ),
        }
    }

    tx.commit().await?;

    tracing::info!(
        movie_id = %batch.movie_id,
        screen_id = %screen.id,
        created = created.len(),
        "Showtimes generated"
    );

    Ok(created)
}
