use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgExecutor};
use uuid::Uuid;

use crate::models::{Booking, BookingStatus, BookingSummary, PaymentStatus};

pub struct NewBooking<'a> {
    pub user_id: Uuid,
    pub showtime_id: Uuid,
    pub seats: &'a [String],
    pub total_amount: Decimal,
    pub booking_reference: &'a str,
}

/// Everything the confirmation e-mail shows.
#[derive(Debug, Clone, FromRow)]
pub struct ConfirmationRow {
    pub email: String,
    pub first_name: String,
    pub title: String,
    pub show_date: NaiveDate,
    pub show_time: NaiveTime,
    pub seats: Vec<String>,
    pub total_amount: Decimal,
    pub booking_reference: String,
}

/// Seat labels held by non-cancelled bookings, one entry per booked seat.
pub async fn held_seats<'e, E: PgExecutor<'e>>(
    executor: E,
    showtime_id: Uuid,
) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT unnest(seats) FROM bookings \
         WHERE showtime_id = $1 AND booking_status <> 'cancelled'",
    )
    .bind(showtime_id)
    .fetch_all(executor)
    .await
}

pub async fn insert<'e, E: PgExecutor<'e>>(
    executor: E,
    booking: &NewBooking<'_>,
) -> Result<Booking, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO bookings \
         (user_id, showtime_id, seats, total_amount, booking_status, payment_status, booking_reference) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         RETURNING *",
    )
    .bind(booking.user_id)
    .bind(booking.showtime_id)
    .bind(booking.seats)
    .bind(booking.total_amount)
    .bind(BookingStatus::Confirmed)
    .bind(PaymentStatus::Paid)
    .bind(booking.booking_reference)
    .fetch_one(executor)
    .await
}

/// Locks the booking row; `None` if it does not exist or belongs to someone else.
pub async fn find_owned_for_update<'e, E: PgExecutor<'e>>(
    executor: E,
    id: Uuid,
    user_id: Uuid,
) -> Result<Option<Booking>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM bookings WHERE id = $1 AND user_id = $2 FOR UPDATE")
        .bind(id)
        .bind(user_id)
        .fetch_optional(executor)
        .await
}

pub async fn mark_cancelled<'e, E: PgExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<Booking, sqlx::Error> {
    sqlx::query_as(
        "UPDATE bookings SET booking_status = $2, payment_status = $3, updated_at = NOW() \
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(BookingStatus::Cancelled)
    .bind(PaymentStatus::Refunded)
    .fetch_one(executor)
    .await
}

pub async fn list_for_user<'e, E: PgExecutor<'e>>(
    executor: E,
    user_id: Uuid,
) -> Result<Vec<BookingSummary>, sqlx::Error> {
    sqlx::query_as(
        "SELECT b.*, m.title, s.show_date, s.show_time \
         FROM bookings b \
         JOIN showtimes s ON b.showtime_id = s.id \
         JOIN movies m ON s.movie_id = m.id \
         WHERE b.user_id = $1 \
         ORDER BY s.show_date DESC, s.show_time DESC",
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
}

pub async fn confirmation<'e, E: PgExecutor<'e>>(
    executor: E,
    booking_id: Uuid,
) -> Result<Option<ConfirmationRow>, sqlx::Error> {
    sqlx::query_as(
        "SELECT u.email, u.first_name, m.title, s.show_date, s.show_time, \
                b.seats, b.total_amount, b.booking_reference \
         FROM bookings b \
         JOIN users u ON b.user_id = u.id \
         JOIN showtimes s ON b.showtime_id = s.id \
         JOIN movies m ON s.movie_id = m.id \
         WHERE b.id = $1",
    )
    .bind(booking_id)
    .fetch_optional(executor)
    .await
}
