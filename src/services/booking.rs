//! Seat booking.
//!
//! Every booking runs in one transaction that first locks the showtime row, so
//! concurrent requests for the same showtime (from any server process) are
//! serialized and always see the availability left by the previous commit.
//! The insert is the last write before commit: any failure before it leaves
//! nothing reserved and nothing charged.

use std::collections::HashSet;

use chrono::Local;
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::db::bookings::NewBooking;
use crate::models::{Booking, SeatLabel};
use crate::services::{availability, reference, showtime_generator};
use crate::utils::error::AppError;

#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub showtime_id: Uuid,
    pub seats: Vec<String>,
    /// Total as computed by the client; only used as a cross-check.
    pub total_amount: Decimal,
}

/// Largest tolerated difference between the client's total and ours.
fn amount_tolerance() -> Decimal {
    Decimal::new(1, 2)
}

pub async fn create_booking(
    pool: &PgPool,
    user_id: Uuid,
    request: BookingRequest,
) -> Result<Booking, AppError> {
    let seats = validate_seats(&request.seats)?;
    if request.total_amount.is_sign_negative() {
        return Err(AppError::ValidationError(
            "total_amount must not be negative".to_string(),
        ));
    }
    let labels: Vec<String> = seats.iter().map(SeatLabel::to_string).collect();
    let seat_count = i32::try_from(labels.len())
        .map_err(|_| AppError::ValidationError("Too many seats requested".to_string()))?;

    let mut tx = pool.begin().await?;

    let showtime = db::showtimes::lock_for_booking(&mut *tx, request.showtime_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Showtime '{}' was not found", request.showtime_id))
        })?;

    let seat_map = showtime.seat_map();
    if let Some(outside) = seats.iter().find(|seat| !seat_map.contains(seat)) {
        return Err(AppError::ValidationError(format!(
            "Seat {} does not exist on this screen",
            outside
        )));
    }

    let booked = availability::booked_seats(&mut *tx, showtime.id).await?;
    let contended = availability::conflicts(&labels, &booked);
    if !contended.is_empty() {
        return Err(AppError::SeatConflict { seats: contended });
    }

    let total_amount = reconcile_total(showtime.price, labels.len(), request.total_amount)?;
    let booking_reference = reference::generate_booking_reference(Local::now().date_naive());

    let booking = db::bookings::insert(
        &mut *tx,
        &NewBooking {
            user_id,
            showtime_id: showtime.id,
            seats: &labels,
            total_amount,
            booking_reference: &booking_reference,
        },
    )
    .await?;
    db::showtimes::adjust_available_seats(&mut *tx, showtime.id, -seat_count).await?;

    tx.commit().await?;

    tracing::info!(
        booking_id = %booking.id,
        showtime_id = %booking.showtime_id,
        reference = %booking.booking_reference,
        seats = seat_count,
        total = %booking.total_amount,
        "Booking confirmed"
    );

    Ok(booking)
}

/// Parses and canonicalizes the requested labels (`" a1"` becomes `A1`),
/// rejecting an empty selection, malformed labels and duplicates.
pub fn validate_seats(seats: &[String]) -> Result<Vec<SeatLabel>, AppError> {
    if seats.is_empty() {
        return Err(AppError::ValidationError(
            "Please select at least one seat".to_string(),
        ));
    }

    let mut seen = HashSet::with_capacity(seats.len());
    let mut labels = Vec::with_capacity(seats.len());
    for raw in seats {
        let label: SeatLabel = raw
            .trim()
            .to_ascii_uppercase()
            .parse()
            .map_err(|e: crate::models::seat::InvalidSeatLabel| {
                AppError::ValidationError(e.to_string())
            })?;
        if !seen.insert(label) {
            return Err(AppError::ValidationError(format!(
                "Seat {} was requested more than once",
                label
            )));
        }
        labels.push(label);
    }

    Ok(labels)
}

/// The authoritative total is `price × seats`; the client's figure must agree
/// within a cent.
pub fn reconcile_total(price: Decimal, seats: usize, claimed: Decimal) -> Result<Decimal, AppError> {
    let expected = (price * Decimal::from(seats)).round_dp(2);
    if expected >= showtime_generator::max_price() {
        return Err(AppError::ValidationError(
            "Booking total is too large; please book fewer seats".to_string(),
        ));
    }
    if (claimed - expected).abs() > amount_tolerance() {
        return Err(AppError::AmountMismatch { expected, claimed });
    }
    Ok(expected)
}
