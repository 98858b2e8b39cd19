use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::models::{Booking, BookingStatus};
use crate::utils::error::AppError;

pub const NOT_FOUND: &str = "Booking not found or access denied";

/// Cancels one of the caller's bookings and returns its seats to the showtime.
/// Cancelling an already cancelled booking returns it unchanged.
pub async fn cancel_booking(
    pool: &PgPool,
    user_id: Uuid,
    booking_id: Uuid,
) -> Result<Booking, AppError> {
    let mut tx = pool.begin().await?;

    let booking = db::bookings::find_owned_for_update(&mut *tx, booking_id, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

    if booking.booking_status == BookingStatus::Cancelled {
        tracing::debug!(booking_id = %booking.id, "Booking already cancelled");
        return Ok(booking);
    }

    let released = i32::try_from(booking.seats.len())
        .map_err(|_| AppError::InternalServerError("Booking holds too many seats".to_string()))?;

    let cancelled = db::bookings::mark_cancelled(&mut *tx, booking.id).await?;
    db::showtimes::adjust_available_seats(&mut *tx, booking.showtime_id, released).await?;

    tx.commit().await?;

    tracing::info!(
        booking_id = %cancelled.id,
        reference = %cancelled.booking_reference,
        released,
        "Booking cancelled"
    );

    Ok(cancelled)
}
