use axum::extract::State;
use axum::response::Response;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::db;
use crate::notification;
use crate::services::booking::{self, BookingRequest};
use crate::services::cancellation;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::extract::{ApiJson, ApiPath};
use crate::utils::response::{created, success};

/// POST /api/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(request): ApiJson<BookingRequest>,
) -> Result<Response, AppError> {
    let booking = booking::create_booking(&state.pool, user.id, request).await?;

    notification::dispatch_booking_confirmation(&state, booking.id);

    Ok(created(booking))
}

/// GET /api/bookings
pub async fn list_my_bookings(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Response, AppError> {
    let bookings = db::bookings::list_for_user(&state.pool, user.id).await?;
    Ok(success(bookings))
}

/// PUT /api/bookings/:id/cancel
///
/// An id that cannot name any booking is treated like someone else's booking.
pub async fn cancel_booking(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(raw_id): ApiPath<String>,
) -> Result<Response, AppError> {
    let booking_id = Uuid::parse_str(raw_id.trim())
        .map_err(|_| AppError::NotFound(cancellation::NOT_FOUND.to_string()))?;
    let booking = cancellation::cancel_booking(&state.pool, user.id, booking_id).await?;
    Ok(success(booking))
}
