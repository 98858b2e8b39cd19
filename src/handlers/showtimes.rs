use axum::extract::State;
use axum::response::Response;
use chrono::Local;
use uuid::Uuid;

use crate::auth::AdminUser;
use crate::db;
use crate::services::availability;
use crate::services::showtime_generator::{self, ShowtimeBatchRequest};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::extract::{ApiJson, ApiPath};
use crate::utils::response::{created, success};

/// GET /api/showtimes/:id/seats
pub async fn booked_seats(
    State(state): State<AppState>,
    ApiPath(showtime_id): ApiPath<Uuid>,
) -> Result<Response, AppError> {
    let seats = availability::booked_seats(&state.pool, showtime_id).await?;
    Ok(success(seats))
}

/// POST /api/showtimes
pub async fn create_showtimes(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiJson(request): ApiJson<ShowtimeBatchRequest>,
) -> Result<Response, AppError> {
    let batch = request.validate(state.config.max_showtime_range_days)?;
    let now = Local::now().naive_local();

    let showtimes = showtime_generator::generate(&state.pool, &batch, now).await?;
    tracing::info!(admin_id = %admin.id, count = showtimes.len(), "Admin scheduled showtimes");

    Ok(created(showtimes))
}

/// GET /api/screens
pub async fn list_screens(State(state): State<AppState>) -> Result<Response, AppError> {
    let screens = db::screens::list(&state.pool).await?;
    Ok(success(screens))
}
