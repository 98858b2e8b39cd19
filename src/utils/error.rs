use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rust_decimal::Decimal;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::utils::response::error as error_response;

const NOTHING_RESERVED: &str = "nothing was reserved or charged";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Seats already booked: {}", .seats.join(", "))]
    SeatConflict { seats: Vec<String> },

    #[error("Amount mismatch: expected {expected}, claimed {claimed}")]
    AmountMismatch { expected: Decimal, claimed: Decimal },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal server error")]
    InternalServerError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::AuthError(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::SeatConflict { .. } => StatusCode::CONFLICT,
            AppError::AmountMismatch { .. } => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::AuthError(_) => "AUTH_ERROR",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::SeatConflict { .. } => "SEAT_CONFLICT",
            AppError::AmountMismatch { .. } => "BOOKING_FAILED",
            AppError::Conflict(_) => "CONFLICT",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Maps a unique violation (`23505`) to `Conflict`, leaving other errors as they are.
    pub fn on_unique_violation(err: sqlx::Error, msg: &str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict(msg.to_string())
            }
            _ => AppError::DatabaseError(err),
        }
    }

    /// Maps a foreign key violation (`23503`) to `Conflict`.
    pub fn on_foreign_key_violation(err: sqlx::Error, msg: &str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                AppError::Conflict(msg.to_string())
            }
            _ => AppError::DatabaseError(err),
        }
    }

    /// Maps a check constraint violation (`23514`) to `ValidationError`.
    pub fn on_check_violation(err: sqlx::Error, msg: &str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_check_violation() => {
                AppError::ValidationError(msg.to_string())
            }
            _ => AppError::DatabaseError(err),
        }
    }

    fn log(&self) {
        match self {
            AppError::ValidationError(msg)
            | AppError::AuthError(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => {
                warn!(error = ?self, message = %msg, "Request rejected");
            }
            AppError::SeatConflict { seats } => {
                warn!(seats = ?seats, "Seat conflict");
            }
            AppError::AmountMismatch { expected, claimed } => {
                warn!(%expected, %claimed, "Booking total does not match server price");
            }
            AppError::InternalServerError(msg) => {
                error!(error = ?self, message = %msg, "Application error");
            }
            AppError::DatabaseError(e) => {
                error!(error = ?e, "Database error");
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        // Log internal details
        self.log();

        // Only expose high-level message to the client
        let (public_message, details) = match &self {
            AppError::ValidationError(msg)
            | AppError::AuthError(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => (msg.clone(), None),
            AppError::InternalServerError(_) => ("Internal server error".to_string(), None),
            AppError::SeatConflict { seats } => (
                format!(
                    "Seats {} are already booked; {}. Please choose different seats",
                    seats.join(", "),
                    NOTHING_RESERVED
                ),
                Some(json!({ "seats": seats })),
            ),
            AppError::AmountMismatch { .. } => (
                format!("Booking could not be completed; {}", NOTHING_RESERVED),
                None,
            ),
            AppError::DatabaseError(_) => (
                format!("A database error occurred; {}", NOTHING_RESERVED),
                None,
            ),
        };

        error_response(code, public_message, details, status)
    }
}
