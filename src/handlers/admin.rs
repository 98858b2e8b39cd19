use axum::extract::State;
use axum::response::Response;
use uuid::Uuid;

use crate::auth::AdminUser;
use crate::db;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::extract::ApiPath;
use crate::utils::response::{message, success};

/// GET /api/admin/stats
pub async fn dashboard_stats(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Response, AppError> {
    let stats = db::stats::dashboard(&state.pool).await?;
    Ok(success(stats))
}

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Response, AppError> {
    let users = db::users::list(&state.pool).await?;
    Ok(success(users))
}

/// DELETE /api/admin/users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Response, AppError> {
    if admin.id == id {
        return Err(AppError::ValidationError(
            "Admins cannot remove their own account".to_string(),
        ));
    }

    let deleted = db::users::delete(&state.pool, id)
        .await
        .map_err(|e| AppError::on_foreign_key_violation(e, "User has bookings and cannot be removed"))?;
    if !deleted {
        return Err(AppError::NotFound(format!("User with id '{}' was not found", id)));
    }

    tracing::info!(admin_id = %admin.id, user_id = %id, "User removed");
    Ok(message("User removed"))
}
