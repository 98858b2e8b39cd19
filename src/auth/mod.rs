//! Bearer-token authentication as axum extractors.
//!
//! Handlers that take [`AuthUser`] reject anonymous requests with `401`;
//! [`AdminUser`] additionally rejects non-admin roles with `403`.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use uuid::Uuid;

use crate::models::UserRole;
use crate::state::AppState;
use crate::utils::error::AppError;

pub mod password;
pub mod token;

#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: UserRole,
}

#[derive(Debug, Clone, Copy)]
pub struct AdminUser(pub AuthUser);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::AuthError("Missing Authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::AuthError("Invalid Authorization format".to_string()))?;

        let claims = token::verify_token(token.trim(), &state.config.jwt_secret).map_err(|e| {
            tracing::debug!("JWT validation failed: {e}");
            AppError::AuthError("Invalid or expired token".to_string())
        })?;

        Ok(AuthUser {
            id: claims.sub,
            role: claims.role,
        })
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.role.is_admin() {
            return Err(AppError::Forbidden("Access denied".to_string()));
        }
        Ok(AdminUser(user))
    }
}
