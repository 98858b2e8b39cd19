use axum::extract::State;
use axum::response::Response;
use serde::{Deserialize, Serialize};

use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::create_token;
use crate::auth::AuthUser;
use crate::db;
use crate::db::users::NewUser;
use crate::models::User;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::extract::ApiJson;
use crate::utils::response::{created, success};

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

fn normalize_email(email: &str) -> Result<String, AppError> {
    let email = email.trim().to_lowercase();
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid {
        return Err(AppError::ValidationError(
            "Please provide a valid email address".to_string(),
        ));
    }
    Ok(email)
}

fn required<'a>(field: &str, value: &'a str) -> Result<&'a str, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::ValidationError(format!("{} is required", field)));
    }
    Ok(value)
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<Response, AppError> {
    let first_name = required("first_name", &req.first_name)?;
    let last_name = required("last_name", &req.last_name)?;
    let email = normalize_email(&req.email)?;
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::ValidationError(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    let password_hash = hash_password(&req.password).map_err(|e| {
        AppError::InternalServerError(format!("Password hashing failed: {e}"))
    })?;

    let user = db::users::insert(
        &state.pool,
        &NewUser {
            first_name,
            last_name,
            email: &email,
            phone: req.phone.as_deref().map(str::trim).filter(|p| !p.is_empty()),
            password_hash: &password_hash,
        },
    )
    .await
    .map_err(|e| AppError::on_unique_violation(e, "User already exists"))?;

    tracing::info!(user_id = %user.id, "User registered");
    Ok(created(user))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Response, AppError> {
    let invalid = || AppError::AuthError("Invalid credentials".to_string());

    let email = req.email.trim().to_lowercase();
    let user = db::users::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(&req.password, &user.password_hash) {
        return Err(invalid());
    }

    let token = create_token(
        user.id,
        user.role,
        &state.config.jwt_secret,
        state.config.jwt_expiry_hours,
    )
    .map_err(|e| AppError::InternalServerError(format!("JWT creation failed: {e}")))?;

    Ok(success(LoginResponse { token, user }))
}

/// GET /api/auth/me
pub async fn me(State(state): State<AppState>, user: AuthUser) -> Result<Response, AppError> {
    let user = db::users::find(&state.pool, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(success(user))
}
