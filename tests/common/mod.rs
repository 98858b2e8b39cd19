#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use cinema_server::auth::token::create_token;
use cinema_server::config::Config;
use cinema_server::models::UserRole;
use cinema_server::notification::{ConsoleNotifier, Notifier};
use cinema_server::routes::create_routes;
use cinema_server::state::AppState;

pub fn state_with_pool(pool: PgPool) -> AppState {
    let config = Config::for_tests();
    let notifier = Arc::new(ConsoleNotifier::new(config.mail_from.clone()));
    AppState::new(pool, config, notifier)
}

pub fn app_with_notifier(pool: PgPool, notifier: Arc<dyn Notifier>) -> Router {
    create_routes(AppState::new(pool, Config::for_tests(), notifier))
}

/// Router over a pool that never connects; only usable for requests that are
/// rejected before reaching the database.
pub fn offline_app() -> Router {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://cinema@127.0.0.1:1/unreachable")
        .expect("lazy pool");
    create_routes(state_with_pool(pool))
}

/// Connects to `DATABASE_URL` and applies migrations.
pub async fn database() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&url)
        .await
        .expect("connect to test database");
    sqlx::migrate!().run(&pool).await.expect("run migrations");
    pool
}

pub fn token_for(user_id: Uuid, role: UserRole) -> String {
    create_token(user_id, role, &Config::for_tests().jwt_secret, 1).expect("token")
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
