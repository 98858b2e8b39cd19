use std::env;
use std::str::FromStr;
use std::time::Duration;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::create_security_headers_layer;

const DEV_JWT_SECRET: &str = "dev-secret-change-me";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    pub cors_allowed_origins: String,
    /// Sends HSTS; only set when served over HTTPS (`RUST_ENV=production`).
    pub hsts: bool,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    /// Mail relay endpoint; confirmations are only logged when unset.
    pub notify_webhook_url: Option<String>,
    pub mail_from: String,
    pub notify_timeout: Duration,
    pub max_showtime_range_days: i64,
}

impl Config {
    pub fn from_env() -> Self {
        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, using an insecure development secret");
            DEV_JWT_SECRET.to_string()
        });

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/cinema".to_string()),
            database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS", 5),
            port: parse_var("PORT", 5000),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| cors::DEFAULT_ALLOWED_ORIGINS.to_string()),
            hsts: env::var("RUST_ENV").is_ok_and(|v| v.eq_ignore_ascii_case("production")),
            jwt_secret,
            jwt_expiry_hours: parse_var("JWT_EXPIRY_HOURS", 1),
            notify_webhook_url: env::var("NOTIFY_WEBHOOK_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            mail_from: env::var("MAIL_FROM")
                .unwrap_or_else(|_| "HiMovie Cinema <no-reply@himovie.local>".to_string()),
            notify_timeout: Duration::from_secs(parse_var("NOTIFY_TIMEOUT_SECS", 10)),
            max_showtime_range_days: parse_var("MAX_SHOWTIME_RANGE_DAYS", 366),
        }
    }

    /// Configuration for tests; never touches the environment.
    pub fn for_tests() -> Self {
        Self {
            database_url: "postgres://localhost/cinema_test".to_string(),
            database_max_connections: 5,
            port: 0,
            cors_allowed_origins: cors::DEFAULT_ALLOWED_ORIGINS.to_string(),
            hsts: false,
            jwt_secret: "test-secret".to_string(),
            jwt_expiry_hours: 1,
            notify_webhook_url: None,
            mail_from: "test@himovie.local".to_string(),
            notify_timeout: Duration::from_secs(1),
            max_showtime_range_days: 366,
        }
    }
}

fn parse_var<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("Config: invalid value '{}' for {}, using default", raw, key);
                default
            }
        },
        Err(_) => default,
    }
}
