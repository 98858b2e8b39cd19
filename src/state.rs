use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::notification::Notifier;

/// Shared by every request. The pool is the only connection to mutable state;
/// nothing about seats is cached in-process.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(pool: PgPool, config: Config, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            notifier,
        }
    }
}
