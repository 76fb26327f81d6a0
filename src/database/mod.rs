pub mod activities;
pub mod models;
pub mod platform;
pub mod profiles;
pub mod users;

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use crate::config::DatabaseConfig;

/// Build the process-wide connection pool.
///
/// The pool is lazy: no connection is opened until the first query, so the
/// server starts even when the database is still coming up. Each operation
/// checks a connection out for its duration and sqlx returns it to the pool
/// on every exit path.
pub fn connect_lazy(cfg: &DatabaseConfig) -> PgPool {
    let options = PgConnectOptions::new()
        .host(&cfg.host)
        .port(cfg.port)
        .username(&cfg.user)
        .password(&cfg.password)
        .database(&cfg.name);

    PgPoolOptions::new()
        .max_connections(cfg.max_connections)
        .acquire_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(30))
        .connect_lazy_with(options)
}
