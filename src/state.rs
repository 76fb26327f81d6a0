use sqlx::PgPool;

/// Shared application state, injected into handlers through axum.
///
/// The pool is the only cross-request resource: constructed once at
/// startup and passed down explicitly so repositories stay testable.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}
