use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::OriginalUri,
    http::{header, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use calendario_api::config;
use calendario_api::database;
use calendario_api::error::ApiError;
use calendario_api::handlers;
use calendario_api::middleware::{rate_limit, security_headers, FixedWindowLimiter};
use calendario_api::state::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DB_*, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "calendario_api=debug,tower_http=info".into()),
        )
        .init();

    let config = config::config();
    if let Err(err) = config.validate() {
        tracing::error!("Invalid configuration: {}", err);
        std::process::exit(1);
    }

    let pool = database::connect_lazy(&config.database);
    let app = app(AppState { pool });

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Server running on http://localhost:{}", config.server.port);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .expect("server");
}

fn app(state: AppState) -> Router {
    let cfg = config::config();

    let general_limiter = Arc::new(FixedWindowLimiter::new(
        Duration::from_secs(cfg.rate_limit.window_secs),
        cfg.rate_limit.max_requests,
        "Demasiadas solicitudes, intenta más tarde",
    ));
    let auth_limiter = Arc::new(FixedWindowLimiter::new(
        Duration::from_secs(cfg.rate_limit.auth_window_secs),
        cfg.rate_limit.auth_max_requests,
        "Demasiados intentos de login, intenta en 15 minutos",
    ));

    Router::new()
        // Public
        .route("/health", get(handlers::health::health))
        // Resource routers (protection is opted into per route)
        .nest("/api/auth", handlers::auth::routes(auth_limiter))
        .nest("/api/users", handlers::users::routes())
        .nest("/api/profile", handlers::profile::routes())
        .nest("/api/activities", handlers::activities::routes())
        .nest("/api/configuracion", handlers::platform::routes())
        // Unmatched paths go through the same error funnel
        .fallback(not_found)
        // Global middleware
        .layer(from_fn(security_headers))
        .layer(from_fn_with_state(general_limiter, rate_limit))
        .layer(cors_layer(&cfg.server.frontend_url))
        .layer(RequestBodyLimitLayer::new(cfg.server.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(frontend_url: &str) -> CorsLayer {
    let origin = frontend_url
        .parse::<HeaderValue>()
        .unwrap_or_else(|_| HeaderValue::from_static("http://localhost:4200"));

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

async fn not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::not_found(format!("Ruta no encontrada: {uri}"))
}
