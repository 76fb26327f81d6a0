use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::{ApiJson, ApiResponse, ApiResult};
use crate::error::ApiError;
use crate::middleware::{rate_limit, require_auth, AuthUser, FixedWindowLimiter};
use crate::services::AuthService;
use crate::state::AppState;
use crate::validation;

pub fn routes(auth_limiter: Arc<FixedWindowLimiter>) -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route(
            "/register",
            post(register).layer(from_fn_with_state(auth_limiter, rate_limit)),
        )
        .route("/verify", get(verify).layer(from_fn(require_auth)))
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RegisterRequest {
    nombre: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

/// POST /api/auth/login - authenticate and receive a bearer token
async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> ApiResult<Value> {
    let (email, password) = match (payload.email.as_deref(), payload.password.as_deref()) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            (email, password)
        }
        _ => return Err(ApiError::bad_request("Email y contraseña son requeridos")),
    };

    let result = AuthService::new(state.pool.clone()).login(email, password).await?;

    Ok(ApiResponse::ok(
        "Inicio de sesión exitoso",
        json!({ "token": result.token, "id": result.id }),
    ))
}

/// POST /api/auth/register - create a new account
async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> ApiResult<Value> {
    let (nombre, email, password) = match (
        payload.nombre.as_deref(),
        payload.email.as_deref(),
        payload.password.as_deref(),
    ) {
        (Some(nombre), Some(email), Some(password))
            if !nombre.is_empty() && !email.is_empty() && !password.is_empty() =>
        {
            (nombre, email, password)
        }
        _ => return Err(ApiError::bad_request("Todos los campos son requeridos")),
    };

    validation::validate_register(nombre, email, password)?;

    let user = AuthService::new(state.pool.clone())
        .register(nombre, email, password)
        .await?;

    Ok(ApiResponse::created(
        "Usuario creado exitosamente",
        json!({
            "user": {
                "id": user.id,
                "nombre": user.nombre,
                "email": user.email,
            }
        }),
    ))
}

/// GET /api/auth/verify - report the identity behind a valid token
async fn verify(Extension(user): Extension<AuthUser>) -> ApiResult<Value> {
    Ok(ApiResponse::ok(
        "Token válido",
        json!({
            "user": {
                "id": user.id,
                "email": user.email,
            }
        }),
    ))
}
