use axum::{
    extract::{Query, State},
    middleware::from_fn,
    routing::get,
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::{ApiJson, ApiPath, ApiResponse, ApiResult};
use crate::database::models::{User, UserChanges};
use crate::error::ApiError;
use crate::middleware::require_auth;
use crate::services::users_service::{ListUsersOptions, UsersService};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_all))
        .route("/:id", get(get_by_id).put(update).delete(delete))
        .route_layer(from_fn(require_auth))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    email: Option<String>,
    page: Option<i64>,
    limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct UpdateUserRequest {
    nombre: Option<String>,
    email: Option<String>,
    // Accepted and discarded: passwords do not rotate through this route
    #[allow(dead_code)]
    password: Option<String>,
}

/// GET /api/users - paged listing, optional exact-email filter
async fn get_all(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<User>> {
    let users = UsersService::new(state.pool.clone())
        .get_all(ListUsersOptions {
            email: query.email,
            page: query.page.unwrap_or(1),
            limit: query.limit.unwrap_or(10),
        })
        .await?;

    Ok(ApiResponse::ok("Usuarios obtenidos exitosamente", users))
}

/// GET /api/users/:id
async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<User> {
    let user = UsersService::new(state.pool.clone())
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Usuario no encontrado"))?;

    Ok(ApiResponse::ok("Usuario obtenido exitosamente", user))
}

/// PUT /api/users/:id
async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateUserRequest>,
) -> ApiResult<User> {
    let changes = UserChanges {
        nombre: payload.nombre,
        email: payload.email,
    };

    let user = UsersService::new(state.pool.clone())
        .update(id, &changes)
        .await?
        .ok_or_else(|| ApiError::not_found("Usuario no encontrado"))?;

    Ok(ApiResponse::ok("Usuario actualizado exitosamente", user))
}

/// DELETE /api/users/:id
async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<serde_json::Value> {
    let deleted = UsersService::new(state.pool.clone()).delete(id).await?;

    if !deleted {
        return Err(ApiError::not_found("Usuario no encontrado"));
    }

    Ok(ApiResponse::message_only("Usuario eliminado exitosamente"))
}
