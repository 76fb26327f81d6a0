use axum::{extract::State, middleware::from_fn, routing::get, Router};

use crate::api::{ApiJson, ApiPath, ApiResponse, ApiResult};
use crate::database::models::{PlatformChanges, PlatformConfig};
use crate::error::ApiError;
use crate::middleware::require_auth;
use crate::services::PlatformService;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/:id", get(get_config).put(update_config))
        .route_layer(from_fn(require_auth))
}

/// GET /api/configuracion/:id
async fn get_config(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<PlatformConfig> {
    let config = PlatformService::new(state.pool.clone())
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Formulario base no encontrado"))?;

    Ok(ApiResponse::ok("Formulario obtenido exitosamente", config))
}

/// PUT /api/configuracion/:id
async fn update_config(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(changes): ApiJson<PlatformChanges>,
) -> ApiResult<PlatformConfig> {
    let config = PlatformService::new(state.pool.clone())
        .update(id, &changes)
        .await?
        .ok_or_else(|| ApiError::not_found("Formulario base no encontrado"))?;

    Ok(ApiResponse::ok("Formulario actualizado correctamente", config))
}
