use axum::{
    extract::{Extension, State},
    middleware::from_fn,
    routing::get,
    Router,
};
use serde_json::Value;
use uuid::Uuid;

use crate::api::{ApiJson, ApiPath, ApiResponse, ApiResult};
use crate::database::models::{Activity, ActivityChanges, ActivityData};
use crate::error::ApiError;
use crate::middleware::{require_auth, AuthUser};
use crate::services::ActivitiesService;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_all).post(create))
        .route("/:id", get(get_by_id).put(update).delete(delete))
        .route_layer(from_fn(require_auth))
}

/// GET /api/activities
async fn get_all(State(state): State<AppState>) -> ApiResult<Vec<Activity>> {
    let activities = ActivitiesService::new(state.pool.clone()).get_all().await?;
    Ok(ApiResponse::ok("Actividades obtenidas exitosamente", activities))
}

/// GET /api/activities/:id
async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Activity> {
    let activity = ActivitiesService::new(state.pool.clone())
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Actividad no encontrada"))?;

    Ok(ApiResponse::ok("Actividad obtenida exitosamente", activity))
}

/// POST /api/activities
async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(payload): ApiJson<ActivityData>,
) -> ApiResult<Activity> {
    let activity = ActivitiesService::new(state.pool.clone())
        .create(user.id, &payload)
        .await?;

    Ok(ApiResponse::created("Actividad creada exitosamente", activity))
}

/// PUT /api/activities/:id
async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(changes): ApiJson<ActivityChanges>,
) -> ApiResult<Activity> {
    let activity = ActivitiesService::new(state.pool.clone())
        .update(id, &changes)
        .await?
        .ok_or_else(|| ApiError::not_found("Actividad no encontrada"))?;

    Ok(ApiResponse::ok("Actividad actualizada exitosamente", activity))
}

/// DELETE /api/activities/:id
async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<Uuid>) -> ApiResult<Value> {
    let deleted = ActivitiesService::new(state.pool.clone()).delete(id).await?;

    if !deleted {
        return Err(ApiError::not_found("Actividad no encontrada"));
    }

    Ok(ApiResponse::message_only("Actividad eliminada exitosamente"))
}
