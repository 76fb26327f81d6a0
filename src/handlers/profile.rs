use axum::{
    extract::{Extension, Query, State},
    middleware::from_fn,
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::api::{ApiJson, ApiPath, ApiResponse, ApiResult};
use crate::database::models::{Profile, ProfileChanges, ProfileData, ProfileWithUser};
use crate::error::ApiError;
use crate::middleware::{require_auth, AuthUser};
use crate::services::profile_service::{ListProfilesOptions, ProfileService};
use crate::state::AppState;
use crate::validation;

pub fn routes() -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create))
        .route("/me", get(me).put(update_me).delete(delete_me))
        .route("/:user_id", get(get_one).put(update_one).delete(delete_one))
        .route("/:user_id/image", put(update_image))
        .route_layer(from_fn(require_auth));

    // Directory endpoints are public
    Router::new()
        .route("/search", get(search))
        .route("/all", get(get_all))
        .merge(protected)
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    page: Option<i64>,
    limit: Option<i64>,
    area: Option<String>,
    q: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImageRequest {
    #[serde(rename = "imageUrl")]
    image_url: Option<String>,
}

/// POST /api/profile - create the caller's profile
async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(payload): ApiJson<ProfileData>,
) -> ApiResult<Profile> {
    validation::validate_profile_fields(
        payload.biografia.as_deref(),
        payload.area.as_deref(),
        payload.telefono.as_deref(),
        payload.ubicacion.as_deref(),
        payload.sitio_web.as_deref(),
        true,
    )?;

    let profile = ProfileService::new(state.pool.clone())
        .create(user.id, &payload)
        .await?;

    Ok(ApiResponse::created("Perfil creado exitosamente", profile))
}

/// GET /api/profile/me - idempotent: creates a default profile when absent
async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<ProfileWithUser> {
    let profile = ProfileService::new(state.pool.clone())
        .get_or_create(user.id)
        .await?;

    Ok(ApiResponse::ok("Perfil obtenido exitosamente", profile))
}

/// GET /api/profile/:user_id
async fn get_one(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<Uuid>,
) -> ApiResult<ProfileWithUser> {
    let profile = ProfileService::new(state.pool.clone())
        .get_by_user_id(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Perfil no encontrado"))?;

    Ok(ApiResponse::ok("Perfil obtenido exitosamente", profile))
}

/// PUT /api/profile/me
async fn update_me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(changes): ApiJson<ProfileChanges>,
) -> ApiResult<Profile> {
    apply_update(&state, user.id, changes).await
}

/// PUT /api/profile/:user_id - owner only
async fn update_one(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath(user_id): ApiPath<Uuid>,
    ApiJson(changes): ApiJson<ProfileChanges>,
) -> ApiResult<Profile> {
    if user_id != user.id {
        return Err(ApiError::forbidden(
            "No tienes permisos para actualizar este perfil",
        ));
    }
    apply_update(&state, user_id, changes).await
}

async fn apply_update(
    state: &AppState,
    user_id: Uuid,
    changes: ProfileChanges,
) -> ApiResult<Profile> {
    validation::validate_profile_fields(
        changes.biografia.as_deref(),
        changes.area.as_deref(),
        changes.telefono.as_deref(),
        changes.ubicacion.as_deref(),
        changes.sitio_web.as_deref(),
        false,
    )?;

    let profile = ProfileService::new(state.pool.clone())
        .update(user_id, &changes)
        .await?;

    Ok(ApiResponse::ok("Perfil actualizado exitosamente", profile))
}

/// PUT /api/profile/:user_id/image - owner only
async fn update_image(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath(user_id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<ImageRequest>,
) -> ApiResult<Profile> {
    if user_id != user.id {
        return Err(ApiError::forbidden(
            "No tienes permisos para actualizar esta imagen",
        ));
    }

    let image_url = payload
        .image_url
        .as_deref()
        .filter(|url| !url.is_empty())
        .ok_or_else(|| ApiError::bad_request("URL de imagen requerida"))?;

    let profile = ProfileService::new(state.pool.clone())
        .update_image(user_id, image_url)
        .await?;

    Ok(ApiResponse::ok(
        "Imagen de perfil actualizada exitosamente",
        profile,
    ))
}

/// DELETE /api/profile/me
async fn delete_me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Value> {
    ProfileService::new(state.pool.clone()).delete(user.id).await?;
    Ok(ApiResponse::message_only("Perfil eliminado exitosamente"))
}

/// DELETE /api/profile/:user_id - owner only
async fn delete_one(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath(user_id): ApiPath<Uuid>,
) -> ApiResult<Value> {
    if user_id != user.id {
        return Err(ApiError::forbidden(
            "No tienes permisos para eliminar este perfil",
        ));
    }

    ProfileService::new(state.pool.clone()).delete(user_id).await?;
    Ok(ApiResponse::message_only("Perfil eliminado exitosamente"))
}

/// GET /api/profile/all - public directory listing
async fn get_all(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Value> {
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(10);

    let profiles = ProfileService::new(state.pool.clone())
        .get_all(ListProfilesOptions {
            page,
            limit,
            area: query.area,
            search: None,
        })
        .await?;

    let total = profiles.len();
    Ok(ApiResponse::ok(
        "Perfiles obtenidos exitosamente",
        json!({
            "profiles": profiles,
            "pagination": { "page": page, "limit": limit, "total": total },
        }),
    ))
}

/// GET /api/profile/search?q=...&area=... - public search
async fn search(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Value> {
    if query.q.is_none() && query.area.is_none() {
        return Err(ApiError::bad_request("Término de búsqueda o área requerida"));
    }

    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(10);

    let profiles = ProfileService::new(state.pool.clone())
        .get_all(ListProfilesOptions {
            page,
            limit,
            area: query.area.clone(),
            search: query.q.clone(),
        })
        .await?;

    let total = profiles.len();
    Ok(ApiResponse::ok(
        "Búsqueda de perfiles completada",
        json!({
            "profiles": profiles,
            "pagination": { "page": page, "limit": limit, "total": total },
            "searchTerm": query.q,
            "area": query.area,
        }),
    ))
}
