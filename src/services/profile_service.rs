use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{Profile, ProfileChanges, ProfileData, ProfileWithUser};
use crate::database::profiles::ProfileRepository;
use crate::error::ApiError;

const DEFAULT_AREA: &str = "Sin especificar";

#[derive(Debug, Clone, Default)]
pub struct ListProfilesOptions {
    pub page: i64,
    pub limit: i64,
    pub area: Option<String>,
    pub search: Option<String>,
}

pub struct ProfileService {
    profiles: ProfileRepository,
}

impl ProfileService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            profiles: ProfileRepository::new(pool),
        }
    }

    /// One profile per identity; a second creation attempt conflicts.
    pub async fn create(&self, user_id: Uuid, data: &ProfileData) -> Result<Profile, ApiError> {
        let existing = self
            .profiles
            .find_by_user_id(user_id)
            .await
            .map_err(|e| ApiError::from(e).or_internal("Error al crear el perfil"))?;
        if existing.is_some() {
            return Err(ApiError::conflict("El usuario ya tiene un perfil creado"));
        }

        let area = data.area.as_deref().unwrap_or(DEFAULT_AREA);
        let redes = data.redes_sociales.clone().unwrap_or_else(|| json!({}));

        let profile = self
            .profiles
            .create(
                user_id,
                data.biografia.as_deref().unwrap_or(""),
                area,
                data.telefono.as_deref().unwrap_or(""),
                data.ubicacion.as_deref().unwrap_or(""),
                data.sitio_web.as_deref().unwrap_or(""),
                &redes,
            )
            .await
            .map_err(|e| ApiError::from(e).or_internal("Error al crear el perfil"))?;

        tracing::debug!(user_id = %user_id, "profile created");
        Ok(profile)
    }

    /// None on absence; the caller decides the 404.
    pub async fn get_by_user_id(&self, user_id: Uuid) -> Result<Option<ProfileWithUser>, ApiError> {
        self.profiles
            .find_by_user_id(user_id)
            .await
            .map_err(|e| ApiError::from(e).or_internal("Error al obtener el perfil"))
    }

    /// Idempotent accessor: creates a default-valued profile when none
    /// exists. Not transactionally atomic; the UNIQUE constraint on the
    /// owning user column is what stops a concurrent duplicate.
    pub async fn get_or_create(&self, user_id: Uuid) -> Result<ProfileWithUser, ApiError> {
        if let Some(profile) = self.get_by_user_id(user_id).await? {
            return Ok(profile);
        }

        self.profiles
            .create(user_id, "", DEFAULT_AREA, "", "", "", &json!({}))
            .await
            .map_err(|e| ApiError::from(e).or_internal("Error al obtener o crear el perfil"))?;
        tracing::debug!(user_id = %user_id, "basic profile created");

        // Re-read through the join so the response carries nombre/email
        self.get_by_user_id(user_id)
            .await?
            .ok_or_else(|| ApiError::internal("Error al obtener o crear el perfil"))
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        changes: &ProfileChanges,
    ) -> Result<Profile, ApiError> {
        if changes.is_empty() {
            return Err(ApiError::bad_request("Datos de actualización requeridos"));
        }

        let updated = self
            .profiles
            .update(user_id, changes)
            .await
            .map_err(|e| ApiError::from(e).or_internal("Error al actualizar el perfil"))?;

        updated.ok_or_else(|| ApiError::not_found("Perfil no encontrado"))
    }

    pub async fn update_image(&self, user_id: Uuid, imagen_url: &str) -> Result<Profile, ApiError> {
        let updated = self
            .profiles
            .update_image(user_id, imagen_url)
            .await
            .map_err(|e| {
                ApiError::from(e).or_internal("Error al actualizar la imagen del perfil")
            })?;

        updated.ok_or_else(|| ApiError::not_found("Perfil no encontrado"))
    }

    pub async fn delete(&self, user_id: Uuid) -> Result<(), ApiError> {
        let deleted = self
            .profiles
            .delete(user_id)
            .await
            .map_err(|e| ApiError::from(e).or_internal("Error al eliminar el perfil"))?;

        if deleted {
            Ok(())
        } else {
            Err(ApiError::not_found("Perfil no encontrado"))
        }
    }

    pub async fn get_all(
        &self,
        options: ListProfilesOptions,
    ) -> Result<Vec<ProfileWithUser>, ApiError> {
        let page = options.page.max(1);
        let limit = options.limit.clamp(1, 100);
        let offset = (page - 1) * limit;

        self.profiles
            .list(options.area.as_deref(), options.search.as_deref(), limit, offset)
            .await
            .map_err(|e| ApiError::from(e).or_internal("Error al obtener los perfiles"))
    }
}
