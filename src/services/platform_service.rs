use sqlx::PgPool;

use crate::database::models::{PlatformChanges, PlatformConfig};
use crate::database::platform::PlatformRepository;
use crate::error::ApiError;

pub struct PlatformService {
    platform: PlatformRepository,
}

impl PlatformService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            platform: PlatformRepository::new(pool),
        }
    }

    /// None on absence; the caller decides the 404.
    pub async fn get(&self, id: i32) -> Result<Option<PlatformConfig>, ApiError> {
        self.platform
            .get(id)
            .await
            .map_err(|e| ApiError::from(e).or_internal("Error al obtener el formulario"))
    }

    pub async fn update(
        &self,
        id: i32,
        changes: &PlatformChanges,
    ) -> Result<Option<PlatformConfig>, ApiError> {
        if changes.is_empty() {
            return Err(ApiError::bad_request("Datos de actualización requeridos"));
        }

        self.platform
            .update(id, changes)
            .await
            .map_err(|e| ApiError::from(e).or_internal("Error al actualizar el formulario"))
    }
}
