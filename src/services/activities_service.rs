use sqlx::PgPool;
use uuid::Uuid;

use crate::database::activities::ActivityRepository;
use crate::database::models::{Activity, ActivityChanges, ActivityData};
use crate::error::ApiError;

pub struct ActivitiesService {
    activities: ActivityRepository,
}

impl ActivitiesService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            activities: ActivityRepository::new(pool),
        }
    }

    pub async fn get_all(&self) -> Result<Vec<Activity>, ApiError> {
        let activities = self
            .activities
            .list()
            .await
            .map_err(|e| ApiError::from(e).or_internal("Error al obtener las actividades"))?;

        tracing::debug!(count = activities.len(), "activities retrieved");
        Ok(activities)
    }

    /// None on absence; the caller decides the 404.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Activity>, ApiError> {
        self.activities
            .find_by_id(id)
            .await
            .map_err(|e| ApiError::from(e).or_internal("Error al obtener la actividad"))
    }

    pub async fn create(&self, user_id: Uuid, data: &ActivityData) -> Result<Activity, ApiError> {
        let titulo = data
            .titulo
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::bad_request("Datos de actividad requeridos"))?;

        self.activities
            .create(user_id, titulo, data.descripcion.as_deref(), data.fecha)
            .await
            .map_err(|e| ApiError::from(e).or_internal("Error al crear la actividad"))
    }

    pub async fn update(
        &self,
        id: Uuid,
        changes: &ActivityChanges,
    ) -> Result<Option<Activity>, ApiError> {
        if changes.is_empty() {
            return Err(ApiError::bad_request("Datos de actualización requeridos"));
        }

        self.activities
            .update(id, changes)
            .await
            .map_err(|e| ApiError::from(e).or_internal("Error al actualizar la actividad"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        self.activities
            .delete(id)
            .await
            .map_err(|e| ApiError::from(e).or_internal("Error al eliminar la actividad"))
    }
}
