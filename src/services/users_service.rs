use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{User, UserChanges};
use crate::database::users::UserRepository;
use crate::error::ApiError;

#[derive(Debug, Clone, Default)]
pub struct ListUsersOptions {
    pub email: Option<String>,
    pub page: i64,
    pub limit: i64,
}

pub struct UsersService {
    users: UserRepository,
}

impl UsersService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    pub async fn get_all(&self, options: ListUsersOptions) -> Result<Vec<User>, ApiError> {
        let page = options.page.max(1);
        let limit = options.limit.clamp(1, 100);
        let offset = (page - 1) * limit;

        let users = self
            .users
            .list(options.email.as_deref(), limit, offset)
            .await
            .map_err(|e| ApiError::from(e).or_internal("Error al obtener los usuarios"))?;

        tracing::debug!(count = users.len(), "users retrieved");
        Ok(users)
    }

    /// None on absence; the caller decides the 404.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        self.users
            .find_by_id(id)
            .await
            .map_err(|e| ApiError::from(e).or_internal("Error al obtener el usuario"))
    }

    pub async fn update(&self, id: Uuid, changes: &UserChanges) -> Result<Option<User>, ApiError> {
        if changes.is_empty() {
            return Err(ApiError::bad_request("Datos de actualización requeridos"));
        }

        self.users
            .update(id, changes)
            .await
            .map_err(|e| ApiError::from(e).or_internal("Error al actualizar el usuario"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        self.users
            .delete(id)
            .await
            .map_err(|e| ApiError::from(e).or_internal("Error al eliminar el usuario"))
    }
}
