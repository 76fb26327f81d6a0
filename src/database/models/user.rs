use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub nombre: String,
    pub email: String,
    // Never serialized: the hash must not reach clients
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mutable user fields; everything else is fixed at registration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserChanges {
    pub nombre: Option<String>,
    pub email: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.nombre.is_none() && self.email.is_none()
    }
}
