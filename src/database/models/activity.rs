use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Activity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub titulo: String,
    pub descripcion: Option<String>,
    pub fecha: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActivityData {
    pub titulo: Option<String>,
    pub descripcion: Option<String>,
    pub fecha: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityChanges {
    pub titulo: Option<String>,
    pub descripcion: Option<String>,
    pub fecha: Option<DateTime<Utc>>,
}

impl ActivityChanges {
    pub fn is_empty(&self) -> bool {
        self.titulo.is_none() && self.descripcion.is_none() && self.fecha.is_none()
    }
}
