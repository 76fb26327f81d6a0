use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub biografia: String,
    pub area: String,
    pub telefono: String,
    pub ubicacion: String,
    pub sitio_web: String,
    pub imagen_url: Option<String>,
    pub redes_sociales: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile joined with the owning user's visible identity.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProfileWithUser {
    pub id: Uuid,
    pub user_id: Uuid,
    pub biografia: String,
    pub area: String,
    pub telefono: String,
    pub ubicacion: String,
    pub sitio_web: String,
    pub imagen_url: Option<String>,
    pub redes_sociales: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub nombre: String,
    pub email: String,
}

/// Profile creation payload. The wire format keeps camelCase field names;
/// the database columns stay snake_case. The owning user always comes from
/// the authenticated context, so a `userId` in the body is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileData {
    pub biografia: Option<String>,
    pub area: Option<String>,
    pub telefono: Option<String>,
    pub ubicacion: Option<String>,
    #[serde(rename = "sitioWeb")]
    pub sitio_web: Option<String>,
    #[serde(rename = "redesSociales")]
    pub redes_sociales: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileChanges {
    pub biografia: Option<String>,
    pub area: Option<String>,
    pub telefono: Option<String>,
    pub ubicacion: Option<String>,
    #[serde(rename = "sitioWeb")]
    pub sitio_web: Option<String>,
    #[serde(rename = "redesSociales")]
    pub redes_sociales: Option<Value>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.biografia.is_none()
            && self.area.is_none()
            && self.telefono.is_none()
            && self.ubicacion.is_none()
            && self.sitio_web.is_none()
            && self.redes_sociales.is_none()
    }
}
