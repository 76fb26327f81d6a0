use serde_json::Value;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use super::models::{Profile, ProfileChanges, ProfileWithUser};

const JOINED_COLUMNS: &str = "up.id, up.user_id, up.biografia, up.area, up.telefono, \
     up.ubicacion, up.sitio_web, up.imagen_url, up.redes_sociales, \
     up.created_at, up.updated_at, u.nombre, u.email";

pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        biografia: &str,
        area: &str,
        telefono: &str,
        ubicacion: &str,
        sitio_web: &str,
        redes_sociales: &Value,
    ) -> Result<Profile, sqlx::Error> {
        sqlx::query_as::<_, Profile>(
            "INSERT INTO user_profiles \
             (user_id, biografia, area, telefono, ubicacion, sitio_web, redes_sociales) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(user_id)
        .bind(biografia)
        .bind(area)
        .bind(telefono)
        .bind(ubicacion)
        .bind(sitio_web)
        .bind(redes_sociales)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<ProfileWithUser>, sqlx::Error> {
        sqlx::query_as::<_, ProfileWithUser>(&format!(
            "SELECT {JOINED_COLUMNS} \
             FROM user_profiles up \
             JOIN usuarios u ON up.user_id = u.id \
             WHERE up.user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Dynamic partial update; None when the user has no profile.
    pub async fn update(
        &self,
        user_id: Uuid,
        changes: &ProfileChanges,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let mut qb = QueryBuilder::new("UPDATE user_profiles SET updated_at = NOW()");
        if let Some(biografia) = &changes.biografia {
            qb.push(", biografia = ");
            qb.push_bind(biografia);
        }
        if let Some(area) = &changes.area {
            qb.push(", area = ");
            qb.push_bind(area);
        }
        if let Some(telefono) = &changes.telefono {
            qb.push(", telefono = ");
            qb.push_bind(telefono);
        }
        if let Some(ubicacion) = &changes.ubicacion {
            qb.push(", ubicacion = ");
            qb.push_bind(ubicacion);
        }
        if let Some(sitio_web) = &changes.sitio_web {
            qb.push(", sitio_web = ");
            qb.push_bind(sitio_web);
        }
        if let Some(redes_sociales) = &changes.redes_sociales {
            qb.push(", redes_sociales = ");
            qb.push_bind(redes_sociales);
        }
        qb.push(" WHERE user_id = ");
        qb.push_bind(user_id);
        qb.push(" RETURNING *");

        qb.build_query_as::<Profile>().fetch_optional(&self.pool).await
    }

    pub async fn update_image(
        &self,
        user_id: Uuid,
        imagen_url: &str,
    ) -> Result<Option<Profile>, sqlx::Error> {
        sqlx::query_as::<_, Profile>(
            "UPDATE user_profiles \
             SET imagen_url = $1, updated_at = NOW() \
             WHERE user_id = $2 \
             RETURNING *",
        )
        .bind(imagen_url)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn delete(&self, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_profiles WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Paged listing with optional area filter and free-text search over
    /// area, biografia, ubicacion and the owner's nombre.
    pub async fn list(
        &self,
        area: Option<&str>,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ProfileWithUser>, sqlx::Error> {
        let mut qb = QueryBuilder::new(format!(
            "SELECT {JOINED_COLUMNS} \
             FROM user_profiles up \
             JOIN usuarios u ON up.user_id = u.id \
             WHERE TRUE"
        ));
        if let Some(area) = area {
            qb.push(" AND up.area ILIKE ");
            qb.push_bind(format!("%{area}%"));
        }
        if let Some(search) = search {
            let pattern = format!("%{search}%");
            qb.push(" AND (up.area ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR up.biografia ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR up.ubicacion ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR u.nombre ILIKE ");
            qb.push_bind(pattern);
            qb.push(")");
        }
        qb.push(" ORDER BY up.updated_at DESC LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(offset);

        qb.build_query_as::<ProfileWithUser>().fetch_all(&self.pool).await
    }
}
