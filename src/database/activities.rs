use chrono::{DateTime, Utc};
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use super::models::{Activity, ActivityChanges};

pub struct ActivityRepository {
    pool: PgPool,
}

impl ActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Activity>, sqlx::Error> {
        sqlx::query_as::<_, Activity>("SELECT * FROM actividades ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Activity>, sqlx::Error> {
        sqlx::query_as::<_, Activity>("SELECT * FROM actividades WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        titulo: &str,
        descripcion: Option<&str>,
        fecha: Option<DateTime<Utc>>,
    ) -> Result<Activity, sqlx::Error> {
        sqlx::query_as::<_, Activity>(
            "INSERT INTO actividades (user_id, titulo, descripcion, fecha) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(user_id)
        .bind(titulo)
        .bind(descripcion)
        .bind(fecha)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn update(
        &self,
        id: Uuid,
        changes: &ActivityChanges,
    ) -> Result<Option<Activity>, sqlx::Error> {
        let mut qb = QueryBuilder::new("UPDATE actividades SET updated_at = NOW()");
        if let Some(titulo) = &changes.titulo {
            qb.push(", titulo = ");
            qb.push_bind(titulo);
        }
        if let Some(descripcion) = &changes.descripcion {
            qb.push(", descripcion = ");
            qb.push_bind(descripcion);
        }
        if let Some(fecha) = &changes.fecha {
            qb.push(", fecha = ");
            qb.push_bind(fecha);
        }
        qb.push(" WHERE id = ");
        qb.push_bind(id);
        qb.push(" RETURNING *");

        qb.build_query_as::<Activity>().fetch_optional(&self.pool).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM actividades WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
