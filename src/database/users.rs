use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use super::models::{User, UserChanges};

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM usuarios WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM usuarios WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn create(
        &self,
        nombre: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "INSERT INTO usuarios (nombre, email, password_hash) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(nombre)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn list(
        &self,
        email: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>, sqlx::Error> {
        let mut qb = QueryBuilder::new("SELECT * FROM usuarios");
        if let Some(email) = email {
            qb.push(" WHERE email = ");
            qb.push_bind(email);
        }
        qb.push(" ORDER BY created_at DESC LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(offset);

        qb.build_query_as::<User>().fetch_all(&self.pool).await
    }

    /// Dynamic partial update; None when no row matched the id.
    pub async fn update(
        &self,
        id: Uuid,
        changes: &UserChanges,
    ) -> Result<Option<User>, sqlx::Error> {
        let mut qb = QueryBuilder::new("UPDATE usuarios SET updated_at = NOW()");
        if let Some(nombre) = &changes.nombre {
            qb.push(", nombre = ");
            qb.push_bind(nombre);
        }
        if let Some(email) = &changes.email {
            qb.push(", email = ");
            qb.push_bind(email);
        }
        qb.push(" WHERE id = ");
        qb.push_bind(id);
        qb.push(" RETURNING *");

        qb.build_query_as::<User>().fetch_optional(&self.pool).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM usuarios WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
