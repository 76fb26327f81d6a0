use sqlx::{PgPool, QueryBuilder};

use super::models::{PlatformChanges, PlatformConfig};

pub struct PlatformRepository {
    pool: PgPool,
}

impl PlatformRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, id: i32) -> Result<Option<PlatformConfig>, sqlx::Error> {
        sqlx::query_as::<_, PlatformConfig>("SELECT * FROM plataforma WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Dynamic partial update; None when the row does not exist.
    pub async fn update(
        &self,
        id: i32,
        changes: &PlatformChanges,
    ) -> Result<Option<PlatformConfig>, sqlx::Error> {
        let mut qb = QueryBuilder::new("UPDATE plataforma SET updated_at = NOW()");
        if let Some(logo_url) = &changes.logo_url {
            qb.push(", logo_url = ");
            qb.push_bind(logo_url);
        }
        if let Some(color_hex) = &changes.color_hex {
            qb.push(", color_hex = ");
            qb.push_bind(color_hex);
        }
        if let Some(ruta) = &changes.ruta_almacenamiento {
            qb.push(", ruta_almacenamiento = ");
            qb.push_bind(ruta);
        }
        if let Some(idioma) = &changes.idioma {
            qb.push(", idioma = ");
            qb.push_bind(idioma);
        }
        if let Some(minutos) = changes.tiempo_sesion_minutos {
            qb.push(", tiempo_sesion_minutos = ");
            qb.push_bind(minutos);
        }
        if let Some(requiere) = changes.requiere_autenticacion {
            qb.push(", requiere_autenticacion = ");
            qb.push_bind(requiere);
        }
        if let Some(dashboard) = changes.mostrar_dashboard {
            qb.push(", mostrar_dashboard = ");
            qb.push_bind(dashboard);
        }
        if let Some(carousel) = changes.mostrar_carousel {
            qb.push(", mostrar_carousel = ");
            qb.push_bind(carousel);
        }
        if let Some(longitud) = changes.pass_longitud_minima {
            qb.push(", pass_longitud_minima = ");
            qb.push_bind(longitud);
        }
        if let Some(caducidad) = changes.pass_caducidad_dias {
            qb.push(", pass_caducidad_dias = ");
            qb.push_bind(caducidad);
        }
        if let Some(nombre_sitio) = &changes.nombre_sitio {
            qb.push(", nombre_sitio = ");
            qb.push_bind(nombre_sitio);
        }
        if let Some(favicon_url) = &changes.favicon_url {
            qb.push(", favicon_url = ");
            qb.push_bind(favicon_url);
        }
        if let Some(email_soporte) = &changes.email_soporte {
            qb.push(", email_soporte = ");
            qb.push_bind(email_soporte);
        }
        if let Some(mantenimiento) = changes.modo_mantenimiento {
            qb.push(", modo_mantenimiento = ");
            qb.push_bind(mantenimiento);
        }
        if let Some(intentos) = changes.max_intentos_login {
            qb.push(", max_intentos_login = ");
            qb.push_bind(intentos);
        }
        qb.push(" WHERE id = ");
        qb.push_bind(id);
        qb.push(" RETURNING *");

        qb.build_query_as::<PlatformConfig>()
            .fetch_optional(&self.pool)
            .await
    }
}
