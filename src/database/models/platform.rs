use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Site-wide parameters. A singleton row keyed by a fixed id.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PlatformConfig {
    pub id: i32,
    pub logo_url: Option<String>,
    pub color_hex: Option<String>,
    pub ruta_almacenamiento: Option<String>,
    pub idioma: Option<String>,
    pub tiempo_sesion_minutos: Option<i32>,
    pub requiere_autenticacion: Option<bool>,
    pub mostrar_dashboard: Option<bool>,
    pub mostrar_carousel: Option<bool>,
    pub pass_longitud_minima: Option<i32>,
    pub pass_caducidad_dias: Option<i32>,
    pub nombre_sitio: Option<String>,
    pub favicon_url: Option<String>,
    pub email_soporte: Option<String>,
    pub modo_mantenimiento: Option<bool>,
    pub max_intentos_login: Option<i32>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlatformChanges {
    pub logo_url: Option<String>,
    pub color_hex: Option<String>,
    pub ruta_almacenamiento: Option<String>,
    pub idioma: Option<String>,
    pub tiempo_sesion_minutos: Option<i32>,
    pub requiere_autenticacion: Option<bool>,
    pub mostrar_dashboard: Option<bool>,
    pub mostrar_carousel: Option<bool>,
    pub pass_longitud_minima: Option<i32>,
    pub pass_caducidad_dias: Option<i32>,
    pub nombre_sitio: Option<String>,
    pub favicon_url: Option<String>,
    pub email_soporte: Option<String>,
    pub modo_mantenimiento: Option<bool>,
    pub max_intentos_login: Option<i32>,
}

impl PlatformChanges {
    pub fn is_empty(&self) -> bool {
        self.logo_url.is_none()
            && self.color_hex.is_none()
            && self.ruta_almacenamiento.is_none()
            && self.idioma.is_none()
            && self.tiempo_sesion_minutos.is_none()
            && self.requiere_autenticacion.is_none()
            && self.mostrar_dashboard.is_none()
            && self.mostrar_carousel.is_none()
            && self.pass_longitud_minima.is_none()
            && self.pass_caducidad_dias.is_none()
            && self.nombre_sitio.is_none()
            && self.favicon_url.is_none()
            && self.email_soporte.is_none()
            && self.modo_mantenimiento.is_none()
            && self.max_intentos_login.is_none()
    }
}
