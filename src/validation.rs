//! Field validators for request payloads. Rules and messages follow the
//! platform's registration and profile schemas; failures surface through
//! the envelope `errors` array as a 400.

use crate::error::{ApiError, FieldError};

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 50;
const PASSWORD_MIN: usize = 6;
const PASSWORD_MAX: usize = 100;
const BIO_MAX: usize = 500;
const AREA_MAX: usize = 100;
const PHONE_MAX: usize = 20;
const LOCATION_MAX: usize = 100;

pub fn validate_register(nombre: &str, email: &str, password: &str) -> Result<(), ApiError> {
    let mut errors = Vec::new();

    let len = nombre.chars().count();
    if len < NAME_MIN {
        errors.push(FieldError::new(
            "nombre",
            "El nombre debe tener al menos 2 caracteres",
        ));
    } else if len > NAME_MAX {
        errors.push(FieldError::new(
            "nombre",
            "El nombre no puede exceder 50 caracteres",
        ));
    }

    if !is_valid_email(email) {
        errors.push(FieldError::new(
            "email",
            "El email debe tener un formato válido",
        ));
    }

    let len = password.chars().count();
    if len < PASSWORD_MIN {
        errors.push(FieldError::new(
            "password",
            "La contraseña debe tener al menos 6 caracteres",
        ));
    } else if len > PASSWORD_MAX {
        errors.push(FieldError::new(
            "password",
            "La contraseña no puede exceder 100 caracteres",
        ));
    } else if !has_required_character_classes(password) {
        errors.push(FieldError::new(
            "password",
            "La contraseña debe contener al menos una letra minúscula, una mayúscula y un número",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation(errors))
    }
}

/// Shared rules for profile create/update. `require_area` distinguishes
/// creation (area mandatory) from partial update.
pub fn validate_profile_fields(
    biografia: Option<&str>,
    area: Option<&str>,
    telefono: Option<&str>,
    ubicacion: Option<&str>,
    sitio_web: Option<&str>,
    require_area: bool,
) -> Result<(), ApiError> {
    let mut errors = Vec::new();

    if let Some(biografia) = biografia {
        if biografia.chars().count() > BIO_MAX {
            errors.push(FieldError::new(
                "biografia",
                "La biografía no puede exceder 500 caracteres",
            ));
        }
    }

    match area {
        Some(area) if area.chars().count() > AREA_MAX => {
            errors.push(FieldError::new(
                "area",
                "El área no puede exceder 100 caracteres",
            ));
        }
        None if require_area => {
            errors.push(FieldError::new("area", "El área es requerida"));
        }
        _ => {}
    }

    if let Some(telefono) = telefono {
        if telefono.chars().count() > PHONE_MAX {
            errors.push(FieldError::new(
                "telefono",
                "El teléfono no puede exceder 20 caracteres",
            ));
        } else if !is_valid_phone(telefono) {
            errors.push(FieldError::new(
                "telefono",
                "El teléfono debe tener un formato válido",
            ));
        }
    }

    if let Some(ubicacion) = ubicacion {
        if ubicacion.chars().count() > LOCATION_MAX {
            errors.push(FieldError::new(
                "ubicacion",
                "La ubicación no puede exceder 100 caracteres",
            ));
        }
    }

    if let Some(sitio_web) = sitio_web {
        if !sitio_web.is_empty() && !is_valid_url(sitio_web) {
            errors.push(FieldError::new(
                "sitioWeb",
                "El sitio web debe ser una URL válida",
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation(errors))
    }
}

fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.contains(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let (local, domain) = match (parts.next(), parts.next()) {
        (Some(local), Some(domain)) => (local, domain),
        _ => return false,
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    // Domain needs a dot with content on both sides
    domain.split('.').count() >= 2 && !domain.starts_with('.') && !domain.ends_with('.')
}

fn has_required_character_classes(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

fn is_valid_phone(telefono: &str) -> bool {
    // Empty is allowed; digits plus common separators otherwise
    telefono.is_empty()
        || telefono
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'))
}

fn is_valid_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    match rest {
        Some(rest) => !rest.is_empty() && !rest.contains(char::is_whitespace),
        None => false,
    }
}
