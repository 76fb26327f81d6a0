// HTTP API error pipeline: every failure in the service funnels through
// ApiError and is written as the envelope error shape exactly once.
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::config;

/// Error classification; determines the HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    // 400
    BadRequest,
    // 401
    Unauthorized,
    // 403
    Forbidden,
    // 404
    NotFound,
    // 409
    Conflict,
    // 429
    TooManyRequests,
    // 500 - message suppressed from clients in production
    Internal,
}

/// Field-level validation failure, rendered in the envelope `errors` array.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Application error with explicit kind, client message and operational flag.
///
/// `detail` carries internal context (driver errors, hash failures). It is
/// logged and, outside production, echoed under `stack` in the body.
#[derive(Debug)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
    pub errors: Option<Vec<FieldError>>,
    pub detail: Option<String>,
}

impl ApiError {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            errors: None,
            detail: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self {
            errors: Some(errors),
            ..Self::new(ErrorKind::BadRequest, "Datos de entrada inválidos")
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    pub fn too_many_requests(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TooManyRequests, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Expected failures whose message is safe to surface as-is.
    pub fn is_operational(&self) -> bool {
        self.kind != ErrorKind::Internal
    }

    /// Re-throw operational errors unchanged; replace the client message of
    /// anything else while keeping the internal detail for the logs.
    pub fn or_internal(self, message: &str) -> Self {
        if self.is_operational() {
            self
        } else {
            Self {
                message: message.to_string(),
                ..self
            }
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind {
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Internal errors are masked in production.
    pub fn client_message(&self) -> &str {
        if !self.is_operational() && config::config().is_production() {
            "Error interno del servidor"
        } else {
            &self.message
        }
    }

    /// Envelope error shape: { success, message, errors?, timestamp, stack? }.
    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "success": false,
            "message": self.client_message(),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });

        if let Some(errors) = &self.errors {
            body["errors"] = json!(errors);
        }

        if !config::config().is_production() {
            if let Some(detail) = &self.detail {
                body["stack"] = json!(detail);
            }
        }

        body
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

// Storage-layer errors are reclassified into the taxonomy with friendly
// messages; driver detail is kept for the logs only.
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => ApiError::not_found("Recurso no encontrado"),
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                // unique_violation
                Some("23505") => ApiError::conflict("El recurso ya existe")
                    .with_detail(db_err.to_string()),
                // foreign_key_violation
                Some("23503") => ApiError::bad_request("Referencia inválida")
                    .with_detail(db_err.to_string()),
                // syntax_error
                Some("42601") => ApiError::internal("Error en la consulta a la base de datos")
                    .with_detail(db_err.to_string()),
                _ => ApiError::internal("Error de base de datos").with_detail(db_err.to_string()),
            },
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                ApiError::internal("Error de conexión a la base de datos")
                    .with_detail(err.to_string())
            }
            _ => ApiError::internal("Error de base de datos").with_detail(err.to_string()),
        }
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(err: bcrypt::BcryptError) -> Self {
        ApiError::internal("Error interno del servidor").with_detail(err.to_string())
    }
}

// Single funnel: the only place an error body is written.
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();

        if self.is_operational() {
            tracing::debug!(status = %status, message = %self.message, "operational error");
        } else {
            tracing::error!(
                status = %status,
                message = %self.message,
                detail = self.detail.as_deref().unwrap_or("-"),
                "unexpected error"
            );
        }

        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_kind() {
        assert_eq!(ApiError::bad_request("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::unauthorized("x").status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::forbidden("x").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::conflict("x").status_code(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::internal("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn operational_flag_excludes_internal() {
        assert!(ApiError::not_found("x").is_operational());
        assert!(ApiError::conflict("x").is_operational());
        assert!(!ApiError::internal("x").is_operational());
    }

    #[test]
    fn envelope_shape_carries_errors_only_for_validation() {
        let plain = ApiError::not_found("Recurso no encontrado").to_json();
        assert_eq!(plain["success"], false);
        assert_eq!(plain["message"], "Recurso no encontrado");
        assert!(plain.get("errors").is_none());
        assert!(plain.get("timestamp").is_some());

        let invalid = ApiError::validation(vec![FieldError::new("email", "El email es requerido")]);
        let body = invalid.to_json();
        assert_eq!(body["message"], "Datos de entrada inválidos");
        assert_eq!(body["errors"][0]["field"], "email");
    }

    #[test]
    fn sqlx_row_not_found_maps_to_404() {
        // RowNotFound is the only sqlx variant constructible without a live
        // database; the code-based mappings are covered end to end.
        let err: ApiError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[test]
    fn pool_errors_map_to_friendly_connection_message() {
        let err: ApiError = sqlx::Error::PoolTimedOut.into();
        assert_eq!(err.kind, ErrorKind::Internal);
        assert_eq!(err.message, "Error de conexión a la base de datos");
    }
}
