use axum::{
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::{self, Claims, TokenError};
use crate::error::ApiError;

/// Authenticated user context extracted from the bearer token, attached as
/// a request extension and discarded at request end.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub nombre: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            nombre: claims.nombre,
        }
    }
}

/// Authentication gate for protected routes.
///
/// Missing or malformed `Authorization` header short-circuits with 401;
/// an invalid or expired token with 403. The next stage only runs once
/// the claims are attached to the request.
pub async fn require_auth(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let token = extract_bearer(request.headers())
        .ok_or_else(|| ApiError::unauthorized("Token de acceso requerido"))?;

    let claims = auth::verify_token(&token).map_err(|err| match err {
        TokenError::Expired | TokenError::Invalid => {
            ApiError::forbidden("Token inválido o expirado")
        }
        TokenError::MissingSecret => {
            ApiError::internal("Error interno del servidor").with_detail(err.to_string())
        }
    })?;

    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

/// Pull the token out of `Authorization: Bearer <token>`.
fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
