use sqlx::PgPool;
use uuid::Uuid;

use crate::auth;
use crate::config;
use crate::database::models::User;
use crate::database::users::UserRepository;
use crate::error::ApiError;

pub struct LoginOutcome {
    pub token: String,
    pub id: Uuid,
}

pub struct AuthService {
    users: UserRepository,
}

impl AuthService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new identity. The email is normalized (trimmed,
    /// lowercased) before the uniqueness check and the insert.
    pub async fn register(
        &self,
        nombre: &str,
        email: &str,
        password: &str,
    ) -> Result<User, ApiError> {
        let nombre = nombre.trim();
        let email = normalize_email(email);

        let exists = self
            .users
            .find_by_email(&email)
            .await
            .map_err(|e| ApiError::from(e).or_internal("Error al registrar el usuario"))?;
        if exists.is_some() {
            return Err(ApiError::conflict("El email ya está en uso"));
        }

        let cost = config::config().security.bcrypt_cost;
        let hashed = bcrypt::hash(password, cost)?;

        let user = self
            .users
            .create(nombre, &email, &hashed)
            .await
            .map_err(|e| ApiError::from(e).or_internal("Error al registrar el usuario"))?;

        tracing::debug!(email = %user.email, "user registered");
        Ok(user)
    }

    /// Authenticate and issue a bearer token.
    ///
    /// Unknown email, identity without a stored hash and hash mismatch all
    /// produce the identical response so callers cannot tell which case
    /// occurred.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, ApiError> {
        let email = normalize_email(email);

        let user = self
            .users
            .find_by_email(&email)
            .await
            .map_err(|e| ApiError::from(e).or_internal("Error al iniciar sesión"))?
            .ok_or_else(invalid_credentials)?;

        let hash = user.password_hash.as_deref().ok_or_else(invalid_credentials)?;

        if !bcrypt::verify(password, hash)? {
            return Err(invalid_credentials());
        }

        let token = auth::issue_token(user.id, &user.email, &user.nombre)
            .map_err(|e| ApiError::internal("Error al iniciar sesión").with_detail(e.to_string()))?;

        tracing::debug!(email = %user.email, "login successful");
        Ok(LoginOutcome { token, id: user.id })
    }
}

fn invalid_credentials() -> ApiError {
    ApiError::unauthorized("Credenciales inválidas")
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(normalize_email("  Ana@X.Com "), "ana@x.com");
    }

    #[test]
    fn invalid_credentials_is_401_with_generic_message() {
        let err = invalid_credentials();
        assert_eq!(err.status_code(), axum::http::StatusCode::UNAUTHORIZED);
        assert_eq!(err.message, "Credenciales inválidas");
    }
}
