use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config;

pub const TOKEN_ISSUER: &str = "calendario-app";
pub const TOKEN_AUDIENCE: &str = "calendario-users";

/// Identity claims carried by a bearer token. Never persisted server-side:
/// validity is purely a function of signature and expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub nombre: String,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
    pub aud: String,
}

impl Claims {
    pub fn new(sub: Uuid, email: String, nombre: String, ttl_secs: i64) -> Self {
        let now = Utc::now();
        Self {
            sub,
            email,
            nombre,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl_secs)).timestamp(),
            iss: TOKEN_ISSUER.to_string(),
            aud: TOKEN_AUDIENCE.to_string(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expirado")]
    Expired,
    #[error("Token inválido")]
    Invalid,
    #[error("JWT secret no configurado")]
    MissingSecret,
}

/// Sign claims for the given identity using the configured secret and TTL.
pub fn issue_token(sub: Uuid, email: &str, nombre: &str) -> Result<String, TokenError> {
    let security = &config::config().security;
    let claims = Claims::new(
        sub,
        email.to_string(),
        nombre.to_string(),
        security.jwt_expires_in_secs,
    );
    encode_token(&claims, &security.jwt_secret)
}

/// Verify signature, expiry, issuer and audience of a bearer token.
pub fn verify_token(token: &str) -> Result<Claims, TokenError> {
    decode_token(token, &config::config().security.jwt_secret)
}

pub fn encode_token(claims: &Claims, secret: &str) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| TokenError::Invalid)
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let mut validation = Validation::default();
    validation.set_issuer(&[TOKEN_ISSUER]);
    validation.set_audience(&[TOKEN_AUDIENCE]);

    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|err| match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    fn claims_for(nombre: &str) -> Claims {
        Claims::new(Uuid::new_v4(), format!("{nombre}@x.com"), nombre.to_string(), 3600)
    }

    #[test]
    fn round_trip_preserves_identity() {
        let claims = claims_for("ana");
        let token = encode_token(&claims, SECRET).unwrap();
        let decoded = decode_token(&token, SECRET).unwrap();

        assert_eq!(decoded.sub, claims.sub);
        assert_eq!(decoded.email, claims.email);
        assert_eq!(decoded.nombre, claims.nombre);
        assert_eq!(decoded.iss, TOKEN_ISSUER);
        assert_eq!(decoded.aud, TOKEN_AUDIENCE);
    }

    #[test]
    fn expired_token_is_distinguished() {
        // Past the default decode leeway
        let mut claims = claims_for("ana");
        claims.iat -= 7200;
        claims.exp -= 7200;

        let token = encode_token(&claims, SECRET).unwrap();
        assert_eq!(decode_token(&token, SECRET), Err(TokenError::Expired));
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let token = encode_token(&claims_for("ana"), SECRET).unwrap();
        assert_eq!(decode_token(&token, "otro-secreto"), Err(TokenError::Invalid));
    }

    #[test]
    fn malformed_token_is_invalid() {
        assert_eq!(decode_token("no-es-un-jwt", SECRET), Err(TokenError::Invalid));
    }

    #[test]
    fn wrong_audience_is_rejected() {
        let mut claims = claims_for("ana");
        claims.aud = "otra-audiencia".to_string();
        let token = encode_token(&claims, SECRET).unwrap();
        assert_eq!(decode_token(&token, SECRET), Err(TokenError::Invalid));
    }

    #[test]
    fn empty_secret_fails_at_issue() {
        assert_eq!(
            encode_token(&claims_for("ana"), ""),
            Err(TokenError::MissingSecret)
        );
    }
}
