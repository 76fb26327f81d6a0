//! Route-level behavior that does not require a database: the not-found
//! fallback, the authentication gate and payload presence checks.

mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn unmatched_route_returns_envelope_404() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/nonexistent", server.base_url))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Ruta no encontrada: /api/nonexistent");
    assert!(body.get("timestamp").is_some());
    Ok(())
}

#[tokio::test]
async fn protected_routes_reject_missing_token_with_401() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    for path in [
        "/api/users",
        "/api/profile/me",
        "/api/activities",
        "/api/configuracion/1",
        "/api/auth/verify",
    ] {
        let res = client
            .get(format!("{}{}", server.base_url, path))
            .send()
            .await?;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "path: {path}");

        let body = res.json::<serde_json::Value>().await?;
        assert_eq!(body["success"], false, "path: {path}");
        assert_eq!(body["message"], "Token de acceso requerido", "path: {path}");
    }
    Ok(())
}

#[tokio::test]
async fn malformed_authorization_header_is_401() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // No "Bearer " prefix
    let res = client
        .get(format!("{}/api/users", server.base_url))
        .header("Authorization", "Token abc")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn garbage_token_is_403() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/users", server.base_url))
        .header("Authorization", "Bearer no-es-un-jwt")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Token inválido o expirado");
    Ok(())
}

#[tokio::test]
async fn login_without_credentials_is_400() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/auth/login", server.base_url))
        .json(&json!({ "email": "ana@x.com" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Email y contraseña son requeridos");
    Ok(())
}

#[tokio::test]
async fn register_validation_failures_report_field_errors() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/auth/register", server.base_url))
        .json(&json!({ "nombre": "A", "email": "no-email", "password": "abc" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Datos de entrada inválidos");
    let errors = body["errors"].as_array().expect("errors array");
    assert_eq!(errors.len(), 3);
    Ok(())
}
