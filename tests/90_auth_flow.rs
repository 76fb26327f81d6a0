//! End-to-end flows against a provisioned database (schema.sql applied).
//! Run with: cargo test -- --ignored

mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

const PASSWORD: &str = "Abc123";

async fn register(
    client: &reqwest::Client,
    base_url: &str,
    email: &str,
) -> Result<serde_json::Value> {
    let res = client
        .post(format!("{base_url}/api/auth/register"))
        .json(&json!({ "nombre": "Ana", "email": email, "password": PASSWORD }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::CREATED);
    Ok(res.json().await?)
}

async fn login_token(
    client: &reqwest::Client,
    base_url: &str,
    email: &str,
) -> Result<(String, String)> {
    let res = client
        .post(format!("{base_url}/api/auth/login"))
        .json(&json!({ "email": email, "password": PASSWORD }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await?;
    let token = body["data"]["token"].as_str().expect("token").to_string();
    let id = body["data"]["id"].as_str().expect("id").to_string();
    assert!(!token.is_empty());
    Ok((token, id))
}

#[tokio::test]
#[ignore = "requires PostgreSQL with schema.sql applied"]
async fn register_returns_user_without_password() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let email = common::unique_email("register");

    let body = register(&client, &server.base_url, &email).await?;

    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["user"]["email"], email);
    assert!(body["data"]["user"].get("password").is_none());
    assert!(body["data"]["user"].get("password_hash").is_none());
    Ok(())
}

#[tokio::test]
#[ignore = "requires PostgreSQL with schema.sql applied"]
async fn duplicate_registration_conflicts() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let email = common::unique_email("duplicate");

    register(&client, &server.base_url, &email).await?;

    // Same email with different casing still conflicts
    let res = client
        .post(format!("{}/api/auth/register", server.base_url))
        .json(&json!({ "nombre": "Ana", "email": email.to_uppercase(), "password": PASSWORD }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["message"], "El email ya está en uso");
    Ok(())
}

#[tokio::test]
#[ignore = "requires PostgreSQL with schema.sql applied"]
async fn login_succeeds_and_token_identifies_user() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let email = common::unique_email("login");

    let registered = register(&client, &server.base_url, &email).await?;
    let (token, id) = login_token(&client, &server.base_url, &email).await?;
    assert_eq!(registered["data"]["user"]["id"].as_str(), Some(id.as_str()));

    // The token works against the verify endpoint and echoes the identity
    let res = client
        .get(format!("{}/api/auth/verify", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["data"]["user"]["id"].as_str(), Some(id.as_str()));
    assert_eq!(body["data"]["user"]["email"], email);
    Ok(())
}

#[tokio::test]
#[ignore = "requires PostgreSQL with schema.sql applied"]
async fn wrong_credentials_are_indistinguishable() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let email = common::unique_email("wrongpass");

    register(&client, &server.base_url, &email).await?;

    // Wrong password and unknown email produce the identical response
    let attempts = [
        json!({ "email": email, "password": "Wrong123" }),
        json!({ "email": common::unique_email("unknown"), "password": PASSWORD }),
    ];

    for payload in attempts {
        let res = client
            .post(format!("{}/api/auth/login", server.base_url))
            .json(&payload)
            .send()
            .await?;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = res.json().await?;
        assert_eq!(body["message"], "Credenciales inválidas");
    }
    Ok(())
}

#[tokio::test]
#[ignore = "requires PostgreSQL with schema.sql applied"]
async fn get_user_requires_token_and_hides_hash() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let email = common::unique_email("getuser");

    register(&client, &server.base_url, &email).await?;
    let (token, id) = login_token(&client, &server.base_url, &email).await?;

    // Without a token: 401
    let res = client
        .get(format!("{}/api/users/{}", server.base_url, id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // With a token: 200 and no hash in the body
    let res = client
        .get(format!("{}/api/users/{}", server.base_url, id))
        .bearer_auth(&token)
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["data"]["email"], email);
    assert!(body["data"].get("password_hash").is_none());
    Ok(())
}

#[tokio::test]
#[ignore = "requires PostgreSQL with schema.sql applied"]
async fn profile_get_or_create_is_idempotent() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let email = common::unique_email("profile");

    register(&client, &server.base_url, &email).await?;
    let (token, _) = login_token(&client, &server.base_url, &email).await?;

    let mut ids = Vec::new();
    for _ in 0..2 {
        let res = client
            .get(format!("{}/api/profile/me", server.base_url))
            .bearer_auth(&token)
            .send()
            .await?;

        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = res.json().await?;
        assert_eq!(body["data"]["area"], "Sin especificar");
        ids.push(body["data"]["id"].as_str().expect("profile id").to_string());
    }

    assert_eq!(ids[0], ids[1], "second call must return the same profile");
    Ok(())
}

#[tokio::test]
#[ignore = "requires PostgreSQL with schema.sql applied"]
async fn profile_update_is_owner_only() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let email_a = common::unique_email("owner-a");
    let email_b = common::unique_email("owner-b");
    register(&client, &server.base_url, &email_a).await?;
    register(&client, &server.base_url, &email_b).await?;

    let (token_a, _) = login_token(&client, &server.base_url, &email_a).await?;
    let (_, id_b) = login_token(&client, &server.base_url, &email_b).await?;

    let res = client
        .put(format!("{}/api/profile/{}", server.base_url, id_b))
        .bearer_auth(&token_a)
        .json(&json!({ "biografia": "ajena" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["message"], "No tienes permisos para actualizar este perfil");
    Ok(())
}
