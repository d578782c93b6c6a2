mod common;

use anyhow::Result;
use chrono::{Duration, Utc};
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{cookie, TestServer, PASSWORD, SECRET};
use todo_notes_api::auth::TokenCodec;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = TestServer::start().await?;

    let res = server.get("/health", None).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({ "status": "ok" }));
    Ok(())
}

#[tokio::test]
async fn signin_token_passes_the_gate() -> Result<()> {
    let server = TestServer::start().await?;
    let session = server.user("ada@example.com").await?;

    let res = server.get("/api/auth", Some(&session)).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.json::<Value>().await?,
        json!({ "name": "Test User", "email": "ada@example.com" })
    );
    Ok(())
}

#[tokio::test]
async fn signin_sets_cookie_and_returns_token() -> Result<()> {
    let server = TestServer::start().await?;
    server.signup("ada@example.com", PASSWORD).await?;

    let res = server
        .client
        .post(server.url("/api/auth/signin"))
        .json(&json!({ "email": "ada@example.com", "password": PASSWORD }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let set_cookie = res
        .headers()
        .get(reqwest::header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_default();
    let body: Value = res.json().await?;

    assert_eq!(body["success"], true);
    let token = body["token"].as_str().unwrap();
    assert!(set_cookie.starts_with(&format!("token={}", token)));
    assert!(set_cookie.contains("SameSite=Strict"));
    Ok(())
}

#[tokio::test]
async fn missing_or_bad_tokens_are_401() -> Result<()> {
    let server = TestServer::start().await?;
    let session = server.user("ada@example.com").await?;

    let res = server.get("/api/auth", None).await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.json::<Value>().await?["error"], "No token provided");

    // Flip a character in the middle of the signature
    let at = session.rfind('.').unwrap() + 10;
    let mut tampered = session.clone();
    let flipped = if &session[at..at + 1] == "A" { "B" } else { "A" };
    tampered.replace_range(at..at + 1, flipped);
    let res = server.get("/api/auth", Some(&tampered)).await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.json::<Value>().await?["error"], "Invalid token");

    let codec = TokenCodec::new(SECRET)?;
    let expired = codec.issue_at("ada@example.com", Utc::now() - Duration::days(31))?;
    let res = server.get("/api/auth", Some(&cookie(&expired))).await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let foreign = TokenCodec::new("some-other-secret")?.issue("ada@example.com")?;
    let res = server.get("/api/auth", Some(&cookie(&foreign))).await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn token_for_unknown_account_is_404() -> Result<()> {
    let server = TestServer::start().await?;
    let token = TokenCodec::new(SECRET)?.issue("nobody@example.com")?;

    let res = server.get("/api/todos", Some(&cookie(&token))).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["error"], "User not found");
    Ok(())
}

#[tokio::test]
async fn duplicate_signup_is_409_and_changes_nothing() -> Result<()> {
    let server = TestServer::start().await?;
    assert_eq!(server.signup("ada@example.com", PASSWORD).await?, StatusCode::CREATED);

    let res = server
        .client
        .post(server.url("/api/auth/signup"))
        .json(&json!({ "name": "Impostor", "email": "ada@example.com", "password": "other" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(res.json::<Value>().await?["error"], "Email already exists");

    // Original credentials and profile survive
    let session = server.signin("ada@example.com", PASSWORD).await?;
    let profile: Value = server.get("/api/auth", Some(&session)).await?.json().await?;
    assert_eq!(profile["name"], "Test User");
    Ok(())
}

#[tokio::test]
async fn signup_validation() -> Result<()> {
    let server = TestServer::start().await?;

    let res = server
        .client
        .post(server.url("/api/auth/signup"))
        .json(&json!({ "email": "ada@example.com" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["code"], "VALIDATION_ERROR");
    Ok(())
}

#[tokio::test]
async fn signin_failures() -> Result<()> {
    let server = TestServer::start().await?;
    server.signup("ada@example.com", PASSWORD).await?;

    let attempt = |email: &'static str, password: &'static str| {
        server
            .client
            .post(server.url("/api/auth/signin"))
            .json(&json!({ "email": email, "password": password }))
            .send()
    };

    let res = attempt("ada@example.com", "wrong").await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.json::<Value>().await?["error"], "Invalid credentials");

    let res = attempt("bob@example.com", PASSWORD).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["error"], "User not found");

    let res = attempt("", "").await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn signout_expires_cookie_but_token_stays_valid() -> Result<()> {
    let server = TestServer::start().await?;
    let session = server.user("ada@example.com").await?;

    let res = server
        .client
        .post(server.url("/api/auth/signout"))
        .header(reqwest::header::COOKIE, &session)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let set_cookie = res
        .headers()
        .get(reqwest::header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_default();
    assert!(set_cookie.starts_with("token=;"));
    assert!(set_cookie.contains("Max-Age=0"));

    // No server-side revocation
    let res = server.get("/api/auth", Some(&session)).await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}
