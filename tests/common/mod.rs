#![allow(dead_code)]

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{redirect::Policy, StatusCode};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use todo_notes_api::config::AppConfig;
use todo_notes_api::database::Database;
use todo_notes_api::routes;
use todo_notes_api::state::AppState;

pub const SECRET: &str = "integration-test-secret";
pub const PASSWORD: &str = "correct horse battery staple";

/// A server running inside the test's runtime, backed by a fresh in-memory store.
pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut config = AppConfig::development();
        config.server.port = port;
        config.security.jwt_secret = SECRET.to_string();
        config.security.bcrypt_cost = 4;

        let state = AppState::new(config, Database::in_memory())?;
        let listener = TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind port {}", port))?;

        tokio::spawn(async move {
            let _ = axum::serve(listener, routes::app(state)).await;
        });

        // Redirects are part of what the tests assert on
        let client = reqwest::Client::builder()
            .redirect(Policy::none())
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self { base_url, client })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn signup(&self, email: &str, password: &str) -> Result<StatusCode> {
        let res = self
            .client
            .post(self.url("/api/auth/signup"))
            .json(&json!({ "name": "Test User", "email": email, "password": password }))
            .send()
            .await?;
        Ok(res.status())
    }

    /// Sign in and return the session cookie header value.
    pub async fn signin(&self, email: &str, password: &str) -> Result<String> {
        let res = self
            .client
            .post(self.url("/api/auth/signin"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "signin failed: {}", res.status());

        let body: Value = res.json().await?;
        let token = body["token"].as_str().context("signin response has no token")?;
        Ok(cookie(token))
    }

    /// Register and sign in a fresh account.
    pub async fn user(&self, email: &str) -> Result<String> {
        let status = self.signup(email, PASSWORD).await?;
        anyhow::ensure!(status == StatusCode::CREATED, "signup failed: {}", status);
        self.signin(email, PASSWORD).await
    }

    pub async fn get(&self, path: &str, cookie: Option<&str>) -> Result<reqwest::Response> {
        let mut req = self.client.get(self.url(path));
        if let Some(cookie) = cookie {
            req = req.header(reqwest::header::COOKIE, cookie);
        }
        Ok(req.send().await?)
    }

    pub async fn post(&self, path: &str, cookie: &str, body: Value) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(self.url(path))
            .header(reqwest::header::COOKIE, cookie)
            .json(&body)
            .send()
            .await?)
    }

    pub async fn put(&self, path: &str, cookie: &str, body: Value) -> Result<reqwest::Response> {
        Ok(self
            .client
            .put(self.url(path))
            .header(reqwest::header::COOKIE, cookie)
            .json(&body)
            .send()
            .await?)
    }

    pub async fn delete(&self, path: &str, cookie: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .delete(self.url(path))
            .header(reqwest::header::COOKIE, cookie)
            .send()
            .await?)
    }
}

pub fn cookie(token: &str) -> String {
    format!("token={}", token)
}
