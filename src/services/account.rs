// services/account.rs - signup and credential checks
//
// Handlers stay thin: they deserialize the body, call into here and shape the
// response. Everything that touches password hashes lives in this module.

use serde::Deserialize;

use crate::auth::password::{hash_password, verify_password};
use crate::database::{NewUser, User};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SignUpRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SignInRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Credentials present and non-empty, with the email trimmed.
fn credentials(email: Option<String>, password: Option<String>) -> Result<(String, String), ApiError> {
    let email = email.map(|e| e.trim().to_string()).filter(|e| !e.is_empty());
    let password = password.filter(|p| !p.is_empty());

    match (email, password) {
        (Some(email), Some(password)) => Ok((email, password)),
        _ => Err(ApiError::validation("Email and password are required")),
    }
}

/// Register a new account. Fails with `Conflict` when the email is taken.
pub async fn sign_up(state: &AppState, request: SignUpRequest) -> Result<User, ApiError> {
    let (email, password) = credentials(request.email, request.password)?;
    let users = state.db.users();

    if users.find_by_email(&email).await?.is_some() {
        return Err(ApiError::conflict("Email already exists"));
    }

    let password_hash = hash_password(password, state.config.security.bcrypt_cost).await?;
    let name = request.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());

    // A concurrent signup can still win the race; the store reports that as a conflict too.
    let user = users
        .create(NewUser {
            name,
            email,
            password_hash,
        })
        .await?;

    tracing::info!("Registered user {} ({})", user.id, user.email);
    Ok(user)
}

/// Check credentials and mint a session token for the account.
pub async fn sign_in(state: &AppState, request: SignInRequest) -> Result<(User, String), ApiError> {
    let (email, password) = credentials(request.email, request.password)?;

    let user = state
        .db
        .users()
        .find_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    if !verify_password(password, user.password_hash.clone()).await? {
        tracing::info!("Failed sign-in for {}", user.email);
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = state.tokens.issue(&user.email)?;
    tracing::info!("User {} signed in", user.id);
    Ok((user, token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestContext;

    fn signup(email: &str, password: &str) -> SignUpRequest {
        SignUpRequest {
            name: Some("Ada".to_string()),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    fn signin(email: &str, password: &str) -> SignInRequest {
        SignInRequest {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[tokio::test]
    async fn sign_up_then_sign_in() {
        let ctx = TestContext::new();
        let user = sign_up(&ctx.state, signup("ada@example.com", "hunter2")).await.unwrap();
        assert_eq!(user.name.as_deref(), Some("Ada"));
        assert_ne!(user.password_hash, "hunter2");

        let (signed_in, token) = sign_in(&ctx.state, signin("ada@example.com", "hunter2")).await.unwrap();
        assert_eq!(signed_in.id, user.id);
        assert_eq!(ctx.state.tokens.verify(&token).unwrap().email, "ada@example.com");
    }

    #[tokio::test]
    async fn email_is_trimmed() {
        let ctx = TestContext::new();
        let user = sign_up(&ctx.state, signup("  ada@example.com ", "pw")).await.unwrap();
        assert_eq!(user.email, "ada@example.com");
    }

    #[tokio::test]
    async fn sign_up_requires_email_and_password() {
        let ctx = TestContext::new();
        let missing_password = SignUpRequest {
            email: Some("ada@example.com".to_string()),
            ..Default::default()
        };
        let err = sign_up(&ctx.state, missing_password).await.unwrap_err();
        assert_eq!(err, ApiError::validation("Email and password are required"));

        let err = sign_up(&ctx.state, signup("   ", "pw")).await.unwrap_err();
        assert_eq!(err, ApiError::validation("Email and password are required"));
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let ctx = TestContext::new();
        let first = sign_up(&ctx.state, signup("ada@example.com", "first")).await.unwrap();

        let err = sign_up(&ctx.state, signup("ada@example.com", "second")).await.unwrap_err();
        assert_eq!(err, ApiError::conflict("Email already exists"));

        // The original password still works.
        let (user, _) = sign_in(&ctx.state, signin("ada@example.com", "first")).await.unwrap();
        assert_eq!(user.id, first.id);
    }

    #[tokio::test]
    async fn sign_in_failures() {
        let ctx = TestContext::new();
        ctx.create_user("ada@example.com", "right").await;

        let err = sign_in(&ctx.state, signin("ada@example.com", "wrong")).await.unwrap_err();
        assert_eq!(err, ApiError::unauthorized("Invalid credentials"));

        let err = sign_in(&ctx.state, signin("nobody@example.com", "right")).await.unwrap_err();
        assert_eq!(err, ApiError::not_found("User not found"));

        let err = sign_in(&ctx.state, SignInRequest::default()).await.unwrap_err();
        assert_eq!(err, ApiError::validation("Email and password are required"));
    }
}
