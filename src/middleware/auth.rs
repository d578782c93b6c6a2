use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::TOKEN_COOKIE;
use crate::database::User;
use crate::error::ApiError;
use crate::state::AppState;

/// The account behind the session cookie of the current request.
///
/// Every protected handler takes this extractor instead of reading the
/// cookie itself, so the gate runs identically everywhere.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        authenticate(state, &parts.headers).await.map(CurrentUser)
    }
}

/// Credential gate: cookie -> verified claims -> user row.
///
/// Fails with `Unauthorized` when the cookie is missing or the token does not
/// verify, and with `NotFound` when the token names an unknown email.
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<User, ApiError> {
    let token = token_from_headers(headers).ok_or_else(|| ApiError::unauthorized("No token provided"))?;

    let claims = state.tokens.verify(&token).map_err(|e| {
        tracing::debug!("Rejected session token: {}", e);
        ApiError::from(e)
    })?;

    let user = state
        .db
        .users()
        .find_by_email(&claims.email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Valid token for unknown account '{}'", claims.email);
            ApiError::not_found("User not found")
        })?;

    tracing::debug!("Authenticated request for user {}", user.id);
    Ok(user)
}

/// Extract the session token from the `Cookie` header, if any.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}
