// handlers/public/auth/signin.rs - POST /api/auth/signin handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;

use crate::auth::TOKEN_COOKIE;
use crate::error::ApiError;
use crate::services::account::{self, SignInRequest};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub success: bool,
    pub token: String,
}

/// The session cookie carrying `token`. Sign-out must build the removal
/// cookie with the same attributes or browsers keep the original.
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .secure(secure)
        .same_site(SameSite::Strict)
        .build()
}

/// POST /api/auth/signin - Check credentials, set the session cookie and
/// echo the token in the body for non-browser clients.
///
/// ```json
/// { "email": "ada@example.com", "password": "hunter2" }
/// ```
pub async fn signin(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<SignInRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<SignInResponse>), ApiError> {
    let Json(request) = body?;
    let (_, token) = account::sign_in(&state, request).await?;

    let cookie = session_cookie(token.clone(), state.config.security.secure_cookies);
    Ok((jar.add(cookie), Json(SignInResponse { success: true, token })))
}
