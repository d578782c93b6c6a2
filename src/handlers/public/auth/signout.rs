// handlers/public/auth/signout.rs - POST /api/auth/signout handler

use axum::extract::State;
use axum_extra::extract::cookie::CookieJar;

use super::signin::session_cookie;
use crate::middleware::{Ack, ApiResponse};
use crate::state::AppState;

/// POST /api/auth/signout - Expire the session cookie.
///
/// The token itself stays valid until it expires; there is no server-side
/// revocation list.
pub async fn signout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, ApiResponse<Ack>) {
    // Added rather than `jar.remove`d so the expiry is sent even when the
    // request carried no cookie.
    let mut cookie = session_cookie(String::new(), state.config.security.secure_cookies);
    cookie.make_removal();
    (jar.add(cookie), ApiResponse::success(Ack::ok()))
}
