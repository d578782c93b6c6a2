// middleware/edge.rs - request-level gate for page loads
//
// Pages under a configured prefix redirect to the sign-in page when the
// request carries no verifiable session cookie. API paths are passed through
// untouched: their handlers run the credential gate and answer with JSON.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use super::auth::token_from_headers;
use crate::config::RoutingConfig;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeDecision {
    Pass,
    RedirectToSignIn,
}

/// `path` is `prefix` itself or lies below it. `/` therefore only matches the root.
pub fn path_matches(path: &str, prefix: &str) -> bool {
    path == prefix || path.starts_with(&format!("{}/", prefix))
}

/// Decide what to do with a request. `has_valid_session` is only consulted
/// for page paths.
pub fn decide(routing: &RoutingConfig, path: &str, has_valid_session: impl FnOnce() -> bool) -> EdgeDecision {
    let is_page = routing.page_prefixes.iter().any(|p| path_matches(path, p));
    if !is_page {
        return EdgeDecision::Pass;
    }

    let is_api = routing.api_prefixes.iter().any(|p| path_matches(path, p));
    if is_api {
        return EdgeDecision::Pass;
    }

    if has_valid_session() {
        EdgeDecision::Pass
    } else {
        EdgeDecision::RedirectToSignIn
    }
}

pub async fn edge_filter(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let routing = &state.config.routing;
    let path = request.uri().path().to_string();

    let decision = decide(routing, &path, || {
        token_from_headers(request.headers())
            .map(|token| state.tokens.verify(&token).is_ok())
            .unwrap_or(false)
    });

    match decision {
        EdgeDecision::Pass => next.run(request).await,
        EdgeDecision::RedirectToSignIn => {
            tracing::debug!("Redirecting unauthenticated page load of {} to sign-in", path);
            Redirect::temporary(&routing.signin_path).into_response()
        }
    }
}
