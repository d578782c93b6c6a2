use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::config::{AppConfig, Environment};
use crate::database::{Note, Todo};
use crate::handlers::{pages, public};
use crate::middleware::edge_filter;
use crate::state::AppState;

/// Full application router: public and protected routes, the edge filter,
/// CORS and request tracing.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(auth_routes())
        .merge(todo_routes())
        .merge(note_routes())
        // Authenticated data must never sit in a shared cache
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ));

    let mut router = Router::new()
        .route("/", get(pages::root))
        .route("/health", get(public::health::health))
        .merge(api)
        .layer(middleware::from_fn_with_state(state.clone(), edge_filter));

    if let Some(cors) = cors_layer(&state.config) {
        router = router.layer(cors);
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

fn auth_routes() -> Router<AppState> {
    use crate::handlers::protected::auth as session;
    use crate::handlers::public::auth;

    Router::new()
        .route("/api/auth", get(session::whoami))
        .route("/api/auth/signin", post(auth::signin))
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/signout", post(auth::signout))
}

fn todo_routes() -> Router<AppState> {
    use crate::handlers::protected::resource;

    Router::new()
        .route("/api/todos", get(resource::list::<Todo>).post(resource::create::<Todo>))
        .route(
            "/api/todos/:id",
            put(resource::update::<Todo>).delete(resource::delete::<Todo>),
        )
}

fn note_routes() -> Router<AppState> {
    use crate::handlers::protected::resource;

    Router::new()
        .route("/api/notes", get(resource::list::<Note>).post(resource::create::<Note>))
        .route(
            "/api/notes/:id",
            put(resource::update::<Note>).delete(resource::delete::<Note>),
        )
}

/// CORS for the configured origins. Credentials are allowed so the session
/// cookie travels on cross-origin requests, which rules out wildcards.
/// Development with no origins configured echoes back whatever origin asks.
fn cors_layer(config: &AppConfig) -> Option<CorsLayer> {
    let security = &config.security;
    if !security.enable_cors {
        return None;
    }

    let allow_origin = if security.cors_origins.is_empty() && config.environment == Environment::Development {
        AllowOrigin::mirror_request()
    } else {
        let origins: Vec<HeaderValue> = security
            .cors_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    Some(
        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true),
    )
}
