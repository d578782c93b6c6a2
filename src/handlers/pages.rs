// handlers/pages.rs - GET / handler
//
// The root page sits under the edge filter's page prefixes, so only requests
// carrying a verifiable session cookie get here.

use axum::Json;
use serde_json::{json, Value};

pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Todo & Notes API",
            "version": version,
            "endpoints": {
                "health": "/health (public)",
                "auth": "/api/auth/signin, /api/auth/signup, /api/auth/signout (public)",
                "profile": "/api/auth (session)",
                "todos": "/api/todos[/:id] (session)",
                "notes": "/api/notes[/:id] (session)"
            }
        }
    }))
}
