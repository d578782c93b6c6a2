// handlers/public/auth/signup.rs - POST /api/auth/signup handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::middleware::{Ack, ApiResponse, ApiResult};
use crate::services::account::{self, SignUpRequest};
use crate::state::AppState;

/// POST /api/auth/signup - Register an account.
///
/// ```json
/// { "name": "Ada", "email": "ada@example.com", "password": "hunter2" }
/// ```
///
/// Responds 201 `{"success": true}`; the client signs in separately.
pub async fn signup(State(state): State<AppState>, body: Result<Json<SignUpRequest>, JsonRejection>) -> ApiResult<Ack> {
    let Json(request) = body?;
    account::sign_up(&state, request).await?;
    Ok(ApiResponse::created(Ack::ok()))
}
