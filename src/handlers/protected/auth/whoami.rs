// handlers/protected/auth/whoami.rs - GET /api/auth handler

use axum::Json;

use crate::database::models::UserProfile;
use crate::middleware::CurrentUser;

/// GET /api/auth - Profile of the signed-in user: `{"name", "email"}`.
pub async fn whoami(CurrentUser(user): CurrentUser) -> Json<UserProfile> {
    Json(UserProfile::from(&user))
}
