// handlers/protected/resource.rs - CRUD handlers shared by todos and notes
//
// Each handler is generic over the resource type and is mounted once per
// collection in routes.rs, e.g. `get(resource::list::<Todo>)`.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use crate::database::Resource;
use crate::middleware::{Ack, ApiResponse, ApiResult, CurrentUser};
use crate::services::ownership;
use crate::state::AppState;

/// GET /api/{collection} - Rows owned by the caller, most recent first.
pub async fn list<R: Resource>(State(state): State<AppState>, CurrentUser(user): CurrentUser) -> ApiResult<Vec<R>> {
    let rows = ownership::list_owned::<R>(&state.db, &user).await?;
    Ok(ApiResponse::success(rows))
}

/// POST /api/{collection} - Create a row owned by the caller.
pub async fn create<R: Resource>(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    body: Result<Json<R::Draft>, JsonRejection>,
) -> ApiResult<R> {
    let Json(draft) = body?;
    let created = ownership::create_owned::<R>(&state.db, &user, draft).await?;
    Ok(ApiResponse::created(created))
}

/// PUT /api/{collection}/:id - Merge the supplied fields into an owned row.
pub async fn update<R: Resource>(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    body: Result<Json<R::Patch>, JsonRejection>,
) -> ApiResult<R> {
    let Json(patch) = body?;
    let updated = ownership::update_owned::<R>(&state.db, &user, &id, patch).await?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/{collection}/:id
pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Ack> {
    ownership::delete_owned::<R>(&state.db, &user, &id).await?;
    Ok(ApiResponse::success(Ack::ok()))
}
