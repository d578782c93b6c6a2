//! Ownership-checked operations shared by every user-owned resource.
//!
//! A resource that exists but belongs to someone else is reported exactly
//! like one that does not exist, so ids of other users' rows cannot be probed.

use chrono::Utc;
use uuid::Uuid;

use crate::database::{Database, Resource, User};
use crate::error::ApiError;

/// Every row `user` owns, most recent first.
pub async fn list_owned<R: Resource>(db: &Database, user: &User) -> Result<Vec<R>, ApiError> {
    Ok(R::store(db).list_for_owner(user.id).await?)
}

/// Create a row owned by `user`. Ownership never comes from the request body.
pub async fn create_owned<R: Resource>(db: &Database, user: &User, draft: R::Draft) -> Result<R, ApiError> {
    let resource = R::from_draft(user.id, draft, Utc::now())?;
    let created = R::store(db).insert(&resource).await?;
    tracing::info!("Created {} {} for user {}", R::KIND, created.id(), user.id);
    Ok(created)
}

/// Fetch a row by its raw path id, failing with `NotFound` unless `user` owns it.
pub async fn find_owned<R: Resource>(db: &Database, user: &User, raw_id: &str) -> Result<R, ApiError> {
    let Ok(id) = Uuid::parse_str(raw_id) else {
        return Err(R::not_found());
    };

    match R::store(db).find(id).await? {
        Some(resource) if resource.is_owned_by(user.id) => Ok(resource),
        Some(_) => {
            tracing::debug!("User {} asked for {} {} owned by someone else", user.id, R::KIND, id);
            Err(R::not_found())
        }
        None => Err(R::not_found()),
    }
}

/// Merge `patch` into an owned row and persist it.
pub async fn update_owned<R: Resource>(
    db: &Database,
    user: &User,
    raw_id: &str,
    patch: R::Patch,
) -> Result<R, ApiError> {
    let mut resource: R = find_owned(db, user, raw_id).await?;
    resource.apply_patch(patch, Utc::now());

    R::store(db).update(&resource).await?.ok_or_else(R::not_found)
}

/// Remove an owned row.
pub async fn delete_owned<R: Resource>(db: &Database, user: &User, raw_id: &str) -> Result<(), ApiError> {
    let resource: R = find_owned(db, user, raw_id).await?;

    if R::store(db).delete(resource.id(), user.id).await? {
        tracing::info!("Deleted {} {} for user {}", R::KIND, resource.id(), user.id);
        Ok(())
    } else {
        Err(R::not_found())
    }
}
