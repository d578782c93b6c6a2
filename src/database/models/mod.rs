pub mod note;
pub mod todo;
pub mod user;

use chrono::{DateTime, Utc};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::{Database, ResourceStore};
use crate::error::ApiError;

pub use note::{Note, NoteDraft, NotePatch};
pub use todo::{Todo, TodoDraft, TodoPatch};
pub use user::{NewUser, User, UserProfile};

/// Anything that belongs to exactly one user.
pub trait OwnedResource {
    fn id(&self) -> Uuid;
    fn owner_id(&self) -> Uuid;

    fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id() == user_id
    }
}

/// A user-owned row with create and partial-update payloads.
pub trait Resource: OwnedResource + Clone + Serialize + Send + Sync + 'static {
    /// Body accepted on create.
    type Draft: DeserializeOwned + Send + 'static;
    /// Body accepted on update; absent or null fields keep their value.
    type Patch: DeserializeOwned + Send + 'static;

    /// Display name used in client-facing messages.
    const KIND: &'static str;

    /// Validate a draft and build a new row owned by `owner_id`.
    fn from_draft(owner_id: Uuid, draft: Self::Draft, now: DateTime<Utc>) -> Result<Self, ApiError>;

    fn apply_patch(&mut self, patch: Self::Patch, now: DateTime<Utc>);

    /// Timestamp lists are ordered by, newest first.
    fn recency(&self) -> DateTime<Utc>;

    fn store(db: &Database) -> &dyn ResourceStore<Self>;

    fn not_found() -> ApiError {
        ApiError::not_found(format!("{} not found", Self::KIND))
    }
}

/// Trims a string field, mapping blank input to `None`.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Optional timestamp field where an empty string means "no value".
///
/// `null` or a missing key gives `None`; `""` gives `Some(None)`, which a
/// patch reads as "clear the stored value".
pub(crate) fn clearable_timestamp<'de, D>(deserializer: D) -> Result<Option<Option<DateTime<Utc>>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(Some(None)),
        Some(raw) => raw
            .trim()
            .parse::<DateTime<Utc>>()
            .map(|ts| Some(Some(ts)))
            .map_err(|e| D::Error::custom(format!("invalid timestamp '{}': {}", raw, e))),
    }
}

/// Like [`clearable_timestamp`] for create bodies, where empty and absent mean the same.
pub(crate) fn optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    clearable_timestamp(deserializer).map(Option::flatten)
}
