use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{clearable_timestamp, non_blank, optional_timestamp, OwnedResource, Resource};
use crate::database::{Database, ResourceStore};
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub completed: bool,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// POST /api/todos body. Unknown fields such as `userId` are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct TodoDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "optional_timestamp")]
    pub deadline: Option<DateTime<Utc>>,
}

/// PUT /api/todos/:id body.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    /// `Some(None)` clears the stored deadline.
    #[serde(default, deserialize_with = "clearable_timestamp")]
    pub deadline: Option<Option<DateTime<Utc>>>,
    pub completed: Option<bool>,
}

impl OwnedResource for Todo {
    fn id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}

impl Resource for Todo {
    type Draft = TodoDraft;
    type Patch = TodoPatch;

    const KIND: &'static str = "Todo";

    fn from_draft(owner_id: Uuid, draft: TodoDraft, now: DateTime<Utc>) -> Result<Self, ApiError> {
        let title = non_blank(draft.title).ok_or_else(|| ApiError::validation("Title is required"))?;

        Ok(Self {
            id: Uuid::new_v4(),
            title,
            description: non_blank(draft.description),
            deadline: draft.deadline,
            completed: false,
            user_id: owner_id,
            created_at: now,
            updated_at: now,
        })
    }

    fn apply_patch(&mut self, patch: TodoPatch, now: DateTime<Utc>) {
        // A blank title would leave the todo unnamed; keep the stored one.
        if let Some(title) = non_blank(patch.title) {
            self.title = title;
        }
        // An explicit empty description clears it.
        if let Some(description) = patch.description {
            self.description = non_blank(Some(description));
        }
        // An explicit empty deadline clears it, like description.
        if let Some(deadline) = patch.deadline {
            self.deadline = deadline;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        self.updated_at = now;
    }

    fn recency(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn store(db: &Database) -> &dyn ResourceStore<Self> {
        db.todos()
    }
}
