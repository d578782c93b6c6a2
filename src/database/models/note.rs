use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{non_blank, OwnedResource, Resource};
use crate::database::{Database, ResourceStore};
use crate::error::ApiError;

/// A markdown note. `content` is stored verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NoteDraft {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl OwnedResource for Note {
    fn id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}

impl Resource for Note {
    type Draft = NoteDraft;
    type Patch = NotePatch;

    const KIND: &'static str = "Note";

    fn from_draft(owner_id: Uuid, draft: NoteDraft, now: DateTime<Utc>) -> Result<Self, ApiError> {
        let title = non_blank(draft.title).ok_or_else(|| ApiError::validation("Title is required"))?;
        let content = draft
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| ApiError::validation("Content is required"))?;

        Ok(Self {
            id: Uuid::new_v4(),
            title,
            content,
            user_id: owner_id,
            created_at: now,
            updated_at: now,
        })
    }

    fn apply_patch(&mut self, patch: NotePatch, now: DateTime<Utc>) {
        if let Some(title) = non_blank(patch.title) {
            self.title = title;
        }
        // Markdown whitespace is significant, so only a blank body is ignored.
        if let Some(content) = patch.content.filter(|c| !c.trim().is_empty()) {
            self.content = content;
        }
        self.updated_at = now;
    }

    fn recency(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn store(db: &Database) -> &dyn ResourceStore<Self> {
        db.notes()
    }
}
