use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{NewUser, Resource, User};
use super::{ResourceStore, StoreError, UserStore};

/// In-memory account table for tests and `serve --in-memory`.
#[derive(Default)]
pub struct MemoryUsers {
    rows: RwLock<Vec<User>>,
}

#[async_trait]
impl UserStore for MemoryUsers {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict("Email already exists".to_string()));
        }

        let row = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        rows.push(row.clone());
        Ok(row)
    }
}

/// In-memory table of owned rows, kept in insertion order.
pub struct MemoryTable<R> {
    rows: RwLock<Vec<R>>,
}

impl<R> Default for MemoryTable<R> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl<R: Resource> ResourceStore<R> for MemoryTable<R> {
    async fn find(&self, id: Uuid) -> Result<Option<R>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|r| r.id() == id).cloned())
    }

    async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<R>, StoreError> {
        let rows = self.rows.read().await;
        // Newest insert first, so equal timestamps still list newest first.
        let mut owned: Vec<R> = rows
            .iter()
            .rev()
            .filter(|r| r.is_owned_by(owner_id))
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.recency().cmp(&a.recency()));
        Ok(owned)
    }

    async fn insert(&self, resource: &R) -> Result<R, StoreError> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|r| r.id() == resource.id()) {
            return Err(StoreError::Backend(format!("duplicate id {}", resource.id())));
        }
        rows.push(resource.clone());
        Ok(resource.clone())
    }

    async fn update(&self, resource: &R) -> Result<Option<R>, StoreError> {
        let mut rows = self.rows.write().await;
        let slot = rows
            .iter_mut()
            .find(|r| r.id() == resource.id() && r.is_owned_by(resource.owner_id()));

        Ok(slot.map(|row| {
            *row = resource.clone();
            resource.clone()
        }))
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<bool, StoreError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|r| !(r.id() == id && r.is_owned_by(owner_id)));
        Ok(rows.len() != before)
    }
}
