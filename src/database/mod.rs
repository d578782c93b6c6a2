pub mod manager;
pub mod memory;
pub mod models;
pub mod repository;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

pub use manager::{connect, migrate};
pub use memory::{MemoryTable, MemoryUsers};
pub use models::{NewUser, Note, OwnedResource, Resource, Todo, User};
pub use repository::PgStore;

/// Errors surfaced by any store backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error(transparent)]
    Sqlx(sqlx::Error),

    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Unique constraint on `users.email`, named in the initial migration.
pub const USERS_EMAIL_CONSTRAINT: &str = "users_email_key";

/// Client-facing conflict message for a unique violation on `constraint`.
/// Violations of any other constraint are not conflicts the client caused.
fn conflict_message(constraint: Option<&str>) -> Option<&'static str> {
    match constraint {
        Some(USERS_EMAIL_CONSTRAINT) => Some("Email already exists"),
        _ => None,
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                if let Some(message) = conflict_message(db_err.constraint()) {
                    return StoreError::Conflict(message.to_string());
                }
            }
        }
        StoreError::Sqlx(err)
    }
}

/// Account rows, looked up by their unique email.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Fails with [`StoreError::Conflict`] when the email is taken.
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Rows owned by exactly one user.
///
/// `update` and `delete` only touch a row whose owner matches, so a write
/// racing an ownership change finds nothing.
#[async_trait]
pub trait ResourceStore<R: Send + Sync + 'static>: Send + Sync {
    async fn find(&self, id: Uuid) -> Result<Option<R>, StoreError>;

    /// All rows for `owner_id`, most recent first.
    async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<R>, StoreError>;

    async fn insert(&self, resource: &R) -> Result<R, StoreError>;

    async fn update(&self, resource: &R) -> Result<Option<R>, StoreError>;

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<bool, StoreError>;
}

/// Handle to every store the handlers need. Built once at startup and
/// cloned into each request through the application state.
#[derive(Clone)]
pub struct Database {
    users: Arc<dyn UserStore>,
    todos: Arc<dyn ResourceStore<Todo>>,
    notes: Arc<dyn ResourceStore<Note>>,
}

impl Database {
    pub fn new(
        users: Arc<dyn UserStore>,
        todos: Arc<dyn ResourceStore<Todo>>,
        notes: Arc<dyn ResourceStore<Note>>,
    ) -> Self {
        Self { users, todos, notes }
    }

    pub fn postgres(pool: sqlx::PgPool) -> Self {
        let store = Arc::new(PgStore::new(pool));
        Self::new(store.clone(), store.clone(), store)
    }

    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryUsers::default()),
            Arc::new(MemoryTable::<Todo>::default()),
            Arc::new(MemoryTable::<Note>::default()),
        )
    }

    pub fn users(&self) -> &dyn UserStore {
        self.users.as_ref()
    }

    pub fn todos(&self) -> &dyn ResourceStore<Todo> {
        self.todos.as_ref()
    }

    pub fn notes(&self) -> &dyn ResourceStore<Note> {
        self.notes.as_ref()
    }

    pub async fn health_check(&self) -> Result<(), StoreError> {
        self.users.ping().await
    }
}
