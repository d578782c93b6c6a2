use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{NewUser, Note, Todo, User};
use super::{ResourceStore, StoreError, UserStore};

const USER_COLUMNS: &str = "id, name, email, password_hash, created_at";
const TODO_COLUMNS: &str = "id, title, description, deadline, completed, user_id, created_at, updated_at";
const NOTE_COLUMNS: &str = "id, title, content, user_id, created_at, updated_at";

/// Postgres-backed store for users, todos and notes.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let created = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (id, name, email, password_hash) VALUES ($1, $2, $3, $4) RETURNING {USER_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl ResourceStore<Todo> for PgStore {
    async fn find(&self, id: Uuid) -> Result<Option<Todo>, StoreError> {
        let todo = sqlx::query_as::<_, Todo>(&format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(todo)
    }

    async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<Todo>, StoreError> {
        let todos = sqlx::query_as::<_, Todo>(&format!(
            "SELECT {TODO_COLUMNS} FROM todos WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(todos)
    }

    async fn insert(&self, todo: &Todo) -> Result<Todo, StoreError> {
        let created = sqlx::query_as::<_, Todo>(&format!(
            "INSERT INTO todos ({TODO_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {TODO_COLUMNS}"
        ))
        .bind(todo.id)
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.deadline)
        .bind(todo.completed)
        .bind(todo.user_id)
        .bind(todo.created_at)
        .bind(todo.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update(&self, todo: &Todo) -> Result<Option<Todo>, StoreError> {
        let updated = sqlx::query_as::<_, Todo>(&format!(
            "UPDATE todos
             SET title = $3, description = $4, deadline = $5, completed = $6, updated_at = $7
             WHERE id = $1 AND user_id = $2
             RETURNING {TODO_COLUMNS}"
        ))
        .bind(todo.id)
        .bind(todo.user_id)
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.deadline)
        .bind(todo.completed)
        .bind(todo.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ResourceStore<Note> for PgStore {
    async fn find(&self, id: Uuid) -> Result<Option<Note>, StoreError> {
        let note = sqlx::query_as::<_, Note>(&format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(note)
    }

    async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<Note>, StoreError> {
        let notes = sqlx::query_as::<_, Note>(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes WHERE user_id = $1 ORDER BY updated_at DESC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notes)
    }

    async fn insert(&self, note: &Note) -> Result<Note, StoreError> {
        let created = sqlx::query_as::<_, Note>(&format!(
            "INSERT INTO notes ({NOTE_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6) RETURNING {NOTE_COLUMNS}"
        ))
        .bind(note.id)
        .bind(&note.title)
        .bind(&note.content)
        .bind(note.user_id)
        .bind(note.created_at)
        .bind(note.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update(&self, note: &Note) -> Result<Option<Note>, StoreError> {
        let updated = sqlx::query_as::<_, Note>(&format!(
            "UPDATE notes
             SET title = $3, content = $4, updated_at = $5
             WHERE id = $1 AND user_id = $2
             RETURNING {NOTE_COLUMNS}"
        ))
        .bind(note.id)
        .bind(note.user_id)
        .bind(&note.title)
        .bind(&note.content)
        .bind(note.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
