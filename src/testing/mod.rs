use crate::config::AppConfig;
use crate::database::{Database, NewUser, User};
use crate::state::AppState;

pub const TEST_SECRET: &str = "unit-test-secret";

/// Application state over an in-memory store, for unit tests.
pub struct TestContext {
    pub state: AppState,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_database(Database::in_memory())
    }

    pub fn with_database(db: Database) -> Self {
        Self::build(test_config(), db)
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self::build(config, Database::in_memory())
    }

    fn build(config: AppConfig, db: Database) -> Self {
        let state = AppState::new(config, db).expect("test config has a secret");
        Self { state }
    }

    /// Insert an account directly, hashing with the cheapest bcrypt cost.
    pub async fn create_user(&self, email: &str, password: &str) -> User {
        let password_hash = bcrypt::hash(password, 4).expect("hash test password");
        self.state
            .db
            .users()
            .create(NewUser {
                name: Some(email.split('@').next().unwrap_or(email).to_string()),
                email: email.to_string(),
                password_hash,
            })
            .await
            .expect("create test user")
    }

    pub fn cookie_for(&self, email: &str) -> String {
        let token = self.state.tokens.issue(email).expect("issue test token");
        format!("token={}", token)
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.security.jwt_secret = TEST_SECRET.to_string();
    config.security.bcrypt_cost = 4;
    config
}
