use std::sync::Arc;

use crate::auth::{TokenCodec, TokenError};
use crate::config::AppConfig;
use crate::database::Database;

/// Shared per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub tokens: TokenCodec,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig, db: Database) -> Result<Self, TokenError> {
        let tokens = TokenCodec::new(&config.security.jwt_secret)?;
        Ok(Self {
            db,
            tokens,
            config: Arc::new(config),
        })
    }
}
