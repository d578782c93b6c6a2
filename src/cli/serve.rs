use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::database::{self, Database};
use crate::routes;
use crate::state::AppState;

/// Open the store, bind and serve until Ctrl-C.
pub async fn serve(config: AppConfig, in_memory: bool) -> anyhow::Result<()> {
    tracing::info!("Starting todo-notes-api in {:?} mode", config.environment);

    let db = if in_memory {
        tracing::warn!("Using the in-memory store; data is lost on exit");
        Database::in_memory()
    } else {
        let pool = database::connect(&config.database).await?;
        if config.database.run_migrations {
            database::migrate(&pool).await?;
        }
        Database::postgres(pool)
    };

    let bind_addr = config.bind_addr();
    let state = AppState::new(config, db)?;
    let listener = TcpListener::bind(&bind_addr).await?;

    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, routes::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
