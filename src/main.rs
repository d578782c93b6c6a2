use clap::Parser;
use tracing_subscriber::EnvFilter;

use todo_notes_api::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so DATABASE_URL and JWT_SECRET are picked up locally
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = todo_notes_api::config::config().clone();

    if let Err(e) = cli::run(cli, config).await {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }

    Ok(())
}
