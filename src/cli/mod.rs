pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "todo-notes-api")]
#[command(about = "Todo and notes API server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve(ServeArgs),

    #[command(about = "Apply pending database migrations and exit")]
    Migrate,
}

#[derive(clap::Args, Default)]
pub struct ServeArgs {
    #[arg(long, help = "Address to bind (overrides HOST)")]
    pub host: Option<String>,

    #[arg(long, help = "Port to listen on (overrides PORT)")]
    pub port: Option<u16>,

    #[arg(long, help = "Keep all data in memory instead of PostgreSQL")]
    pub in_memory: bool,
}

pub async fn run(cli: Cli, mut config: AppConfig) -> anyhow::Result<()> {
    config.validate()?;

    match cli.command.unwrap_or(Commands::Serve(ServeArgs::default())) {
        Commands::Serve(args) => {
            if let Some(host) = args.host {
                config.server.host = host;
            }
            if let Some(port) = args.port {
                config.server.port = port;
            }
            serve::serve(config, args.in_memory).await
        }
        Commands::Migrate => {
            let pool = crate::database::connect(&config.database).await?;
            crate::database::migrate(&pool).await?;
            Ok(())
        }
    }
}
