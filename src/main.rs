use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use feedsync::app::AppContext;
use feedsync::cli::{commands, Cli, Commands};
use feedsync::config::Config;
use feedsync::daemon::{Daemon, DaemonConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("feedsync=info")))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(db) = cli.db {
        config.database.path = Some(db);
    }

    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Run { interval } => {
            let interval_ms = match interval {
                Some(s) => DaemonConfig::parse_interval(&s).map_err(anyhow::Error::msg)?,
                None => ctx.config.sync.period_ms,
            };
            let daemon = Daemon::new(Arc::new(ctx), DaemonConfig { interval_ms });
            daemon.run().await?;
        }
        Commands::Sync => {
            commands::sync_once(&ctx).await?;
        }
        Commands::Add { url, rule } => {
            commands::add_source(&ctx, &url, &rule)?;
        }
        Commands::Sources => {
            commands::list_sources(&ctx)?;
        }
        Commands::News {
            title,
            offset,
            count,
        } => {
            commands::list_news(&ctx, title.as_deref(), offset, count)?;
        }
        Commands::Show { id } => {
            commands::show_news(&ctx, id)?;
        }
    }

    Ok(())
}
