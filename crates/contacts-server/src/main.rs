//! Contacts server binary.

use std::path::PathBuf;

use clap::Parser;
use contacts_server::AppState;
use contacts_server::config::AppConfig;
use tracing::info;

/// Server-rendered contacts application.
#[derive(Parser, Debug)]
#[command(name = "contacts-server", about = "Server-rendered contacts application")]
struct Args {
    /// HTTP listen port (overrides `CONTACTS_PORT`).
    #[arg(long)]
    port: Option<u16>,

    /// JSON file mirroring the contacts (overrides `CONTACTS_DATA_FILE`).
    #[arg(long, conflicts_with = "in_memory")]
    data_file: Option<PathBuf>,

    /// Keep contacts in memory only.
    #[arg(long)]
    in_memory: bool,

    /// Do not seed sample contacts into an empty store.
    #[arg(long)]
    no_seed: bool,
}

impl Args {
    fn apply(self, mut config: AppConfig) -> AppConfig {
        if let Some(port) = self.port {
            config.listen_port = port;
        }
        if self.in_memory {
            config.data_file = None;
        } else if let Some(path) = self.data_file {
            config.data_file = Some(path);
        }
        if self.no_seed {
            config.seed = false;
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Structured logging (controlled via RUST_LOG env var).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Args::parse().apply(AppConfig::from_env());
    match &config.data_file {
        Some(path) => info!(path = %path.display(), seed = config.seed, "using data file"),
        None => info!(seed = config.seed, "keeping contacts in memory"),
    }

    let state = AppState::new(config).await?;
    info!(contacts = state.store.len().await, "store ready");

    contacts_server::serve(state).await?;
    Ok(())
}
