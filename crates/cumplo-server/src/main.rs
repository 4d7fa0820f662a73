//! cumplo server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), builds the
//! in-memory stores from seeded fixtures or a JSON snapshot, and serves the
//! JSON API over HTTP.
//!
//! # Snapshot generation
//!
//! To write the fixture set for a seed to a file and exit:
//!
//! ```
//! cargo run -p cumplo-server --bin cumplo -- --seed 7 --dump-fixtures session.json
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use chrono::Utc;
use clap::Parser;
use cumplo_server::ServerConfig;
use cumplo_store_memory::{FixtureSet, MemoryStores, snapshot};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Cumplo compliance API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Fixture seed; overrides the configured value.
  #[arg(long)]
  seed: Option<u64>,

  /// Write the generated fixture set to this path as JSON and exit.
  #[arg(long, value_name = "PATH")]
  dump_fixtures: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("CUMPLO"))
    .build()
    .context("failed to read config file")?;

  let mut server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;
  if let Some(seed) = cli.seed {
    server_cfg.seed = seed;
  }

  // Helper mode: write fixtures and exit.
  if let Some(path) = cli.dump_fixtures {
    let set = FixtureSet::generate(server_cfg.seed, Utc::now());
    snapshot::save(&path, &set)
      .await
      .with_context(|| format!("failed to write fixtures to {path:?}"))?;
    tracing::info!(path = %path.display(), seed = server_cfg.seed, "fixtures written");
    return Ok(());
  }

  let stores = match &server_cfg.snapshot_path {
    Some(path) => MemoryStores::open_snapshot(path)
      .await
      .with_context(|| format!("failed to load snapshot at {path:?}"))?,
    None => {
      tracing::info!(seed = server_cfg.seed, "generating fixtures");
      MemoryStores::seeded(server_cfg.seed, Utc::now())
        .context("failed to build stores from fixtures")?
    }
  };

  let app = cumplo_server::app(Arc::new(stores));
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
