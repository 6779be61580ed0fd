//! Homer Config Manager entry point.
//!
//! Serves the dashboard configuration operations and the local icon assets
//! over HTTP.
//!
//! # Usage
//!
//! ```text
//! homer-manager [OPTIONS]
//!
//! Options:
//!   --settings   <PATH>   Optional TOML settings file
//!   --config     <PATH>   Dashboard config.yml [default: ./assets/config.yml]
//!   --assets-dir <PATH>   Icon asset directory [default: ./assets/tools]
//!   --bind       <ADDR>   HTTP listen address   [default: 0.0.0.0:3000]
//! ```
//!
//! # Precedence
//!
//! Built-in defaults, then the settings file, then CLI flags or their
//! environment variables:
//!
//! | Variable            | Flag            |
//! |---------------------|-----------------|
//! | `HOMER_SETTINGS`    | `--settings`    |
//! | `HOMER_CONFIG`      | `--config`      |
//! | `HOMER_ASSETS_DIR`  | `--assets-dir`  |
//! | `HOMER_BIND`        | `--bind`        |
//!
//! `RUST_LOG` overrides the settings' `log_level`.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use homer_manager::application::{ConfigService, IconCatalog};
use homer_manager::domain::ManagerSettings;
use homer_manager::infrastructure::{
    build_router, load_settings, run_server, AppState, GithubIconSource, YamlFileStore,
};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Manager for a Homer dashboard's config.yml and icon assets.
#[derive(Debug, Parser)]
#[command(
    name = "homer-manager",
    about = "Edit a Homer dashboard configuration and its icons over HTTP",
    version
)]
struct Cli {
    /// TOML settings file.  Every key in it is optional.
    #[arg(long, env = "HOMER_SETTINGS")]
    settings: Option<PathBuf>,

    /// Path of the dashboard's config.yml.
    #[arg(long, env = "HOMER_CONFIG")]
    config: Option<PathBuf>,

    /// Directory downloaded icons are written to and served from.
    #[arg(long, env = "HOMER_ASSETS_DIR")]
    assets_dir: Option<PathBuf>,

    /// HTTP listen address, e.g. `127.0.0.1:8080`.
    #[arg(long, env = "HOMER_BIND")]
    bind: Option<SocketAddr>,
}

impl Cli {
    /// Loads the settings file (if any) and applies the CLI overrides on top.
    ///
    /// # Errors
    ///
    /// Returns an error if `--settings` names a file that cannot be read or
    /// parsed.
    fn into_settings(self) -> anyhow::Result<ManagerSettings> {
        let mut settings = load_settings(self.settings.as_deref())
            .context("failed to load settings file")?;

        if let Some(config) = self.config {
            settings.config_path = config;
        }
        if let Some(assets_dir) = self.assets_dir {
            settings.assets_dir = assets_dir;
        }
        if let Some(bind) = self.bind {
            settings.bind_addr = bind;
        }
        Ok(settings)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Cli::parse().into_settings()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .init();

    info!(
        config = %settings.config_path.display(),
        assets = %settings.assets_dir.display(),
        icons = %settings.icons.repository,
        "Homer config manager starting"
    );

    let source = GithubIconSource::new(settings.icons.clone())
        .context("failed to initialise icon repository client")?;
    let state = AppState::new(
        ConfigService::new(YamlFileStore::new(&settings.config_path)),
        IconCatalog::new(
            source,
            settings.icons.cache_ttl(),
            &settings.assets_dir,
            settings.assets_url_prefix.clone(),
        ),
    );

    let shutdown = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("received Ctrl+C, shutting down"),
            Err(e) => error!("failed to listen for Ctrl+C signal: {e}"),
        }
    };

    run_server(settings.bind_addr, build_router(state), shutdown).await?;

    info!("Homer config manager stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
