//! taskdesk-api - todo and user details service
//!
//! Startup order: config, tracing, build identification, root folder,
//! database, enrichment client, HTTP server.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taskdesk_api::services::EnrichmentClient;
use taskdesk_api::{build_router, AppState};
use taskdesk_common::config::{
    default_config_path, CompiledDefaults, EnrichmentSettings, RootFolderInitializer,
    RootFolderResolver, TomlConfig,
};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "taskdesk-api")]
#[command(about = "Todo and user details service with remote enrichment")]
#[command(version)]
struct Args {
    /// Port to listen on (default 5780)
    #[arg(short, long, env = "TASKDESK_PORT")]
    port: Option<u16>,

    /// Root folder holding taskdesk.db
    #[arg(short, long, env = "TASKDESK_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,

    /// Base URL of the enrichment service
    #[arg(short, long, env = "TASKDESK_ENRICHMENT_URL")]
    enrichment_url: Option<String>,

    /// TOML config file (default ~/.config/taskdesk/config.toml)
    #[arg(short, long, env = "TASKDESK_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let defaults = CompiledDefaults::for_current_platform();

    let config_path = args.config.clone().or_else(default_config_path);
    let loaded = config_path.as_deref().map(TomlConfig::load).transpose();

    // A config that fails to load still gets logged at the compiled level
    let level = match &loaded {
        Ok(Some(config)) => config.logging.level.clone(),
        _ => defaults.log_level.clone(),
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "taskdesk_api={level},taskdesk_common={level},tower_http={level}"
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting taskdesk-api v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let toml_config = match (loaded, &config_path) {
        (Ok(Some(config)), Some(path)) if path.exists() => {
            info!("Loaded config file: {}", path.display());
            config
        }
        (Ok(_), Some(path)) => {
            warn!("Config file not found at {}, using defaults", path.display());
            TomlConfig::default()
        }
        (Ok(_), None) => {
            warn!("No config directory on this platform, using defaults");
            TomlConfig::default()
        }
        (Err(e), _) => {
            error!("Failed to load config: {}", e);
            return Err(e.into());
        }
    };

    let root_folder = RootFolderResolver::new("taskdesk-api")
        .with_cli_arg(args.root_folder.clone())
        .with_toml_root(toml_config.root_folder.clone())
        .resolve();

    let initializer = RootFolderInitializer::new(root_folder);
    initializer
        .ensure_directory_exists()
        .context("Failed to create root folder")?;

    let db_path = initializer.database_path();
    if initializer.database_exists() {
        info!("Opening database: {}", db_path.display());
    } else {
        info!("Creating new database: {}", db_path.display());
    }

    let pool = match taskdesk_api::db::connect(&db_path).await {
        Ok(pool) => {
            info!("✓ Connected to database");
            pool
        }
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    let settings = EnrichmentSettings::resolve(args.enrichment_url.clone(), &toml_config.enrichment);
    let client = EnrichmentClient::new(&settings).context("Failed to build enrichment client")?;
    info!(
        classify = client.classify_url(),
        parse = client.parse_url(),
        timeout_ms = settings.timeout.map(|t| t.as_millis() as u64),
        "Enrichment service configured"
    );

    let state = AppState::new(pool, Arc::new(client));
    let app = build_router(state);

    let port = args.port.or(toml_config.port).unwrap_or(defaults.port);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("taskdesk-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
