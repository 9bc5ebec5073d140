//! route-tree server.
//!
//! ```text
//! route-tree --dir ./routes --debug
//! route-tree --config route-tree.toml
//! ```
//!
//! The standalone binary has no compiled modules to register, so it serves
//! declarative `.toml` modules; `.rs` files are treated as helpers.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use route_tree::config::{load_config, validation::validate_config, AppConfig, ConfigError};
use route_tree::observability::init_tracing;
use route_tree::{DirectoryRouter, HttpServer, Shutdown, StandardLoader};

#[derive(Parser)]
#[command(name = "route-tree")]
#[command(about = "Serve a directory of route modules", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Routes directory (overrides the config file).
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Bind address (overrides the config file).
    #[arg(short, long)]
    bind: Option<String>,

    /// Log every mount and skip.
    #[arg(long)]
    debug: bool,
}

fn resolve_config(cli: &Cli) -> Result<AppConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    if let Some(dir) = &cli.dir {
        config.router.directory = dir.clone();
    }
    if let Some(bind) = &cli.bind {
        config.listener.bind_address = bind.clone();
    }
    if cli.debug {
        config.router.debug = true;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    init_tracing(&config.observability)?;

    tracing::info!(
        directory = %config.router.directory.display(),
        bind_address = %config.listener.bind_address,
        "route-tree v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    let routes = DirectoryRouter::new(config.router.clone(), &StandardLoader::declarative_only())?;
    tracing::info!(mounted = routes.routes().len(), "Routes discovered");

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        if let Err(e) = route_tree::lifecycle::signals::wait_for_signal().await {
            tracing::error!(error = %e, "Failed to listen for shutdown signals");
        }
        shutdown.trigger();
    });

    let server = HttpServer::new(config, routes.into_router());
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
