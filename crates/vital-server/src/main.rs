//! Salud Vital server binary: loads configuration, opens the clinic
//! database, and serves both HTTP families until SIGINT or SIGTERM.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use figment::providers::{Format, Toml};

use vital_config::VitalConfig;
use vital_db::ClinicService;

#[derive(Debug, Parser)]
#[command(name = "salud-vital", version, about = "Servidor de gestión clínica Salud Vital")]
struct Cli {
    /// Extra config file merged over the discovered layers.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Database path (overrides configuration).
    #[arg(long, value_name = "PATH")]
    db: Option<String>,

    /// Bind address (overrides configuration).
    #[arg(long)]
    bind: Option<String>,

    /// TCP port (overrides configuration).
    #[arg(long)]
    port: Option<u16>,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Log debug detail.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("salud-vital error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(db) = cli.db {
        config.database.path = db;
    }
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let service = ClinicService::open_local(&config.database.path)
        .await
        .with_context(|| format!("failed to open database '{}'", config.database.path))?;
    let app = vital_http::router(Arc::new(service));

    let addr = config.server.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, database = %config.database.path, "Salud Vital listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<VitalConfig> {
    match path {
        Some(path) => {
            anyhow::ensure!(
                path.exists(),
                "config file '{}' does not exist",
                path.display()
            );
            VitalConfig::figment()
                .merge(Toml::file(path))
                .extract()
                .context("failed to load configuration")
        }
        None => VitalConfig::load_with_dotenv().context("failed to load configuration"),
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("SALUD_VITAL_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => tracing::error!(%error, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
