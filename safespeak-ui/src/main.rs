//! safespeak-ui - Voice verification workflow host
//!
//! Serves the verification page on localhost, fetches the challenge phrase
//! once at start-up, and forwards uploads to the remote verification service.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use safespeak_common::config::{self, ConfigOverrides, UiConfig};
use safespeak_common::events::EventBus;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use safespeak_ui::services::{PhraseClient, VerificationClient};
use safespeak_ui::{build_router, AppState, WorkflowSession};

/// Command-line arguments for safespeak-ui
#[derive(Parser, Debug)]
#[command(name = "safespeak-ui")]
#[command(about = "SafeSpeak voice verification workflow")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "SAFESPEAK_PORT")]
    port: Option<u16>,

    /// Challenge phrase endpoint
    #[arg(long, env = "SAFESPEAK_PHRASE_URL")]
    phrase_url: Option<String>,

    /// Verification endpoint
    #[arg(long, env = "SAFESPEAK_VERIFY_URL")]
    verify_url: Option<String>,

    /// Multipart field name the verification service expects
    #[arg(long, env = "SAFESPEAK_UPLOAD_FIELD")]
    upload_field: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "SAFESPEAK_LOG_LEVEL")]
    log_level: Option<String>,

    /// TOML config file (SAFESPEAK_CONFIG is consulted when absent)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = config::resolve_config_path(args.config.as_deref());
    let toml_config = match &config_path {
        Some(path) => config::load_toml_config(path).context("Failed to load config file")?,
        None => Default::default(),
    };

    let overrides = ConfigOverrides {
        port: args.port,
        phrase_url: args.phrase_url,
        verify_url: args.verify_url,
        upload_field: args.upload_field,
        log_level: args.log_level,
    };
    let ui_config = UiConfig::resolve(&overrides, &toml_config).context("Invalid configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("safespeak_ui={},tower_http=info", ui_config.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SafeSpeak workflow host v{}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &config_path {
        info!("Config file: {}", path.display());
    }
    info!("Phrase service: {}", ui_config.phrase_url);
    info!(
        "Verification service: {} (field '{}')",
        ui_config.verify_url, ui_config.upload_field
    );

    let phrase_client =
        PhraseClient::new(ui_config.phrase_url.clone()).context("Failed to create phrase client")?;
    let verification_client =
        VerificationClient::new(ui_config.verify_url.clone(), ui_config.upload_field.clone())
            .context("Failed to create verification client")?;

    let session = WorkflowSession::new(phrase_client, verification_client, EventBus::new(100));

    // The phrase fetch runs on its own task and never delays start-up
    session.activate();

    let app = build_router(AppState::new(session));

    let addr = SocketAddr::from(([127, 0, 0, 1], ui_config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
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
