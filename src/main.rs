//! Demo server for the httputil helper.

use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use httputil::api::{create_router, AppState};
use httputil::config::Config;
use httputil::error::ConfigError;
use httputil::metrics;
use httputil::HttpUtil;

/// JSON envelope helper demo server.
#[derive(Parser, Debug)]
#[command(name = "httputil")]
#[command(about = "Serve a demo API answering with uniform JSON envelopes")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the demo HTTP server (default).
    Serve {
        /// HTTP server port; overrides PORT.
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration first; it carries RUST_LOG and VERBOSE
    let loaded = Config::load();

    let filter = match &loaded {
        Ok(config) => EnvFilter::try_new(config.log_directive(args.verbose))
            .unwrap_or_else(|_| EnvFilter::new("info")),
        Err(_) if args.verbose => EnvFilter::new("httputil=debug,info"),
        Err(_) => EnvFilter::new("info"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(loaded),
        Some(Command::Serve { port }) => cmd_serve(loaded, port).await,
        None => cmd_serve(loaded, None).await,
    }
}

/// Check configuration validity.
fn cmd_check_config(loaded: Result<Config, ConfigError>) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("HTTPUTIL - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match loaded {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    let util = match config.util_config() {
        Ok(util) => {
            println!("OK");
            util
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    };

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Request Content Type: {}", util.request_content_type);
    println!("  CORS: {}", if util.cors { "Enabled" } else { "Disabled" });
    println!("  Max Body Size: {} bytes", util.max_body_bytes);
    println!("  Application Error: {}", util.application_error);
    println!("  Decode Error: {}", util.decode_request_error);
    println!("  Port: {}", config.port);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Run the demo server until interrupted.
async fn cmd_serve(
    loaded: Result<Config, ConfigError>,
    port_override: Option<u16>,
) -> anyhow::Result<()> {
    let config = loaded.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;
    let util_config = config.util_config().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    info!("Request content type: {}", util_config.request_content_type);
    info!("CORS: {}", if util_config.cors { "enabled" } else { "disabled" });

    let handle = PrometheusBuilder::new().install_recorder()?;
    metrics::init_metrics();

    let state = AppState::new(HttpUtil::new(util_config)).with_metrics(handle);
    let router = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port_override.unwrap_or(config.port)));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
