//! pipegraph server binary
//!
//! Hosts the pipeline analysis API: binds a TCP listener, serves the
//! axum router from `api`, and shuts down gracefully on ctrl-c.

use anyhow::{Context, Result};
use clap::Parser;

mod api;

#[derive(Parser)]
#[command(name = "pipegraph-server")]
#[command(author, version, about = "Pipeline graph analysis service", long_about = None)]
struct Args {
    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8000")]
    port: u16,

    /// Origin allowed by the CORS layer (the pipeline editor dev server)
    #[arg(long, default_value = "http://localhost:3000")]
    cors_origin: String,
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(args))
}

async fn run(args: Args) -> Result<()> {
    let app = api::router(&args.cors_origin)?;

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;

    tracing::info!("{} listening on {}", api::SERVICE_NAME, addr);
    tracing::info!("CORS origin: {}", args.cors_origin);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to install ctrl-c handler: {}", e);
        return;
    }
    tracing::info!("shutdown signal received");
}
