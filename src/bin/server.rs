//! Teamwork MCP server binary.
//!
//! Binds the Streamable HTTP MCP endpoint at `/mcp` and bridges every call
//! to the configured Teamwork installation.

use std::net::IpAddr;

use clap::Parser;
use miette::IntoDiagnostic;
use teamwork_mcp::config::Config;
use teamwork_mcp::mcp::create_mcp_service;
use teamwork_mcp::twapi::Engine;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "twmcp")]
#[command(author, version, about = "Teamwork MCP server", long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value = "8001")]
    port: u16,

    /// Teamwork installation URL, e.g. https://acme.teamwork.com
    /// (defaults to $TEAMWORK_SERVER)
    #[arg(long)]
    server: Option<String>,

    /// Teamwork API token (defaults to $TEAMWORK_API_TOKEN)
    #[arg(long)]
    api_token: Option<String>,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "teamwork_mcp=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    // reqwest is built without a bundled TLS provider; install ring once.
    rustls::crypto::ring::default_provider()
        .install_default()
        .ok();

    let config = Config::resolve(cli.server, cli.api_token)?;
    info!(server = %config.server, "bridging to Teamwork installation");

    let ct = CancellationToken::new();
    let app = axum::Router::new()
        .nest_service("/mcp", create_mcp_service(Engine::new(config), ct.clone()))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .into_diagnostic()?;
    info!("MCP server listening on http://{addr}/mcp");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::signal::ctrl_c().await.ok();
            info!("shutting down");
            ct.cancel();
        })
        .await
        .into_diagnostic()?;

    Ok(())
}
