//! `ip-location-query`: the IP geolocation tool server
//!
//! - `ip-location-query`: Streamable HTTP at `http://<listen>/mcp`
//! - `ip-location-query --stdio`: stdio transport, for spawning as a child process

use std::net::SocketAddr;

use clap::Parser;
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, StreamableHttpService,
};
use rmcp::ServiceExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mcphost_iplookup::{IpLocationServer, IpLookupClient, LookupError, DEFAULT_API_BASE};

#[derive(Parser, Debug)]
#[command(name = "ip-location-query")]
#[command(about = "MCP server exposing an IP geolocation tool")]
struct Args {
    /// Address for the Streamable HTTP endpoint
    #[arg(long, default_value = "0.0.0.0:8080")]
    listen: SocketAddr,

    /// Serve over stdin/stdout instead of HTTP
    #[arg(long)]
    stdio: bool,

    /// Geolocation API base URL
    #[arg(long, env = "IPLOOKUP_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,
}

#[tokio::main]
async fn main() -> Result<(), LookupError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let client = IpLookupClient::new(args.api_base);

    if args.stdio {
        run_stdio(client).await
    } else {
        run_http(client, args.listen).await
    }
}

async fn run_stdio(client: IpLookupClient) -> Result<(), LookupError> {
    tracing::info!("serving over stdio");
    let service = IpLocationServer::new(client)
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| LookupError::Service(e.to_string()))?;
    service
        .waiting()
        .await
        .map_err(|e| LookupError::Service(e.to_string()))?;
    Ok(())
}

async fn run_http(client: IpLookupClient, listen: SocketAddr) -> Result<(), LookupError> {
    let service = StreamableHttpService::new(
        move || Ok(IpLocationServer::new(client.clone())),
        LocalSessionManager::default().into(),
        Default::default(),
    );
    let app = axum::Router::new().nest_service("/mcp", service);

    let listener = tokio::net::TcpListener::bind(listen).await?;
    tracing::info!("ip-location-server listening on http://{}/mcp", listen);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}
