use bdl_mcp_server::{
    config::BdlConfig, handlers, mcp::dispatcher::Dispatcher, services::bdl_client::BdlClient,
    AppState,
};

use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "bdl_mcp_server=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = BdlConfig::from_env();

    tracing::info!(base_url = %config.base_url, "Using BDL upstream");

    let client = BdlClient::new(config.base_url.clone(), config.default_lang.clone());
    let dispatcher = Arc::new(Dispatcher::new(client));

    let state = AppState {
        dispatcher,
        environment: config.environment.clone(),
    };

    let app = handlers::router(state);

    let addr = SocketAddr::from((config.host.parse::<std::net::IpAddr>()?, config.port));

    tracing::info!("Server running on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
