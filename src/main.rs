use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use imaginator_api::{api, config};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("imaginator_api=info,tower_http=info")),
        )
        .init();

    // Load configuration
    config::Config::dotenv_load();
    let config = config::Config::new().expect("Failed to load configuration");
    config.log_summary();

    let host_str = config.api_host.clone();
    let port_str = config.api_port.clone();
    let state = Arc::new(api::routes::AppState::from_config(config));
    let app = api::routes::build_router(state);

    // Run our application with safe parsing
    let ip: std::net::IpAddr = host_str.parse().unwrap_or_else(|_| {
        tracing::warn!("Invalid API_HOST '{}', falling back to 127.0.0.1", host_str);
        std::net::IpAddr::from([127, 0, 0, 1])
    });
    let port: u16 = port_str.parse().unwrap_or_else(|_| {
        tracing::warn!("Invalid PORT '{}', falling back to 5000", port_str);
        5000
    });
    let socket_address = SocketAddr::new(ip, port);
    tracing::info!("Server running on {}", socket_address);
    if let Err(e) = axum::Server::bind(&socket_address)
        .serve(app.into_make_service())
        .await
    {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
