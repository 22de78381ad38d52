//! Gateway Mock Binary
//!
//! Starts the mock client-portal gateway.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin gateway-mock
//! ```
//!
//! # Environment Variables
//!
//! - `GATEWAY_HOST`: listen host (default: 0.0.0.0)
//! - `GATEWAY_PORT`: listen port (default: 5555)
//! - `GATEWAY_ACCOUNT_ID`: mock account id (default: DU123456)
//! - `RUST_LOG`: log level (default: info)

use gateway_mock::{AppState, GatewayConfig, create_router};
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    tracing::info!("Starting mock client-portal gateway");

    let config = GatewayConfig::from_env()?;
    tracing::info!(
        host = %config.host,
        port = config.port,
        account_id = %config.account_id,
        "Configuration loaded"
    );

    let state = AppState::new(config.account_id.clone());
    let app = create_router(state);

    let bind_addr = config.bind_addr();
    tracing::info!(%bind_addr, "HTTP server starting");
    log_endpoints();

    let listener = TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Gateway mock stopped");
    Ok(())
}

/// Initialize the tracing subscriber with environment filter.
///
/// Uses a static directive string that is a compile-time constant
/// guaranteed to parse.
#[allow(clippy::expect_used)]
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                "gateway_mock=info"
                    .parse()
                    .expect("static directive 'gateway_mock=info' is valid"),
            ),
        )
        .init();
}

/// Log the served endpoint surface at startup.
fn log_endpoints() {
    tracing::info!("Endpoints:");
    tracing::info!("  GET/POST /v1/api/tickle");
    tracing::info!("  POST   /v1/api/iserver/auth/status");
    tracing::info!("  POST   /v1/api/iserver/reauthenticate");
    tracing::info!("  GET    /v1/api/iserver/accounts");
    tracing::info!("  POST   /v1/api/iserver/account/{{account_id}}/orders");
    tracing::info!("  POST   /v1/api/iserver/account/{{account_id}}/order/{{order_id}}");
    tracing::info!("  DELETE /v1/api/iserver/account/{{account_id}}/order/{{order_id}}");
    tracing::info!("  GET    /v1/api/iserver/account/orders");
    tracing::info!("  GET    /v1/api/portfolio/{{account_id}}/positions/0");
    tracing::info!("  GET    /v1/api/portfolio/{{account_id}}/summary");
    tracing::info!("  GET    /v1/api/iserver/marketdata/snapshot");
    tracing::info!("  GET    /v1/api/iserver/marketdata/history");
    tracing::info!("  GET    /v1/api/iserver/secdef/search");
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
///
/// # Panics
///
/// Panics if signal handlers cannot be installed; failing fast at
/// startup beats an unresponsive process.
#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }
}
