//! DCA Dashboard API Server
//!
//! Serves the recomputed dashboard, chart data and the session weight
//! controls over HTTP. Data is loaded lazily on the first request and
//! reloaded on `POST /api/refresh`.

use dca_dashboard::config::{get_environment, DashboardConfig};
use dca_dashboard::core::http::start_server;
use dca_dashboard::logging;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = DashboardConfig::from_env()?;
    let port = config.port;

    info!("Starting DCA Dashboard API Server");
    info!(environment = %get_environment(), "Environment");
    info!(port = port, "HTTP Server: http://0.0.0.0:{}", port);
    info!(
        instruments = config.instruments.len(),
        threshold_pct = config.threshold_pct,
        macro_enabled = config.fred_api_key.is_some(),
        "Dashboard configuration"
    );

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        result = start_server(config) => {
            if let Err(e) = result {
                error!(error = %e, "HTTP server error");
            } else {
                error!("HTTP server stopped");
            }
        }
    }

    Ok(())
}
