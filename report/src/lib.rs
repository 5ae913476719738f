pub mod api;
pub mod client;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod services;
pub mod source;

#[cfg(test)]
mod testing;

use std::sync::Arc;
use common::config::Settings;
use common::Result;
use services::ReportService;
use tokio::net::TcpListener;
use tracing::info;

/// Starts the report HTTP server and runs until Ctrl-C.
pub async fn run_report_server(settings: Settings) -> Result<()> {
    let service = Arc::new(ReportService::from_settings(&settings)?);
    info!(
        categories = ?service.categories(),
        transport = ?settings.client.transport,
        endpoint = %settings.client.endpoint,
        "Report service configured"
    );

    // Create API router
    let api_router = api::routes(Arc::clone(&service));

    // Start the server
    let listener = TcpListener::bind((settings.server.host.as_str(), settings.server.port)).await?;
    info!("Report server listening on {}", listener.local_addr()?);
    axum::serve(listener, api_router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
