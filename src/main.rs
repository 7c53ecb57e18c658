// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use crate::application::control_service::ControlService;
use crate::application::history_service::HistoryService;
use crate::application::report_service::ReportService;
use crate::application::status_service::StatusService;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::configured_telemetry::ConfiguredTelemetry;
use crate::infrastructure::csv_history::CsvHistoryStore;
use crate::infrastructure::pdf_report::PdfReportRenderer;
use crate::infrastructure::serial_link::SerialPrinterLink;
use crate::presentation::app_state::AppState;
use crate::presentation::routes::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_dashboard_config()?;

    // Create adapters (infrastructure layer)
    let link = Arc::new(SerialPrinterLink::new(&config.serial));
    let telemetry = Arc::new(ConfiguredTelemetry::new(config.telemetry.clone()));
    let history = Arc::new(CsvHistoryStore::new(config.history.path.clone()));
    let renderer = Arc::new(PdfReportRenderer::new(
        config.report.path.clone(),
        config.report.title.clone(),
    ));
    tracing::info!(
        "Status port {} at {} baud, history in {}",
        config.serial.status_port,
        config.serial.baud_rate,
        history.path().display()
    );

    // Create services (application layer)
    let state = Arc::new(AppState {
        status_service: StatusService::new(link.clone(), telemetry),
        control_service: ControlService::new(link, config.serial.default_command_port.clone()),
        history_service: HistoryService::new(history),
        report_service: ReportService::new(renderer),
        history_limit: config.history.recent_limit,
    });

    // Build router (presentation layer)
    let app = router(state, config.server.upload_limit_mb * 1024 * 1024)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!("Starting pellet-dashboard on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
