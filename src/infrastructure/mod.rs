// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod configured_telemetry;
pub mod csv_history;
pub mod http_response;
pub mod pdf_report;
pub mod serial_link;
