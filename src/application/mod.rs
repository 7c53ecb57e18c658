// Application layer - Use cases and the ports they depend on
pub mod control_service;
pub mod history_repository;
pub mod history_service;
pub mod printer_link;
pub mod report_renderer;
pub mod report_service;
pub mod status_service;
pub mod telemetry_source;

#[cfg(test)]
pub mod fakes;
