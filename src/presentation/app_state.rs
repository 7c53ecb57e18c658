// Application state for HTTP handlers
use crate::application::control_service::ControlService;
use crate::application::history_service::HistoryService;
use crate::application::report_service::ReportService;
use crate::application::status_service::StatusService;

#[derive(Clone)]
pub struct AppState {
    pub status_service: StatusService,
    pub control_service: ControlService,
    pub history_service: HistoryService,
    pub report_service: ReportService,
    /// Rows shown on the history view
    pub history_limit: usize,
}
