// Report service - Use case for the printable print report
use crate::application::report_renderer::ReportRenderer;
use crate::domain::dashboard::MachineStatus;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReportService {
    renderer: Arc<dyn ReportRenderer>,
}

impl ReportService {
    pub fn new(renderer: Arc<dyn ReportRenderer>) -> Self {
        Self { renderer }
    }

    pub fn generate(&self, status: &MachineStatus) -> anyhow::Result<PathBuf> {
        let path = self.renderer.render(&status.report_fields())?;
        tracing::info!("Report written to {}", path.display());
        Ok(path)
    }
}
