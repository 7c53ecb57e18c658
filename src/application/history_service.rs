// History service - Use case for the print log
use crate::application::history_repository::HistoryRepository;
use crate::domain::gcode::GcodeAnalysis;
use crate::domain::history::HistoryRecord;
use chrono::NaiveDate;
use std::sync::Arc;

#[derive(Clone)]
pub struct HistoryService {
    repository: Arc<dyn HistoryRepository>,
}

impl HistoryService {
    pub fn new(repository: Arc<dyn HistoryRepository>) -> Self {
        Self { repository }
    }

    pub fn all(&self) -> anyhow::Result<Vec<HistoryRecord>> {
        self.repository.all()
    }

    /// Last `limit` records, oldest first
    pub fn recent(&self, limit: usize) -> anyhow::Result<Vec<HistoryRecord>> {
        let records = self.repository.all()?;
        let skip = records.len().saturating_sub(limit);
        Ok(records.into_iter().skip(skip).collect())
    }

    pub fn record_completion(
        &self,
        analysis: &GcodeAnalysis,
        date: NaiveDate,
    ) -> anyhow::Result<HistoryRecord> {
        let record = HistoryRecord::completed(analysis, date);
        self.repository.append(&record)?;
        tracing::info!("Recorded print of {} ({})", record.file_name, record.duration);
        Ok(record)
    }

    pub fn reset(&self) -> anyhow::Result<()> {
        self.repository.reset()?;
        tracing::info!("Print history reset");
        Ok(())
    }

    pub fn export(&self) -> anyhow::Result<Vec<u8>> {
        self.repository.export()
    }
}
