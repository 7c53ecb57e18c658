// Repository trait for print history access
use crate::domain::history::HistoryRecord;

pub trait HistoryRepository: Send + Sync {
    /// All records in submission order
    fn all(&self) -> anyhow::Result<Vec<HistoryRecord>>;

    fn append(&self, record: &HistoryRecord) -> anyhow::Result<()>;

    /// Drop every record, keeping the header row
    fn reset(&self) -> anyhow::Result<()>;

    /// Raw file contents for download
    fn export(&self) -> anyhow::Result<Vec<u8>>;
}
