// CSV history store - flat-file implementation of the history repository
use crate::application::history_repository::HistoryRepository;
use crate::domain::history::{HistoryRecord, HISTORY_COLUMNS};
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

/// Sole writer of the history file. Not safe for concurrent writers.
#[derive(Debug, Clone)]
pub struct CsvHistoryStore {
    path: PathBuf,
}

impl CsvHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        Ok(())
    }

    fn header_line() -> String {
        format!("{}\n", HISTORY_COLUMNS.join(","))
    }
}

impl HistoryRepository for CsvHistoryStore {
    fn all(&self) -> Result<Vec<HistoryRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;

        let mut records = Vec::new();
        for row in reader.deserialize() {
            let record: HistoryRecord =
                row.with_context(|| format!("Malformed row in {}", self.path.display()))?;
            records.push(record);
        }

        Ok(records)
    }

    fn append(&self, record: &HistoryRecord) -> Result<()> {
        self.ensure_parent()?;

        let needs_header = fs::metadata(&self.path)
            .map(|m| m.len() == 0)
            .unwrap_or(true);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open {} for append", self.path.display()))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;

        Ok(())
    }

    fn reset(&self) -> Result<()> {
        self.ensure_parent()?;
        fs::write(&self.path, Self::header_line())
            .with_context(|| format!("Failed to reset {}", self.path.display()))?;
        Ok(())
    }

    fn export(&self) -> Result<Vec<u8>> {
        if !self.path.exists() {
            return Ok(Self::header_line().into_bytes());
        }
        fs::read(&self.path).with_context(|| format!("Failed to read {}", self.path.display()))
    }
}
