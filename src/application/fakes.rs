// In-memory collaborators for service and handler tests
use crate::application::history_repository::HistoryRepository;
use crate::application::printer_link::{LinkError, PrinterLink};
use crate::application::report_renderer::ReportRenderer;
use crate::application::telemetry_source::TelemetrySource;
use crate::domain::command::PrinterCommand;
use crate::domain::history::{HistoryRecord, HISTORY_COLUMNS};
use crate::domain::telemetry::TelemetrySnapshot;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Mutex;

const STATUS_PORT: &str = "/dev/ttyUSB0";

pub struct FakeLink {
    response: Option<String>,
    ports: Vec<String>,
    sent: Mutex<Vec<(String, PrinterCommand)>>,
}

impl FakeLink {
    pub fn responding(line: &str) -> Self {
        Self {
            response: Some(line.to_string()),
            ports: vec![STATUS_PORT.to_string()],
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Every open fails, and no ports are enumerated.
    pub fn unreachable() -> Self {
        Self {
            response: None,
            ports: Vec::new(),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<(String, PrinterCommand)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl PrinterLink for FakeLink {
    async fn query_status(&self) -> Result<String, LinkError> {
        self.response.clone().ok_or_else(|| LinkError::Open {
            port: STATUS_PORT.to_string(),
            reason: "No such file or directory".to_string(),
        })
    }

    async fn send_command(&self, port: &str, command: PrinterCommand) -> Result<(), LinkError> {
        if self.response.is_none() {
            return Err(LinkError::Open {
                port: port.to_string(),
                reason: "No such file or directory".to_string(),
            });
        }
        self.sent.lock().unwrap().push((port.to_string(), command));
        Ok(())
    }

    fn available_ports(&self) -> Vec<String> {
        self.ports.clone()
    }
}

#[derive(Default)]
pub struct FixedTelemetry(pub TelemetrySnapshot);

impl TelemetrySource for FixedTelemetry {
    fn snapshot(&self) -> TelemetrySnapshot {
        self.0.clone()
    }
}

#[derive(Default)]
pub struct MemoryHistory {
    records: Mutex<Vec<HistoryRecord>>,
}

impl HistoryRepository for MemoryHistory {
    fn all(&self) -> anyhow::Result<Vec<HistoryRecord>> {
        Ok(self.records.lock().unwrap().clone())
    }

    fn append(&self, record: &HistoryRecord) -> anyhow::Result<()> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }

    fn reset(&self) -> anyhow::Result<()> {
        self.records.lock().unwrap().clear();
        Ok(())
    }

    fn export(&self) -> anyhow::Result<Vec<u8>> {
        let mut out = HISTORY_COLUMNS.join(",");
        out.push('\n');
        for r in self.records.lock().unwrap().iter() {
            out.push_str(&format!("{},{},{},{}\n", r.file_name, r.duration, r.outcome, r.date));
        }
        Ok(out.into_bytes())
    }
}

#[derive(Default)]
pub struct RecordingRenderer {
    rendered: Mutex<Vec<Vec<(String, String)>>>,
}

impl RecordingRenderer {
    pub fn rendered(&self) -> Vec<Vec<(String, String)>> {
        self.rendered.lock().unwrap().clone()
    }
}

impl ReportRenderer for RecordingRenderer {
    fn render(&self, fields: &[(String, String)]) -> anyhow::Result<PathBuf> {
        self.rendered.lock().unwrap().push(fields.to_vec());
        Ok(PathBuf::from("report.pdf"))
    }
}
