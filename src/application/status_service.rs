// Status service - Use case for polling the printer
use crate::application::printer_link::PrinterLink;
use crate::application::telemetry_source::TelemetrySource;
use crate::domain::dashboard::MachineStatus;
use crate::domain::status::{LinkStatus, StatusReading};
use crate::domain::telemetry::TelemetrySnapshot;
use std::sync::Arc;

#[derive(Clone)]
pub struct StatusService {
    link: Arc<dyn PrinterLink>,
    telemetry: Arc<dyn TelemetrySource>,
}

impl StatusService {
    pub fn new(link: Arc<dyn PrinterLink>, telemetry: Arc<dyn TelemetrySource>) -> Self {
        Self { link, telemetry }
    }

    /// Query the printer once. Link failures come back as a disconnected
    /// status carrying the error text, never as an error.
    pub async fn poll(&self) -> MachineStatus {
        match self.link.query_status().await {
            Ok(line) => {
                tracing::debug!("Status line: {:?}", line);
                let link = LinkStatus::from_line(line);
                if link.reading() == Some(&StatusReading::default()) {
                    tracing::warn!("Status line did not carry a temperature report");
                }
                MachineStatus::new(link, self.telemetry.snapshot())
            }
            Err(e) => {
                tracing::warn!("Printer link unavailable: {}", e);
                let error = e.to_string();
                MachineStatus::new(
                    LinkStatus::Disconnected { error: error.clone() },
                    TelemetrySnapshot::unavailable(&error, self.telemetry.snapshot().temperature_trend),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fakes::{FakeLink, FixedTelemetry};
    use crate::domain::telemetry::PrinterState;

    fn service(link: FakeLink) -> StatusService {
        StatusService::new(Arc::new(link), Arc::new(FixedTelemetry::default()))
    }

    #[tokio::test]
    async fn test_poll_parses_reading() {
        let status = service(FakeLink::responding("ok T:201.5 /210.0 B:60.2 /60.0")).poll().await;

        let reading = status.link.reading().copied().unwrap();
        assert_eq!(reading.nozzle_temp, 201.5);
        assert_eq!(reading.bed_target, 60.0);
        assert_eq!(status.telemetry, TelemetrySnapshot::default());
    }

    #[tokio::test]
    async fn test_poll_noise_is_zero_reading_not_disconnected() {
        let status = service(FakeLink::responding("echo:busy")).poll().await;
        assert_eq!(status.link.reading(), Some(&StatusReading::default()));
        assert_eq!(status.state(), PrinterState::Printing);
    }

    #[tokio::test]
    async fn test_poll_link_error_is_disconnected() {
        let status = service(FakeLink::unreachable()).poll().await;

        match &status.link {
            LinkStatus::Disconnected { error } => assert!(error.contains("/dev/ttyUSB0")),
            other => panic!("expected disconnected status, got {:?}", other),
        }
        assert_eq!(status.state(), PrinterState::Disconnected);
        assert_eq!(status.telemetry.file_name, "N/A");
        assert_eq!(
            status.telemetry.temperature_trend,
            TelemetrySnapshot::default().temperature_trend
        );
    }
}
