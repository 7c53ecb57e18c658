// Telemetry source fed from the configuration file
use crate::application::telemetry_source::TelemetrySource;
use crate::domain::telemetry::TelemetrySnapshot;

#[derive(Debug, Clone)]
pub struct ConfiguredTelemetry {
    snapshot: TelemetrySnapshot,
}

impl ConfiguredTelemetry {
    pub fn new(snapshot: TelemetrySnapshot) -> Self {
        Self { snapshot }
    }
}

impl TelemetrySource for ConfiguredTelemetry {
    fn snapshot(&self) -> TelemetrySnapshot {
        self.snapshot.clone()
    }
}
