// Telemetry source trait - supplier of display-only printer data
use crate::domain::telemetry::TelemetrySnapshot;

pub trait TelemetrySource: Send + Sync {
    fn snapshot(&self) -> TelemetrySnapshot;
}
