// Telemetry data domain models
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrinterState {
    Printing,
    Paused,
    Idle,
    Disconnected,
}

impl PrinterState {
    pub fn label(&self) -> &'static str {
        match self {
            PrinterState::Printing => "Printing",
            PrinterState::Paused => "Paused",
            PrinterState::Idle => "Idle",
            PrinterState::Disconnected => "Connection error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureSample {
    pub minute: u32,
    pub nozzle: f64,
    pub bed: f64,
}

impl TemperatureSample {
    pub fn new(minute: u32, nozzle: f64, bed: f64) -> Self {
        Self { minute, nozzle, bed }
    }
}

/// Display-only printer data that is not derived from the serial reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetrySnapshot {
    pub state: PrinterState,
    pub speed_mm_s: u32,
    pub remaining_time: String,
    pub material: String,
    pub material_used_g: u32,
    pub file_name: String,
    pub success_rate_pct: u32,
    pub maintenance: String,
    pub alert: String,
    pub total_hours: u32,
    pub pellets_remaining_kg: f64,
    pub average_consumption_g: u32,
    pub print_cost_eur: f64,
    pub temperature_trend: Vec<TemperatureSample>,
}

impl Default for TelemetrySnapshot {
    fn default() -> Self {
        Self {
            state: PrinterState::Printing,
            speed_mm_s: 35,
            remaining_time: "2 h 15 min".to_string(),
            material: "PLA pellets".to_string(),
            material_used_g: 153,
            file_name: "sensor_case_v2.gcode".to_string(),
            success_rate_pct: 85,
            maintenance: "replace nozzle (5 h left)".to_string(),
            alert: "Unstable nozzle temperature".to_string(),
            total_hours: 123,
            pellets_remaining_kg: 0.8,
            average_consumption_g: 120,
            print_cost_eur: 0.75,
            temperature_trend: vec![
                TemperatureSample::new(0, 0.0, 0.0),
                TemperatureSample::new(1, 50.0, 40.0),
                TemperatureSample::new(2, 100.0, 60.0),
                TemperatureSample::new(3, 150.0, 80.0),
                TemperatureSample::new(4, 200.0, 100.0),
                TemperatureSample::new(5, 220.0, 120.0),
            ],
        }
    }
}

impl TelemetrySnapshot {
    /// Snapshot shown while the printer cannot be reached.
    /// Snapshot shown while the printer link is down. The trend chart keeps its
    /// configured samples.
    pub fn unavailable(error: &str, temperature_trend: Vec<TemperatureSample>) -> Self {
        Self {
            state: PrinterState::Disconnected,
            speed_mm_s: 0,
            remaining_time: "--".to_string(),
            material: "Undefined".to_string(),
            material_used_g: 0,
            file_name: "N/A".to_string(),
            success_rate_pct: 0,
            maintenance: "Unknown".to_string(),
            alert: error.to_string(),
            total_hours: 0,
            pellets_remaining_kg: 0.0,
            average_consumption_g: 0,
            print_cost_eur: 0.0,
            temperature_trend,
        }
    }

    pub fn has_critical_alert(&self) -> bool {
        self.alert.to_lowercase().contains("unstable")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_snapshot() {
        let trend = TelemetrySnapshot::default().temperature_trend;
        let snapshot = TelemetrySnapshot::unavailable("No such file or directory", trend.clone());
        assert_eq!(snapshot.state, PrinterState::Disconnected);
        assert_eq!(snapshot.file_name, "N/A");
        assert_eq!(snapshot.alert, "No such file or directory");
        assert_eq!(snapshot.temperature_trend, trend);
        assert!(!snapshot.has_critical_alert());
    }

    #[test]
    fn test_default_alert_is_critical() {
        assert!(TelemetrySnapshot::default().has_critical_alert());
    }
}
