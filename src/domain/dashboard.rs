// Dashboard domain model
use super::status::LinkStatus;
use super::telemetry::{PrinterState, TelemetrySnapshot};
use serde::Serialize;

/// Everything one poll yields to the UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MachineStatus {
    pub link: LinkStatus,
    pub telemetry: TelemetrySnapshot,
}

impl MachineStatus {
    pub fn new(link: LinkStatus, telemetry: TelemetrySnapshot) -> Self {
        Self { link, telemetry }
    }

    pub fn state(&self) -> PrinterState {
        if self.link.is_connected() {
            self.telemetry.state
        } else {
            PrinterState::Disconnected
        }
    }

    pub fn nozzle_temp(&self) -> f64 {
        self.link.reading().map(|r| r.nozzle_temp).unwrap_or(0.0)
    }

    pub fn bed_temp(&self) -> f64 {
        self.link.reading().map(|r| r.bed_temp).unwrap_or(0.0)
    }

    /// Tiles for the machine state view, in display order.
    pub fn metrics(&self) -> Vec<Metric> {
        let reading = self.link.reading().copied().unwrap_or_default();
        let telemetry = &self.telemetry;

        vec![
            Metric::new(
                "Nozzle",
                format!("{}°C", reading.nozzle_temp),
                Some(format!("Target: {}°C", reading.nozzle_target)),
            ),
            Metric::new(
                "Bed",
                format!("{}°C", reading.bed_temp),
                Some(format!("Target: {}°C", reading.bed_target)),
            ),
            Metric::new("Speed", format!("{} mm/s", telemetry.speed_mm_s), None),
            Metric::new("Time remaining", telemetry.remaining_time.clone(), None),
            Metric::new("Material", telemetry.material.clone(), None),
            Metric::new("File", telemetry.file_name.clone(), None),
        ]
    }

    /// Ordered label/value pairs written to the PDF report.
    pub fn report_fields(&self) -> Vec<(String, String)> {
        vec![
            ("File".to_string(), self.telemetry.file_name.clone()),
            ("Estimated duration".to_string(), self.telemetry.remaining_time.clone()),
            ("Status".to_string(), self.state().label().to_string()),
            ("Material".to_string(), self.telemetry.material.clone()),
            ("Nozzle temp.".to_string(), self.nozzle_temp().to_string()),
            ("Bed temp.".to_string(), self.bed_temp().to_string()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub label: String,
    pub value: String,
    pub detail: Option<String>,
}

impl Metric {
    pub fn new(label: &str, value: String, detail: Option<String>) -> Self {
        Self {
            label: label.to_string(),
            value,
            detail,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardPage {
    MachineState,
    History,
    Maintenance,
    Gcode,
}

impl DashboardPage {
    pub const ALL: [DashboardPage; 4] = [
        DashboardPage::MachineState,
        DashboardPage::History,
        DashboardPage::Maintenance,
        DashboardPage::Gcode,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            DashboardPage::MachineState => "/machine",
            DashboardPage::History => "/history",
            DashboardPage::Maintenance => "/maintenance",
            DashboardPage::Gcode => "/gcode",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DashboardPage::MachineState => "Machine state",
            DashboardPage::History => "History",
            DashboardPage::Maintenance => "Maintenance",
            DashboardPage::Gcode => "G-code",
        }
    }
}
