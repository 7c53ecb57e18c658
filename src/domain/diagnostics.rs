// Diagnostics - rule-based analysis of the machine status
use super::dashboard::MachineStatus;
use super::telemetry::PrinterState;

const MIN_PRINTING_NOZZLE_TEMP: f64 = 170.0;
const MIN_ABS_BED_TEMP: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Critical,
    Medium,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub problem: &'static str,
    pub solution: &'static str,
}

impl Diagnostic {
    fn new(severity: Severity, problem: &'static str, solution: &'static str) -> Self {
        Self {
            severity,
            problem,
            solution,
        }
    }
}

pub fn analyze(status: &MachineStatus) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let state = status.state();

    if !status.link.is_connected() {
        diagnostics.push(Diagnostic::new(
            Severity::Critical,
            "Connection lost with the machine",
            "Check the USB port or the serial link.",
        ));
    }

    if state == PrinterState::Printing && status.nozzle_temp() < MIN_PRINTING_NOZZLE_TEMP {
        diagnostics.push(Diagnostic::new(
            Severity::Critical,
            "Nozzle too cold while printing",
            "Check the heater cartridge or the thermistor.",
        ));
    }

    if status.bed_temp() < MIN_ABS_BED_TEMP
        && status.telemetry.material.to_lowercase().contains("abs")
    {
        diagnostics.push(Diagnostic::new(
            Severity::Medium,
            "Bed temperature too low for ABS",
            "Raise the heated bed to 60-80°C.",
        ));
    }

    if status.telemetry.file_name == "N/A" && state == PrinterState::Idle {
        diagnostics.push(Diagnostic::new(
            Severity::Info,
            "No file loaded",
            "Please load a G-code file.",
        ));
    }

    diagnostics
}
