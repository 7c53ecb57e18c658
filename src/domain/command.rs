// Printer commands - the fixed set of G-code lines the dashboard may send
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrinterCommand {
    ReportTemperatures,
    Pause,
    Resume,
    EmergencyStop,
}

impl PrinterCommand {
    pub fn gcode(&self) -> &'static str {
        match self {
            PrinterCommand::ReportTemperatures => "M105",
            PrinterCommand::Pause => "M25",
            PrinterCommand::Resume => "M24",
            PrinterCommand::EmergencyStop => "M112",
        }
    }

    /// Bytes written to the serial line.
    pub fn wire_line(&self) -> Vec<u8> {
        format!("{}\n", self.gcode()).into_bytes()
    }

    pub fn slug(&self) -> &'static str {
        match self {
            PrinterCommand::ReportTemperatures => "report-temperatures",
            PrinterCommand::Pause => "pause",
            PrinterCommand::Resume => "resume",
            PrinterCommand::EmergencyStop => "emergency-stop",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PrinterCommand::ReportTemperatures => "Report temperatures",
            PrinterCommand::Pause => "Pause",
            PrinterCommand::Resume => "Resume",
            PrinterCommand::EmergencyStop => "Emergency stop",
        }
    }

    pub fn requires_confirmation(&self) -> bool {
        matches!(self, PrinterCommand::EmergencyStop)
    }
}

impl fmt::Display for PrinterCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.gcode())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown printer command: {0}")]
pub struct UnknownCommand(pub String);

impl FromStr for PrinterCommand {
    type Err = UnknownCommand;

    /// Only operator controls are accepted; the temperature query is internal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pause" => Ok(PrinterCommand::Pause),
            "resume" => Ok(PrinterCommand::Resume),
            "emergency-stop" => Ok(PrinterCommand::EmergencyStop),
            other => Err(UnknownCommand(other.to_string())),
        }
    }
}
