// Domain layer - Printer status, history and report models
pub mod command;
pub mod dashboard;
pub mod diagnostics;
pub mod gcode;
pub mod history;
pub mod report;
pub mod status;
pub mod telemetry;
