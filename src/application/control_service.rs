// Control service - Use case for manual G-code dispatch
use crate::application::printer_link::PrinterLink;
use crate::domain::command::PrinterCommand;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Sent {
        port: String,
        command: PrinterCommand,
    },
    Failed {
        port: String,
        command: PrinterCommand,
        error: String,
    },
}

impl CommandOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CommandOutcome::Sent { .. })
    }

    pub fn message(&self) -> String {
        match self {
            CommandOutcome::Sent { port, command } => {
                format!("Command sent to port {}: {}", port, command)
            }
            CommandOutcome::Failed { port, error, .. } => {
                format!("Communication error with {}: {}", port, error)
            }
        }
    }
}

#[derive(Clone)]
pub struct ControlService {
    link: Arc<dyn PrinterLink>,
    default_port: String,
}

impl ControlService {
    pub fn new(link: Arc<dyn PrinterLink>, default_port: String) -> Self {
        Self { link, default_port }
    }

    pub fn available_ports(&self) -> Vec<String> {
        self.link.available_ports()
    }

    /// Explicit request, else first enumerated port, else the configured default.
    pub fn resolve_port(&self, requested: Option<&str>, available: &[String]) -> String {
        requested
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .or_else(|| available.first().cloned())
            .unwrap_or_else(|| self.default_port.clone())
    }

    pub async fn send(&self, port: &str, command: PrinterCommand) -> CommandOutcome {
        match self.link.send_command(port, command).await {
            Ok(()) => {
                tracing::info!("Sent {} to {}", command, port);
                CommandOutcome::Sent {
                    port: port.to_string(),
                    command,
                }
            }
            Err(e) => {
                tracing::error!("Failed to send {} to {}: {}", command, port, e);
                CommandOutcome::Failed {
                    port: port.to_string(),
                    command,
                    error: e.to_string(),
                }
            }
        }
    }
}
