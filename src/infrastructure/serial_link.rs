// Serial printer link - blocking serialport I/O on tokio's blocking pool
use crate::application::printer_link::{LinkError, PrinterLink};
use crate::domain::command::PrinterCommand;
use crate::infrastructure::config::SerialSettings;
use async_trait::async_trait;
use serialport::{ClearBuffer, SerialPort};
use std::io::{self, BufRead, BufReader, Read};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct SerialPrinterLink {
    status_port: String,
    baud_rate: u32,
    read_timeout: Duration,
}

impl SerialPrinterLink {
    pub fn new(settings: &SerialSettings) -> Self {
        Self {
            status_port: settings.status_port.clone(),
            baud_rate: settings.baud_rate,
            read_timeout: Duration::from_millis(settings.read_timeout_ms),
        }
    }

    fn open(&self, port: &str) -> Result<Box<dyn SerialPort>, LinkError> {
        serialport::new(port, self.baud_rate)
            .timeout(self.read_timeout)
            .open()
            .map_err(|e| LinkError::Open {
                port: port.to_string(),
                reason: e.to_string(),
            })
    }

    fn write_line(port: &mut dyn SerialPort, name: &str, command: PrinterCommand) -> Result<(), LinkError> {
        port.write_all(&command.wire_line())
            .and_then(|_| port.flush())
            .map_err(|e| LinkError::Write {
                port: name.to_string(),
                reason: e.to_string(),
            })
    }

    // The port handle is dropped, and therefore closed, on every return path.
    fn query_blocking(&self) -> Result<String, LinkError> {
        let name = self.status_port.as_str();
        let mut port = self.open(name)?;

        port.clear(ClearBuffer::Input).map_err(|e| LinkError::Read {
            port: name.to_string(),
            reason: e.to_string(),
        })?;
        Self::write_line(&mut *port, name, PrinterCommand::ReportTemperatures)?;

        read_response_line(&mut port, name, self.read_timeout)
    }

    fn send_blocking(&self, name: &str, command: PrinterCommand) -> Result<(), LinkError> {
        let mut port = self.open(name)?;
        Self::write_line(&mut *port, name, command)
    }
}

/// Read one `\n`-terminated line. A timeout after a partial line returns what
/// arrived; a timeout before any byte is a link error.
pub fn read_response_line<R: Read>(reader: R, port: &str, timeout: Duration) -> Result<String, LinkError> {
    let mut reader = BufReader::new(reader);
    let mut raw = Vec::new();

    match reader.read_until(b'\n', &mut raw) {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::TimedOut && !raw.is_empty() => {
            tracing::debug!("Partial line from {} before timeout", port);
        }
        Err(e) if e.kind() == io::ErrorKind::TimedOut => {
            return Err(LinkError::Timeout {
                port: port.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            });
        }
        Err(e) => {
            return Err(LinkError::Read {
                port: port.to_string(),
                reason: e.to_string(),
            });
        }
    }

    Ok(String::from_utf8_lossy(&raw).trim_end().to_string())
}

#[async_trait]
impl PrinterLink for SerialPrinterLink {
    async fn query_status(&self) -> Result<String, LinkError> {
        let link = self.clone();
        tokio::task::spawn_blocking(move || link.query_blocking())
            .await
            .map_err(|e| LinkError::Worker(e.to_string()))?
    }

    async fn send_command(&self, port: &str, command: PrinterCommand) -> Result<(), LinkError> {
        let link = self.clone();
        let port = port.to_string();
        tokio::task::spawn_blocking(move || link.send_blocking(&port, command))
            .await
            .map_err(|e| LinkError::Worker(e.to_string()))?
    }

    fn available_ports(&self) -> Vec<String> {
        match serialport::available_ports() {
            Ok(ports) => {
                let mut names: Vec<String> = ports.into_iter().map(|p| p.port_name).collect();
                names.sort();
                names
            }
            Err(e) => {
                tracing::warn!("Could not enumerate serial ports: {}", e);
                Vec::new()
            }
        }
    }
}
