// Printer link trait - one scoped serial exchange per call
use crate::domain::command::PrinterCommand;
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("cannot open {port}: {reason}")]
    Open { port: String, reason: String },

    #[error("write to {port} failed: {reason}")]
    Write { port: String, reason: String },

    #[error("read from {port} failed: {reason}")]
    Read { port: String, reason: String },

    #[error("no response from {port} within {timeout_ms} ms")]
    Timeout { port: String, timeout_ms: u64 },

    #[error("serial worker failed: {0}")]
    Worker(String),
}

#[async_trait]
pub trait PrinterLink: Send + Sync {
    /// Send the temperature query on the status port and return the single
    /// response line, lossily decoded.
    async fn query_status(&self) -> Result<String, LinkError>;

    /// Write one command line to `port`. Nothing is read back.
    async fn send_command(&self, port: &str, command: PrinterCommand) -> Result<(), LinkError>;

    /// Serial ports currently present on the host
    fn available_ports(&self) -> Vec<String>;
}
