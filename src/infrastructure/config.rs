use crate::domain::telemetry::TelemetrySnapshot;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct DashboardConfig {
    pub server: ServerSettings,
    pub serial: SerialSettings,
    pub history: HistorySettings,
    pub report: ReportSettings,
    /// Display-only values until a real telemetry feed exists
    pub telemetry: TelemetrySnapshot,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
    pub upload_limit_mb: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
            upload_limit_mb: 64,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SerialSettings {
    /// Port polled for the temperature report
    pub status_port: String,
    /// Port used for commands when none is selected and none is enumerated
    pub default_command_port: String,
    pub baud_rate: u32,
    pub read_timeout_ms: u64,
}

impl Default for SerialSettings {
    fn default() -> Self {
        Self {
            status_port: "/dev/ttyUSB0".to_string(),
            default_command_port: "COM3".to_string(),
            baud_rate: 115_200,
            read_timeout_ms: 2_000,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HistorySettings {
    pub path: PathBuf,
    /// Rows shown on the history view
    pub recent_limit: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/logs.csv"),
            recent_limit: 5,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ReportSettings {
    pub path: PathBuf,
    pub title: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/print_report.pdf"),
            title: "3D Print Report".to_string(),
        }
    }
}

/// Load `config/dashboard.*` (optional) overlaid with `DASHBOARD__SECTION__KEY`
/// environment variables.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("DASHBOARD")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
