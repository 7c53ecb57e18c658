// Status domain model - Firmware temperature report parsing
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Matches `T:<nozzle> /<target> B:<bed> /<target>`. Both actuals are required,
/// each ` /<target>` segment is optional.
static TEMPERATURE_REPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"T:(\d+\.?\d*)(?: /?(\d+\.?\d*))? B:(\d+\.?\d*)(?: /?(\d+\.?\d*))?")
        .expect("temperature report pattern must compile")
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StatusReading {
    pub nozzle_temp: f64,
    pub nozzle_target: f64,
    pub bed_temp: f64,
    pub bed_target: f64,
}

impl StatusReading {
    /// Parse one firmware response line. Never fails: a line that does not
    /// match the report shape yields an all-zero reading.
    pub fn parse(line: &str) -> Self {
        let Some(caps) = TEMPERATURE_REPORT.captures(line) else {
            return Self::default();
        };

        let value = |idx: usize| {
            caps.get(idx)
                .and_then(|m| m.as_str().parse::<f64>().ok())
                .unwrap_or(0.0)
        };

        Self {
            nozzle_temp: value(1),
            nozzle_target: value(2),
            bed_temp: value(3),
            bed_target: value(4),
        }
    }
}

/// Outcome of one status poll. A dead link is never reported as a zero reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "link", rename_all = "snake_case")]
pub enum LinkStatus {
    Connected { reading: StatusReading, raw: String },
    Disconnected { error: String },
}

impl LinkStatus {
    pub fn from_line(raw: String) -> Self {
        let reading = StatusReading::parse(&raw);
        LinkStatus::Connected { reading, raw }
    }

    pub fn reading(&self) -> Option<&StatusReading> {
        match self {
            LinkStatus::Connected { reading, .. } => Some(reading),
            LinkStatus::Disconnected { .. } => None,
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, LinkStatus::Connected { .. })
    }
}
