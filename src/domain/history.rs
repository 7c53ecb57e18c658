// Print history domain model
use super::gcode::GcodeAnalysis;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Column names of the flat history file, in order.
pub const HISTORY_COLUMNS: [&str; 4] = ["Fichier", "Durée", "Statut", "Date"];

pub const OUTCOME_SUCCEEDED: &str = "Succeeded";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(rename = "Fichier")]
    pub file_name: String,
    #[serde(rename = "Durée")]
    pub duration: String,
    #[serde(rename = "Statut")]
    pub outcome: String,
    #[serde(rename = "Date")]
    pub date: String,
}

impl HistoryRecord {
    pub fn new(file_name: &str, duration: &str, outcome: &str, date: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            duration: duration.to_string(),
            outcome: outcome.to_string(),
            date: date.to_string(),
        }
    }

    /// Record for a simulated successful print of an analyzed upload.
    pub fn completed(analysis: &GcodeAnalysis, date: NaiveDate) -> Self {
        Self::new(
            &analysis.file_name,
            &analysis.duration_label(),
            OUTCOME_SUCCEEDED,
            &date.format("%Y-%m-%d").to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_record() {
        let analysis = GcodeAnalysis {
            file_name: "hopper.gcode".to_string(),
            line_count: 1800,
            estimated_minutes: 60,
        };
        let date = NaiveDate::from_ymd_opt(2025, 5, 13).unwrap();
        let record = HistoryRecord::completed(&analysis, date);
        assert_eq!(record, HistoryRecord::new("hopper.gcode", "60 min", "Succeeded", "2025-05-13"));
    }
}
