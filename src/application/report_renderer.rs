// Report renderer trait
use std::path::PathBuf;

pub trait ReportRenderer: Send + Sync {
    /// Render the ordered fields below a title line and return the written
    /// document's path.
    fn render(&self, fields: &[(String, String)]) -> anyhow::Result<PathBuf>;
}
