// Report layout - title plus one `label: value` line per field
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    pub title: String,
    pub lines: Vec<String>,
}

impl ReportLayout {
    pub fn new(title: &str, fields: &[(String, String)]) -> Self {
        Self {
            title: title.to_string(),
            lines: fields
                .iter()
                .map(|(label, value)| format!("{}: {}", label, value))
                .collect(),
        }
    }

    /// Split field lines into pages. The first page also carries the title, so
    /// it holds `first_page` lines; later pages hold `per_page`.
    pub fn pages(&self, first_page: usize, per_page: usize) -> Vec<&[String]> {
        let first_page = first_page.max(1);
        let per_page = per_page.max(1);

        let split = first_page.min(self.lines.len());
        let (head, rest) = self.lines.split_at(split);

        let mut pages = vec![head];
        pages.extend(rest.chunks(per_page));
        pages
    }
}
