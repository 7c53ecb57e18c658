// G-code upload analysis
use std::path::Path;

const SECONDS_PER_LINE: f64 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct GcodeAnalysis {
    pub file_name: String,
    pub line_count: usize,
    pub estimated_minutes: u64,
}

impl GcodeAnalysis {
    /// Analyze raw upload bytes. G-code files are treated as Latin-1 so any byte
    /// sequence decodes.
    pub fn from_upload(file_name: &str, bytes: &[u8]) -> Self {
        let text: String = bytes.iter().map(|&b| b as char).collect();
        let line_count = count_lines(&text);

        Self {
            file_name: file_name.to_string(),
            line_count,
            estimated_minutes: estimate_minutes(line_count),
        }
    }

    pub fn duration_label(&self) -> String {
        format!("{} min", self.estimated_minutes)
    }
}

/// Halves round to the even minute.
pub fn estimate_minutes(line_count: usize) -> u64 {
    (line_count as f64 * SECONDS_PER_LINE / 60.0).round_ties_even() as u64
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Count lines the way universal line splitting does: `\r\n` is one break,
/// a bare `\r` or any other separator ends a line too, and a trailing break
/// does not open an empty line.
fn count_lines(text: &str) -> usize {
    let mut chars = text.chars().peekable();
    let mut count = 0;
    let mut open_line = false;

    while let Some(c) = chars.next() {
        if is_line_break(c) {
            if c == '\r' && chars.peek() == Some(&'\n') {
                chars.next();
            }
            count += 1;
            open_line = false;
        } else {
            open_line = true;
        }
    }

    count + usize::from(open_line)
}

pub fn is_gcode_file(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("gcode"))
        .unwrap_or(false)
}
