// HTML views for the operator dashboard
use crate::domain::command::PrinterCommand;
use crate::domain::dashboard::{DashboardPage, MachineStatus};
use crate::domain::diagnostics::{Diagnostic, Severity};
use crate::domain::gcode::GcodeAnalysis;
use crate::domain::history::{HistoryRecord, HISTORY_COLUMNS};
use crate::domain::status::LinkStatus;
use crate::domain::telemetry::{PrinterState, TelemetrySnapshot, TemperatureSample};

const STYLE: &str = "
body { font-family: sans-serif; margin: 0; display: flex; }
aside { width: 240px; padding: 1rem; background: #f1f3f5; min-height: 100vh; }
main { flex: 1; padding: 1rem 2rem; }
nav a { display: block; padding: .4rem 0; }
nav a.active { font-weight: bold; }
.notice { padding: .6rem 1rem; border-radius: 4px; margin: .5rem 0; }
.success { background: #d3f9d8; } .warning { background: #fff3bf; }
.error { background: #ffe3e3; } .info { background: #d0ebff; }
.metrics { display: grid; grid-template-columns: repeat(3, 1fr); gap: 1rem; }
.metric { border: 1px solid #dee2e6; border-radius: 4px; padding: .8rem; }
.metric .value { font-size: 1.6rem; }
.metric .detail { color: #868e96; }
.controls form { display: inline-block; margin-right: .5rem; }
table { border-collapse: collapse; } td, th { border: 1px solid #dee2e6; padding: .3rem .6rem; }
.maintenance li { font-size: 20px; line-height: 1.8; }
";

/// Request-scoped UI state: which view, which port.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub page: DashboardPage,
    pub port: String,
    pub ports: Vec<String>,
}

impl PageContext {
    pub fn url(&self, page: DashboardPage) -> String {
        page_url(page, &self.port)
    }
}

pub fn page_url(page: DashboardPage, port: &str) -> String {
    format!("{}?port={}", page.path(), urlencoding::encode(port))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
    Info,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, text: text.into() }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Warning, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, text: text.into() }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, text: text.into() }
    }

    fn render(&self) -> String {
        let class = match self.kind {
            NoticeKind::Success => "success",
            NoticeKind::Warning => "warning",
            NoticeKind::Error => "error",
            NoticeKind::Info => "info",
        };
        format!("<div class=\"notice {}\">{}</div>", class, escape(&self.text))
    }
}

/// Safe for both element text and quoted attribute values.
pub fn escape(text: &str) -> String {
    html_escape::encode_quoted_attribute(text).into_owned()
}

fn port_field(port: &str) -> String {
    format!("<input type=\"hidden\" name=\"port\" value=\"{}\">", escape(port))
}

pub fn layout(ctx: &PageContext, notice: Option<&Notice>, body: &str) -> String {
    let mut options = String::new();
    let mut ports = ctx.ports.clone();
    if !ports.contains(&ctx.port) {
        ports.push(ctx.port.clone());
    }
    for port in &ports {
        let selected = if *port == ctx.port { " selected" } else { "" };
        options.push_str(&format!(
            "<option value=\"{0}\"{1}>{0}</option>",
            escape(port),
            selected
        ));
    }

    let mut nav = String::new();
    for page in DashboardPage::ALL {
        let class = if page == ctx.page { " class=\"active\"" } else { "" };
        nav.push_str(&format!(
            "<a href=\"{}\"{}>{}</a>",
            escape(&ctx.url(page)),
            class,
            page.title()
        ));
    }

    format!(
        "<!DOCTYPE html>
<html lang=\"en\">
<head><meta charset=\"utf-8\"><title>Pellet 3D Printer Dashboard</title><style>{style}</style></head>
<body>
<aside>
<form method=\"get\" action=\"{action}\">
<label>Printer port<br><select name=\"port\">{options}</select></label>
<button type=\"submit\">Select</button>
</form>
<p>Selected port: {port}</p>
<nav>{nav}</nav>
</aside>
<main>
<h1>Pellet 3D Printer Dashboard</h1>
<a class=\"button\" href=\"{refresh}\">Refresh data</a>
{notice}
{body}
</main>
</body>
</html>",
        style = STYLE,
        action = ctx.page.path(),
        options = options,
        port = escape(&ctx.port),
        nav = nav,
        refresh = escape(&ctx.url(ctx.page)),
        notice = notice.map(Notice::render).unwrap_or_default(),
        body = body,
    )
}

pub fn machine(status: &MachineStatus, diagnostics: &[Diagnostic], port: &str) -> String {
    let mut html = String::from("<h2>Real-time state</h2>");

    let banner = match status.state() {
        PrinterState::Printing => Notice::success("Printing in progress."),
        PrinterState::Paused => Notice::warning("The printer is paused."),
        _ => Notice::error("Problem detected with the printer state."),
    };
    html.push_str(&banner.render());

    if let LinkStatus::Disconnected { error } = &status.link {
        html.push_str(&Notice::error(format!("Printer link: {}", error)).render());
    }
    if status.telemetry.has_critical_alert() {
        html.push_str(&Notice::error(format!("Critical alert: {}", status.telemetry.alert)).render());
    }

    html.push_str("<div class=\"metrics\">");
    for metric in status.metrics() {
        html.push_str(&format!(
            "<div class=\"metric\"><div class=\"label\">{}</div><div class=\"value\">{}</div>",
            escape(&metric.label),
            escape(&metric.value)
        ));
        if let Some(detail) = &metric.detail {
            html.push_str(&format!("<div class=\"detail\">{}</div>", escape(detail)));
        }
        html.push_str("</div>");
    }
    html.push_str("</div>");

    if !diagnostics.is_empty() {
        html.push_str("<h3>Automatic diagnostics</h3>");
        for diagnostic in diagnostics {
            let text = format!("{} - {}", diagnostic.problem, diagnostic.solution);
            let notice = match diagnostic.severity {
                Severity::Critical => Notice::error(text),
                Severity::Medium => Notice::warning(text),
                Severity::Info => Notice::info(text),
            };
            html.push_str(&notice.render());
        }
    }

    html.push_str("<h2>Printer control</h2><div class=\"controls\">");
    for command in [PrinterCommand::Pause, PrinterCommand::Resume, PrinterCommand::EmergencyStop] {
        html.push_str(&format!(
            "<form method=\"post\" action=\"/commands/{}\">{}<button type=\"submit\">{}</button></form>",
            command.slug(),
            port_field(port),
            command.label()
        ));
    }
    html.push_str("</div>");

    html
}

pub fn confirm_command(command: PrinterCommand, ctx: &PageContext) -> String {
    format!(
        "<h2>Confirm {label}</h2>
<p>Are you sure you want to force {label} ({gcode}) on {port}?</p>
<form method=\"post\" action=\"/commands/{slug}\">{port_field}<input type=\"hidden\" name=\"confirm\" value=\"yes\"><button type=\"submit\">Yes, send {gcode}</button></form>
<a href=\"{cancel}\">Cancel</a>",
        label = command.label().to_lowercase(),
        gcode = command.gcode(),
        port = escape(&ctx.port),
        slug = command.slug(),
        port_field = port_field(&ctx.port),
        cancel = escape(&ctx.url(DashboardPage::MachineState)),
    )
}

pub fn history(records: &[HistoryRecord], telemetry: &TelemetrySnapshot, port: &str) -> String {
    let mut html = String::from("<h2>Print history</h2>");

    if records.is_empty() {
        html.push_str("<p>No prints recorded yet.</p>");
    } else {
        html.push_str("<table><tr>");
        for column in HISTORY_COLUMNS {
            html.push_str(&format!("<th>{}</th>", column));
        }
        html.push_str("</tr>");
        for record in records {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(&record.file_name),
                escape(&record.duration),
                escape(&record.outcome),
                escape(&record.date)
            ));
        }
        html.push_str("</table>");
    }

    html.push_str("<p><a href=\"/history/export\">Download logs</a></p>");
    html.push_str(&format!(
        "<form method=\"post\" action=\"/history/reset\">{}<button type=\"submit\">Reset logs</button></form>",
        port_field(port)
    ));

    html.push_str("<h3>Recent temperatures</h3>");
    html.push_str(&temperature_chart(&telemetry.temperature_trend));

    html.push_str(&format!(
        "<div class=\"metric\"><div class=\"label\">Success rate</div><div class=\"value\">{} %</div></div>",
        telemetry.success_rate_pct
    ));

    html.push_str(&format!(
        "<form method=\"post\" action=\"/report\">{}<button type=\"submit\">Generate PDF report</button></form>",
        port_field(port)
    ));

    html
}

/// Inline SVG line chart of nozzle and bed temperatures over time.
pub fn temperature_chart(samples: &[TemperatureSample]) -> String {
    const WIDTH: f64 = 480.0;
    const HEIGHT: f64 = 240.0;
    const PAD: f64 = 30.0;

    if samples.is_empty() {
        return "<p>No temperature data.</p>".to_string();
    }

    let max_minute = samples.iter().map(|s| s.minute).max().unwrap_or(0).max(1) as f64;
    let max_temp = samples
        .iter()
        .map(|s| s.nozzle.max(s.bed))
        .fold(1.0_f64, f64::max);

    let point = |minute: u32, temp: f64| {
        let x = PAD + minute as f64 / max_minute * (WIDTH - 2.0 * PAD);
        let y = HEIGHT - PAD - temp / max_temp * (HEIGHT - 2.0 * PAD);
        format!("{:.1},{:.1}", x, y)
    };
    let nozzle: Vec<String> = samples.iter().map(|s| point(s.minute, s.nozzle)).collect();
    let bed: Vec<String> = samples.iter().map(|s| point(s.minute, s.bed)).collect();

    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" role=\"img\" aria-label=\"Temperature trend\">
<line x1=\"{p}\" y1=\"{base}\" x2=\"{right}\" y2=\"{base}\" stroke=\"#adb5bd\"/>
<line x1=\"{p}\" y1=\"{p}\" x2=\"{p}\" y2=\"{base}\" stroke=\"#adb5bd\"/>
<polyline fill=\"none\" stroke=\"#d9480f\" stroke-width=\"2\" points=\"{nozzle}\"/>
<polyline fill=\"none\" stroke=\"#1c7ed6\" stroke-width=\"2\" points=\"{bed}\"/>
<text x=\"{p}\" y=\"{legend}\" font-size=\"12\" fill=\"#d9480f\">Nozzle (°C)</text>
<text x=\"{bed_x}\" y=\"{legend}\" font-size=\"12\" fill=\"#1c7ed6\">Bed (°C)</text>
<text x=\"{right}\" y=\"{h}\" font-size=\"12\" text-anchor=\"end\">Time (min), max {max_temp:.0}°C</text>
</svg>",
        w = WIDTH,
        h = HEIGHT,
        p = PAD,
        base = HEIGHT - PAD,
        right = WIDTH - PAD,
        legend = PAD - 10.0,
        bed_x = PAD + 110.0,
        nozzle = nozzle.join(" "),
        bed = bed.join(" "),
        max_temp = max_temp,
    )
}

pub fn maintenance(telemetry: &TelemetrySnapshot) -> String {
    format!(
        "<h2>Maintenance &amp; alerts</h2>
<ul class=\"maintenance\">
<li><b>Next maintenance</b>: {}</li>
<li><b>Last alert</b>: {}</li>
<li><b>Total usage</b>: {} hours</li>
<li><b>Pellets remaining</b>: {} kg</li>
<li><b>Average consumption</b>: {} g</li>
<li><b>Estimated cost</b>: {} €</li>
</ul>",
        escape(&telemetry.maintenance),
        escape(&telemetry.alert),
        telemetry.total_hours,
        telemetry.pellets_remaining_kg,
        telemetry.average_consumption_g,
        telemetry.print_cost_eur
    )
}

pub fn gcode(analysis: Option<&GcodeAnalysis>, port: &str) -> String {
    let mut html = format!(
        "<h2>G-code analysis</h2>
<form method=\"post\" action=\"/gcode\" enctype=\"multipart/form-data\">{}
<label>Load a .gcode file <input type=\"file\" name=\"gcode\" accept=\".gcode\"></label>
<button type=\"submit\">Analyze</button>
</form>",
        port_field(port)
    );

    if let Some(analysis) = analysis {
        html.push_str(&Notice::success(format!("File loaded: {}", analysis.file_name)).render());
        html.push_str(&format!(
            "<p>Lines: {}</p><p>Estimated duration: {} minutes</p>",
            analysis.line_count, analysis.estimated_minutes
        ));
        html.push_str(&format!(
            "<form method=\"post\" action=\"/gcode/complete\">{}\
<input type=\"hidden\" name=\"file_name\" value=\"{}\">\
<input type=\"hidden\" name=\"line_count\" value=\"{}\">\
<button type=\"submit\">Simulate print completion</button></form>",
            port_field(port),
            escape(&analysis.file_name),
            analysis.line_count
        ));
    }

    html
}
