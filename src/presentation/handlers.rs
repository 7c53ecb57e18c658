// HTTP request handlers
use crate::domain::command::PrinterCommand;
use crate::domain::dashboard::{DashboardPage, MachineStatus};
use crate::domain::diagnostics;
use crate::domain::gcode::{estimate_minutes, is_gcode_file, GcodeAnalysis};
use crate::domain::history::HistoryRecord;
use crate::infrastructure::http_response::attachment_response;
use crate::presentation::app_state::AppState;
use crate::presentation::views::{self, page_url, Notice, PageContext};
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct PortQuery {
    pub port: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommandForm {
    pub port: Option<String>,
    pub confirm: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionForm {
    pub port: Option<String>,
    pub file_name: String,
    pub line_count: usize,
}

fn page_context(state: &AppState, page: DashboardPage, requested: Option<&str>) -> PageContext {
    let ports = state.control_service.available_ports();
    let port = state.control_service.resolve_port(requested, &ports);
    PageContext { page, port, ports }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn index(Query(query): Query<PortQuery>) -> Redirect {
    let target = match query.port {
        Some(port) => page_url(DashboardPage::MachineState, &port),
        None => DashboardPage::MachineState.path().to_string(),
    };
    Redirect::to(&target)
}

fn render_machine(ctx: &PageContext, status: &MachineStatus, notice: Option<&Notice>) -> Html<String> {
    let diagnostics = diagnostics::analyze(status);
    Html(views::layout(ctx, notice, &views::machine(status, &diagnostics, &ctx.port)))
}

/// Machine state view, re-polled on every request
pub async fn machine_page(
    Query(query): Query<PortQuery>,
    State(state): State<Arc<AppState>>,
) -> Html<String> {
    let ctx = page_context(&state, DashboardPage::MachineState, query.port.as_deref());
    let status = state.status_service.poll().await;
    render_machine(&ctx, &status, None)
}

/// Dispatch an operator command. Commands that need confirmation render a
/// confirmation page until the form carries `confirm=yes`.
pub async fn send_command(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
    Form(form): Form<CommandForm>,
) -> Response {
    let command = match name.parse::<PrinterCommand>() {
        Ok(command) => command,
        Err(e) => return (StatusCode::NOT_FOUND, e.to_string()).into_response(),
    };

    let ctx = page_context(&state, DashboardPage::MachineState, form.port.as_deref());

    if command.requires_confirmation() && form.confirm.as_deref() != Some("yes") {
        let body = views::confirm_command(command, &ctx);
        return Html(views::layout(&ctx, None, &body)).into_response();
    }

    let outcome = state.control_service.send(&ctx.port, command).await;
    let notice = if outcome.is_success() {
        Notice::success(outcome.message())
    } else {
        Notice::error(outcome.message())
    };

    let status = state.status_service.poll().await;
    render_machine(&ctx, &status, Some(&notice)).into_response()
}

async fn render_history(state: &AppState, ctx: &PageContext, notice: Option<Notice>) -> Html<String> {
    let status = state.status_service.poll().await;

    let (records, notice) = match state.history_service.recent(state.history_limit) {
        Ok(records) => (records, notice),
        Err(e) => {
            tracing::error!("Error loading history: {:#}", e);
            (Vec::new(), Some(Notice::error(format!("Could not load history: {}", e))))
        }
    };

    let body = views::history(&records, &status.telemetry, &ctx.port);
    Html(views::layout(ctx, notice.as_ref(), &body))
}

pub async fn history_page(
    Query(query): Query<PortQuery>,
    State(state): State<Arc<AppState>>,
) -> Html<String> {
    let ctx = page_context(&state, DashboardPage::History, query.port.as_deref());
    render_history(&state, &ctx, None).await
}

pub async fn reset_history(
    State(state): State<Arc<AppState>>,
    Form(form): Form<PortQuery>,
) -> Html<String> {
    let ctx = page_context(&state, DashboardPage::History, form.port.as_deref());
    let notice = match state.history_service.reset() {
        Ok(()) => Notice::success("History file reset."),
        Err(e) => {
            tracing::error!("Error resetting history: {:#}", e);
            Notice::error(format!("Could not reset history: {}", e))
        }
    };
    render_history(&state, &ctx, Some(notice)).await
}

pub async fn export_history(State(state): State<Arc<AppState>>) -> Response {
    match state.history_service.export() {
        Ok(bytes) => match attachment_response(bytes, "text/csv; charset=utf-8", "logs.csv") {
            Ok(response) => response,
            Err(status) => status.into_response(),
        },
        Err(e) => {
            tracing::error!("Error exporting history: {:#}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn generate_report(State(state): State<Arc<AppState>>) -> Response {
    let status = state.status_service.poll().await;

    let path = match state.report_service.generate(&status) {
        Ok(path) => path,
        Err(e) => {
            tracing::error!("Error generating report: {:#}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match tokio::fs::read(&path).await {
        Ok(bytes) => match attachment_response(bytes, "application/pdf", "print_report.pdf") {
            Ok(response) => response,
            Err(status) => status.into_response(),
        },
        Err(e) => {
            tracing::error!("Error reading report {}: {}", path.display(), e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn maintenance_page(
    Query(query): Query<PortQuery>,
    State(state): State<Arc<AppState>>,
) -> Html<String> {
    let ctx = page_context(&state, DashboardPage::Maintenance, query.port.as_deref());
    let status = state.status_service.poll().await;
    Html(views::layout(&ctx, None, &views::maintenance(&status.telemetry)))
}

pub async fn gcode_page(
    Query(query): Query<PortQuery>,
    State(state): State<Arc<AppState>>,
) -> Html<String> {
    let ctx = page_context(&state, DashboardPage::Gcode, query.port.as_deref());
    Html(views::layout(&ctx, None, &views::gcode(None, &ctx.port)))
}

/// Analyze an uploaded `.gcode` file
pub async fn upload_gcode(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> Response {
    let mut port = None;
    let mut upload = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
        };

        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("port") => match field.text().await {
                Ok(text) => port = Some(text),
                Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
            },
            Some("gcode") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                match field.bytes().await {
                    Ok(bytes) => upload = Some((file_name, bytes)),
                    Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
                }
            }
            _ => {}
        }
    }

    let ctx = page_context(&state, DashboardPage::Gcode, port.as_deref());

    let analysis = match upload {
        Some((file_name, bytes)) if is_gcode_file(&file_name) => {
            GcodeAnalysis::from_upload(&file_name, &bytes)
        }
        _ => {
            let notice = Notice::error("Please choose a .gcode file.");
            let body = views::gcode(None, &ctx.port);
            return Html(views::layout(&ctx, Some(&notice), &body)).into_response();
        }
    };

    tracing::info!(
        "Analyzed {}: {} lines, ~{} min",
        analysis.file_name,
        analysis.line_count,
        analysis.estimated_minutes
    );
    Html(views::layout(&ctx, None, &views::gcode(Some(&analysis), &ctx.port))).into_response()
}

/// Log a simulated successful print of an analyzed upload
pub async fn complete_print(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CompletionForm>,
) -> Response {
    let ctx = page_context(&state, DashboardPage::Gcode, form.port.as_deref());
    let analysis = GcodeAnalysis {
        file_name: form.file_name,
        line_count: form.line_count,
        estimated_minutes: estimate_minutes(form.line_count),
    };

    let today = chrono::Local::now().date_naive();
    match state.history_service.record_completion(&analysis, today) {
        Ok(_) => Redirect::to(&page_url(DashboardPage::History, &ctx.port)).into_response(),
        Err(e) => {
            tracing::error!("Error recording print: {:#}", e);
            let notice = Notice::error(format!("Could not record the print: {}", e));
            let body = views::gcode(Some(&analysis), &ctx.port);
            Html(views::layout(&ctx, Some(&notice), &body)).into_response()
        }
    }
}

pub async fn api_status(State(state): State<Arc<AppState>>) -> Json<MachineStatus> {
    Json(state.status_service.poll().await)
}

pub async fn api_history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<HistoryRecord>>, StatusCode> {
    state.history_service.all().map(Json).map_err(|e| {
        tracing::error!("Error loading history: {:#}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}
