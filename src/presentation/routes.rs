// Router - maps dashboard URLs to handlers
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    api_history, api_status, complete_print, export_history, gcode_page, generate_report,
    health_check, history_page, index, machine_page, maintenance_page, reset_history,
    send_command, upload_gcode,
};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn router(state: Arc<AppState>, upload_limit_bytes: usize) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/", get(index))
        .route("/machine", get(machine_page))
        .route("/commands/:command", post(send_command))
        .route("/history", get(history_page))
        .route("/history/reset", post(reset_history))
        .route("/history/export", get(export_history))
        .route("/report", post(generate_report))
        .route("/maintenance", get(maintenance_page))
        .route("/gcode", get(gcode_page).post(upload_gcode))
        .route("/gcode/complete", post(complete_print))
        .route("/api/status", get(api_status))
        .route("/api/history", get(api_history))
        .layer(DefaultBodyLimit::max(upload_limit_bytes))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::control_service::ControlService;
    use crate::application::fakes::{FakeLink, FixedTelemetry, MemoryHistory, RecordingRenderer};
    use crate::application::history_repository::HistoryRepository;
    use crate::application::history_service::HistoryService;
    use crate::application::printer_link::PrinterLink;
    use crate::application::report_renderer::ReportRenderer;
    use crate::application::report_service::ReportService;
    use crate::application::status_service::StatusService;
    use crate::domain::command::PrinterCommand;
    use crate::domain::history::HistoryRecord;
    use crate::infrastructure::pdf_report::PdfReportRenderer;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tempfile::TempDir;
    use tower::ServiceExt;

    const FORM: &str = "application/x-www-form-urlencoded";

    struct Harness {
        link: Arc<FakeLink>,
        history: Arc<MemoryHistory>,
        router: Router,
    }

    fn harness_with(link: FakeLink, renderer: Arc<dyn ReportRenderer>) -> Harness {
        let link = Arc::new(link);
        let history = Arc::new(MemoryHistory::default());
        let printer_link: Arc<dyn PrinterLink> = link.clone();
        let repository: Arc<dyn HistoryRepository> = history.clone();

        let state = Arc::new(AppState {
            status_service: StatusService::new(printer_link.clone(), Arc::new(FixedTelemetry::default())),
            control_service: ControlService::new(printer_link, "COM3".to_string()),
            history_service: HistoryService::new(repository),
            report_service: ReportService::new(renderer),
            history_limit: 5,
        });

        Harness {
            link,
            history,
            router: router(state, 1024 * 1024),
        }
    }

    fn harness(link: FakeLink) -> Harness {
        harness_with(link, Arc::new(RecordingRenderer::default()))
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn form_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, FORM)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = harness(FakeLink::responding("")).router.oneshot(get_request("/healthz")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "ok");
    }

    #[tokio::test]
    async fn test_index_redirects_to_machine_view() {
        let response = harness(FakeLink::responding("")).router.oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/machine");
    }

    #[tokio::test]
    async fn test_machine_view_shows_reading() {
        let h = harness(FakeLink::responding("ok T:212.4 /215.0 B:61.0 /60.0"));
        let response = h.router.oneshot(get_request("/machine")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("212.4°C"));
        assert!(html.contains("Target: 215°C"));
        assert!(html.contains("Printing in progress."));
        assert!(html.contains("<option value=\"/dev/ttyUSB0\" selected>"));
    }

    #[tokio::test]
    async fn test_machine_view_when_disconnected() {
        let h = harness(FakeLink::unreachable());
        let html = body_text(h.router.oneshot(get_request("/machine")).await.unwrap()).await;

        assert!(html.contains("Problem detected with the printer state."));
        assert!(html.contains("Connection lost with the machine"));
        assert!(html.contains("cannot open /dev/ttyUSB0"));
        assert!(html.contains("<option value=\"COM3\" selected>"));
    }

    #[tokio::test]
    async fn test_api_status_distinguishes_disconnected() {
        let h = harness(FakeLink::unreachable());
        let json = body_text(h.router.oneshot(get_request("/api/status")).await.unwrap()).await;
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["link"]["link"], "disconnected");
        assert_eq!(value["telemetry"]["state"], "disconnected");

        let h = harness(FakeLink::responding("garbage"));
        let json = body_text(h.router.oneshot(get_request("/api/status")).await.unwrap()).await;
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["link"]["link"], "connected");
        assert_eq!(value["link"]["reading"]["nozzle_temp"], 0.0);
    }

    #[tokio::test]
    async fn test_pause_is_sent_to_selected_port() {
        let h = harness(FakeLink::responding(""));
        let response = h
            .router
            .oneshot(form_request("/commands/pause", "port=%2Fdev%2FttyACM1"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Command sent to port /dev/ttyACM1: M25"));
        assert_eq!(h.link.sent(), vec![("/dev/ttyACM1".to_string(), PrinterCommand::Pause)]);
    }

    #[tokio::test]
    async fn test_emergency_stop_requires_confirmation() {
        let h = harness(FakeLink::responding(""));
        let html = body_text(
            h.router
                .clone()
                .oneshot(form_request("/commands/emergency-stop", "port=COM4"))
                .await
                .unwrap(),
        )
        .await;

        assert!(html.contains("Are you sure you want to force emergency stop (M112) on COM4?"));
        assert!(h.link.sent().is_empty());

        let response = h
            .router
            .oneshot(form_request("/commands/emergency-stop", "port=COM4&confirm=yes"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(h.link.sent(), vec![("COM4".to_string(), PrinterCommand::EmergencyStop)]);
    }

    #[tokio::test]
    async fn test_command_failure_is_shown() {
        let h = harness(FakeLink::unreachable());
        let html = body_text(
            h.router
                .oneshot(form_request("/commands/resume", "port=COM9"))
                .await
                .unwrap(),
        )
        .await;
        assert!(html.contains("Communication error with COM9"));
    }

    #[tokio::test]
    async fn test_unknown_command_is_not_found() {
        let h = harness(FakeLink::responding(""));
        let response = h.router.oneshot(form_request("/commands/M104", "port=COM3")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_gcode_upload_is_analyzed() {
        let h = harness(FakeLink::responding(""));
        let boundary = "pellet-boundary";
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"port\"\r\n\r\nCOM3\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"gcode\"; filename=\"hopper.gcode\"\r\n\
             Content-Type: application/octet-stream\r\n\r\nG28\nG1 X10\nG1 Y10\n\r\n--{b}--\r\n",
            b = boundary
        );
        let request = Request::builder()
            .method("POST")
            .uri("/gcode")
            .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={}", boundary))
            .body(Body::from(body))
            .unwrap();

        let html = body_text(h.router.oneshot(request).await.unwrap()).await;
        assert!(html.contains("File loaded: hopper.gcode"));
        assert!(html.contains("<p>Lines: 3</p>"));
        assert!(html.contains("name=\"line_count\" value=\"3\""));
    }

    #[tokio::test]
    async fn test_non_gcode_upload_is_rejected() {
        let h = harness(FakeLink::responding(""));
        let boundary = "pellet-boundary";
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"gcode\"; filename=\"part.stl\"\r\n\r\nsolid\r\n--{b}--\r\n",
            b = boundary
        );
        let request = Request::builder()
            .method("POST")
            .uri("/gcode")
            .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={}", boundary))
            .body(Body::from(body))
            .unwrap();

        let html = body_text(h.router.oneshot(request).await.unwrap()).await;
        assert!(html.contains("Please choose a .gcode file."));
    }

    #[tokio::test]
    async fn test_simulated_completion_is_logged() {
        let h = harness(FakeLink::responding(""));
        let response = h
            .router
            .oneshot(form_request("/gcode/complete", "port=COM3&file_name=hopper.gcode&line_count=1800"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/history?port=COM3");

        let records = h.history.all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].file_name, "hopper.gcode");
        assert_eq!(records[0].duration, "60 min");
        assert_eq!(records[0].outcome, "Succeeded");
    }

    #[tokio::test]
    async fn test_history_view_and_reset() {
        let h = harness(FakeLink::responding(""));
        for i in 0..6 {
            h.history
                .append(&HistoryRecord::new(&format!("part{i}.gcode"), "1 min", "Succeeded", "2025-05-13"))
                .unwrap();
        }

        let html = body_text(h.router.clone().oneshot(get_request("/history")).await.unwrap()).await;
        assert!(!html.contains("part0.gcode"));
        assert!(html.contains("part5.gcode"));
        assert!(html.contains("85 %"));

        let html = body_text(
            h.router
                .oneshot(form_request("/history/reset", "port=COM3"))
                .await
                .unwrap(),
        )
        .await;
        assert!(html.contains("History file reset."));
        assert!(html.contains("No prints recorded yet."));
        assert!(h.history.all().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_export_is_csv() {
        let h = harness(FakeLink::responding(""));
        let response = h.router.oneshot(get_request("/history/export")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv; charset=utf-8");
        assert!(body_text(response).await.starts_with("Fichier,Durée,Statut,Date"));
    }

    #[tokio::test]
    async fn test_report_download() {
        let dir = TempDir::new().unwrap();
        let renderer = Arc::new(PdfReportRenderer::new(dir.path().join("report.pdf"), "3D Print Report"));
        let h = harness_with(FakeLink::responding("T:200 B:60"), renderer);

        let response = h.router.oneshot(form_request("/report", "port=COM3")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_maintenance_view() {
        let h = harness(FakeLink::responding(""));
        let html = body_text(h.router.oneshot(get_request("/maintenance?port=COM3")).await.unwrap()).await;
        assert!(html.contains("<b>Next maintenance</b>: replace nozzle (5 h left)"));
        assert!(html.contains("<b>Pellets remaining</b>: 0.8 kg"));
    }
}
