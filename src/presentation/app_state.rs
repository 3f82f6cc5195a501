// Application state for HTTP handlers
use crate::application::report_service::ReportService;

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub report_service: ReportService,
}
