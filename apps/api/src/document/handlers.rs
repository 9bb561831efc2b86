//! Axum route handler for report export.

use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::info;

use crate::document::{build_report_docx, report_file_name, DOCX_CONTENT_TYPE};
use crate::errors::{AppError, AppJson};
use crate::models::report::ReportContent;
use crate::models::student::StudentRecord;
use crate::state::AppState;
use crate::student::validation::validate_student;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub student_data: StudentRecord,
    pub report_content: ReportContent,
}

/// POST /api/v1/reports/export
///
/// Returns the finished report as a .docx attachment.
pub async fn handle_export(
    State(state): State<AppState>,
    AppJson(request): AppJson<ExportRequest>,
) -> Result<Response, AppError> {
    validate_student(&request.student_data).into_result()?;

    let unfilled = request.report_content.unfilled_fields();
    if !unfilled.is_empty() {
        let keys: Vec<&str> = unfilled.iter().map(|f| f.key()).collect();
        return Err(AppError::UnprocessableEntity(format!(
            "Report is incomplete; missing sections: {}",
            keys.join(", ")
        )));
    }

    let record = request.student_data;
    let content = request.report_content;
    let settings = state.config.report.clone();

    // docx assembly is CPU-bound; keep it off the async workers.
    let bytes = tokio::task::spawn_blocking(move || {
        build_report_docx(&record, &content, &settings).map(|b| (b, record.student_name))
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Export task failed: {e}")))?;
    let (bytes, student_name) = bytes?;

    let file_name = report_file_name(&student_name);
    info!(bytes = bytes.len(), "Exported report document");

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(DOCX_CONTENT_TYPE)),
            (header::CONTENT_DISPOSITION, content_disposition(&file_name)),
        ],
        Bytes::from(bytes),
    )
        .into_response())
}

/// Attachment header with an ASCII fallback name and an RFC 5987 UTF-8 name.
fn content_disposition(file_name: &str) -> HeaderValue {
    let fallback: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let encoded: String = file_name
        .bytes()
        .map(|b| {
            if b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.') {
                (b as char).to_string()
            } else {
                format!("%{b:02X}")
            }
        })
        .collect();

    let value = format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}");
    // Both parts are restricted to visible ASCII above.
    HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}
