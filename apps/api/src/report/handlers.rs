//! Axum route handlers for the Report API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::{AppError, AppJson};
use crate::models::report::{ReportContent, ReportField};
use crate::models::student::{Skill, StudentRecord};
use crate::report::catalog::{
    field_title, EffectiveLearning, PreviewSection, EFFECTIVE_LEARNING, PREVIEW_SECTIONS,
    SKILL_GROUPS,
};
use crate::report::generator::{generate_report, regenerate_field};
use crate::state::AppState;
use crate::student::validation::validate_student;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Every successful report response is wrapped as `{"success": true, "data": ...}`.
#[derive(Debug, Serialize)]
pub struct ActionResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ActionResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(ActionResponse {
            success: true,
            data,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateRequest {
    pub student_input: StudentRecord,
    pub current_report_output: ReportContent,
    pub field_to_regenerate: ReportField,
}

#[derive(Debug, Serialize)]
pub struct CatalogSkill {
    pub key: Skill,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogGroup {
    pub title: &'static str,
    pub next_steps_field: ReportField,
    pub skills: Vec<CatalogSkill>,
}

#[derive(Debug, Serialize)]
pub struct CatalogField {
    pub key: ReportField,
    pub title: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub skill_groups: Vec<CatalogGroup>,
    pub effective_learning: &'static [EffectiveLearning],
    pub fields: Vec<CatalogField>,
    pub preview_sections: &'static [PreviewSection],
    pub progress_options: Vec<&'static str>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/reports/generate
///
/// Validates the student record and generates every report section.
pub async fn handle_generate(
    State(state): State<AppState>,
    AppJson(record): AppJson<StudentRecord>,
) -> Result<Json<ActionResponse<ReportContent>>, AppError> {
    validate_student(&record).into_result()?;

    let request_id = Uuid::new_v4();
    info!(%request_id, "Generating report");

    let content = generate_report(state.llm.as_ref(), &record)
        .instrument(info_span!("generate_report", %request_id))
        .await?;

    Ok(ActionResponse::ok(content))
}

/// POST /api/v1/reports/regenerate
///
/// Regenerates one section and returns the full report with that section swapped in.
pub async fn handle_regenerate(
    State(state): State<AppState>,
    AppJson(request): AppJson<RegenerateRequest>,
) -> Result<Json<ActionResponse<ReportContent>>, AppError> {
    validate_student(&request.student_input).into_result()?;

    let request_id = Uuid::new_v4();
    info!(%request_id, field = request.field_to_regenerate.key(), "Regenerating report field");

    let content = regenerate_field(
        state.llm.as_ref(),
        &request.student_input,
        &request.current_report_output,
        request.field_to_regenerate,
    )
    .instrument(info_span!("regenerate_field", %request_id))
    .await?;

    Ok(ActionResponse::ok(content))
}

/// GET /api/v1/report/catalog
///
/// Static mapping a client needs to render the form and the preview.
pub async fn handle_catalog() -> Json<ActionResponse<CatalogResponse>> {
    ActionResponse::ok(catalog())
}

fn catalog() -> CatalogResponse {
    CatalogResponse {
        skill_groups: SKILL_GROUPS
            .iter()
            .map(|g| CatalogGroup {
                title: g.title,
                next_steps_field: g.next_steps,
                skills: g
                    .skills
                    .iter()
                    .map(|&s| CatalogSkill {
                        key: s,
                        label: s.label(),
                    })
                    .collect(),
            })
            .collect(),
        effective_learning: EFFECTIVE_LEARNING,
        fields: ReportField::ALL
            .iter()
            .map(|&f| CatalogField {
                key: f,
                title: field_title(f),
            })
            .collect(),
        preview_sections: PREVIEW_SECTIONS,
        progress_options: crate::models::student::Progress::ALL
            .iter()
            .map(|p| p.label())
            .collect(),
    }
}
