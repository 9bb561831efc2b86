// Report export: maps a student record and its generated sections onto the
// fixed annual-report layout, then serializes it as .docx.
// Layout is built as plain data first (layout.rs) so placement is testable
// without unpacking the office document.

pub mod handlers;
pub mod layout;
pub mod render;

use crate::config::ReportSettings;
use crate::errors::AppError;
use crate::models::report::ReportContent;
use crate::models::student::StudentRecord;

pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Builds the annual report and returns the packed .docx bytes.
pub fn build_report_docx(
    record: &StudentRecord,
    content: &ReportContent,
    settings: &ReportSettings,
) -> Result<Vec<u8>, AppError> {
    let blocks = layout::report_layout(record, content, settings);
    render::render_docx(&blocks, settings)
}

/// `Jane  Mary Doe` → `Jane_Mary_Doe_ReportCard.docx`.
pub fn report_file_name(student_name: &str) -> String {
    let stem = student_name.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{stem}_ReportCard.docx")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_file_name_collapses_whitespace() {
        assert_eq!(report_file_name("Jane Doe"), "Jane_Doe_ReportCard.docx");
        assert_eq!(
            report_file_name("  Jane \t Mary  Doe "),
            "Jane_Mary_Doe_ReportCard.docx"
        );
    }

    #[test]
    fn test_build_report_docx_produces_zip_package() {
        let bytes = build_report_docx(
            &StudentRecord::sample(),
            &ReportContent::sample("text"),
            &ReportSettings::default(),
        )
        .unwrap();
        assert!(bytes.starts_with(b"PK"), "docx must be a zip package");
        assert!(bytes.len() > 1000);
    }
}
