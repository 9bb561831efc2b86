use serde::Serialize;

use crate::errors::AppError;
use crate::models::student::StudentRecord;

const NAME_MAX: usize = 100;
const ATTENDANCE_MAX: usize = 50;
const NOTES_MAX: usize = 1000;
const GOALS_MAX: usize = 1000;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub passed: bool,
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    /// Converts a failed report into `AppError::Validation` carrying every message.
    pub fn into_result(self) -> Result<(), AppError> {
        if self.passed {
            return Ok(());
        }
        let message = self
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        Err(AppError::Validation(message))
    }
}

/// Checks a student record against the report form's rules.
///
/// Every rule is evaluated; the report lists all violations, not just the first.
/// Lengths are counted in characters after trimming surrounding whitespace.
pub fn validate_student(record: &StudentRecord) -> ValidationReport {
    let mut errors = Vec::new();

    required(
        &mut errors,
        "studentName",
        &record.student_name,
        NAME_MAX,
        "Student name is required",
        "Name too long",
    );
    required(
        &mut errors,
        "attendance",
        &record.attendance,
        ATTENDANCE_MAX,
        "Attendance is required",
        "Attendance input too long",
    );
    bounded(
        &mut errors,
        "notes",
        &record.notes,
        NOTES_MAX,
        "Notes too long, max 1000 chars.",
    );
    bounded(
        &mut errors,
        "earlyLearningGoals",
        &record.early_learning_goals,
        GOALS_MAX,
        "Early learning goals too long, max 1000 chars.",
    );

    if record.religious_education_progress.is_none() {
        errors.push(FieldError {
            field: "religiousEducationProgress",
            message: "Religious education progress is required".to_string(),
        });
    }

    ValidationReport {
        passed: errors.is_empty(),
        errors,
    }
}

fn required(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: &str,
    max: usize,
    empty_message: &str,
    long_message: &str,
) {
    if value.trim().is_empty() {
        errors.push(FieldError {
            field,
            message: empty_message.to_string(),
        });
    } else {
        bounded(errors, field, value, max, long_message);
    }
}

fn bounded(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: &str,
    max: usize,
    message: &str,
) {
    if value.trim().chars().count() > max {
        errors.push(FieldError {
            field,
            message: message.to_string(),
        });
    }
}
