//! Report generation — builds the prompt from a student record, calls the model,
//! coerces its JSON into `ReportContent`, and merges single-field regenerations.
//!
//! Flow: student record → prompt → TextGenerator → parse → (retry | merge) → content.

use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, SAFEGUARDING_INSTRUCTION};
use crate::llm_client::{parse_json, TextGenerator};
use crate::models::report::{is_unfilled, ReportContent, ReportField, UNCHANGED_MARKER};
use crate::models::student::StudentRecord;
use crate::report::catalog::{field_description, field_title, observed_skills, skill_summary};
use crate::report::merge::merge_regenerated;
use crate::report::prompts::{REGENERATE_INSTRUCTION, REPORT_PROMPT_TEMPLATE, REPORT_SYSTEM};

/// Max extra LLM attempts when a full generation leaves fields unfilled.
const MAX_GENERATION_RETRIES: u32 = 2;

// ────────────────────────────────────────────────────────────────────────────
// Full generation
// ────────────────────────────────────────────────────────────────────────────

/// Generates every report section for a student.
///
/// Retries up to MAX_GENERATION_RETRIES times when the model omits a field or
/// answers with a blank or marker value.
pub async fn generate_report(
    llm: &dyn TextGenerator,
    record: &StudentRecord,
) -> Result<ReportContent, AppError> {
    let prompt = build_report_prompt(record)?;
    let system = system_prompt();

    for attempt in 0..=MAX_GENERATION_RETRIES {
        let text = llm
            .complete(&prompt, &system)
            .await
            .map_err(|e| AppError::Llm(format!("Report generation LLM call failed: {e}")))?;
        let content: ReportContent = parse_json(&text)
            .map_err(|e| AppError::Llm(format!("Report generation returned invalid JSON: {e}")))?;

        let unfilled = content.unfilled_fields();
        if unfilled.is_empty() {
            info!(attempt = attempt + 1, "Generated report");
            return Ok(content);
        }

        warn!(
            "Generation attempt {}/{}: {} fields unfilled ({:?}) — retrying",
            attempt + 1,
            MAX_GENERATION_RETRIES + 1,
            unfilled.len(),
            unfilled
        );
    }

    Err(AppError::Llm(format!(
        "Report generation failed after {} attempts: the model kept leaving sections empty.",
        MAX_GENERATION_RETRIES + 1
    )))
}

// ────────────────────────────────────────────────────────────────────────────
// Single-field regeneration
// ────────────────────────────────────────────────────────────────────────────

/// Regenerates one field and swaps it into `current`.
///
/// If the model answers the target field with the marker or blank text, the
/// current value is kept.
pub async fn regenerate_field(
    llm: &dyn TextGenerator,
    record: &StudentRecord,
    current: &ReportContent,
    field: ReportField,
) -> Result<ReportContent, AppError> {
    let prompt = build_regenerate_prompt(record, current, field)?;

    let text = llm
        .complete(&prompt, &system_prompt())
        .await
        .map_err(|e| AppError::Llm(format!("Field regeneration LLM call failed: {e}")))?;
    let generated: ReportContent = parse_json(&text)
        .map_err(|e| AppError::Llm(format!("Field regeneration returned invalid JSON: {e}")))?;

    if is_unfilled(generated.get(field)) {
        warn!(
            field = field.key(),
            "Regeneration returned no new text; keeping current value"
        );
        return Ok(current.clone());
    }

    info!(field = field.key(), "Regenerated report field");
    Ok(merge_regenerated(current, &generated, field))
}

// ────────────────────────────────────────────────────────────────────────────
// Prompt building
// ────────────────────────────────────────────────────────────────────────────

fn system_prompt() -> String {
    format!("{REPORT_SYSTEM} {JSON_ONLY_SYSTEM}")
}

/// Fills the report template from a student record.
fn build_report_prompt(record: &StudentRecord) -> Result<String, AppError> {
    let schema: serde_json::Map<String, serde_json::Value> = ReportField::ALL
        .iter()
        .map(|&f| (f.key().to_string(), field_description(f).into()))
        .collect();
    let output_schema = serde_json::to_string_pretty(&schema)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize schema: {e}")))?;

    let re_progress = record
        .religious_education_progress
        .map(|p| p.label())
        .unwrap_or("Not recorded");

    Ok(REPORT_PROMPT_TEMPLATE
        .replace("{safeguarding_instruction}", SAFEGUARDING_INSTRUCTION)
        .replace("{output_schema}", &output_schema)
        .replace("{skill_summary}", &skill_summary(record))
        .replace("{observed_skills}", &observed_skills(record))
        .replace("{re_progress}", re_progress)
        .replace("{early_learning_goals}", or_none(&record.early_learning_goals))
        .replace("{notes}", or_none(&record.notes))
        .replace("{attendance}", record.attendance.trim())
        .replace("{student_name}", record.student_name.trim()))
}

/// The report prompt plus the regeneration instruction for `field`.
fn build_regenerate_prompt(
    record: &StudentRecord,
    current: &ReportContent,
    field: ReportField,
) -> Result<String, AppError> {
    let current_report = serde_json::to_string_pretty(current)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize report: {e}")))?;

    let instruction = REGENERATE_INSTRUCTION
        .replace("{current_report}", &current_report)
        .replace("{marker}", UNCHANGED_MARKER)
        .replace("{field_title}", field_title(field))
        .replace("{field_key}", field.key());

    Ok(format!("{}\n\n{}", build_report_prompt(record)?, instruction))
}

fn or_none(text: &str) -> &str {
    let text = text.trim();
    if text.is_empty() {
        "None provided"
    } else {
        text
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedGenerator;
    use crate::llm_client::LlmError;

    fn full_json(prefix: &str) -> String {
        serde_json::to_string(&ReportContent::sample(prefix)).unwrap()
    }

    #[test]
    fn test_report_prompt_carries_student_data() {
        let prompt = build_report_prompt(&StudentRecord::sample()).unwrap();

        assert!(prompt.contains("Student Name: Jane Doe"));
        assert!(prompt.contains("Attendance: 97%"));
        assert!(prompt.contains("Early Learning Goals: None provided"));
        assert!(prompt.contains("Religious Education Progress: Good"));
        assert!(prompt.contains("Observed Skills: Speaking, Number"));
        assert!(prompt.contains("\"personalSocialEmotionalDevelopmentNextSteps\""));
        assert!(!prompt.contains("{student_name}"));
        assert!(!prompt.contains("{output_schema}"));
    }

    #[test]
    fn test_regenerate_prompt_names_target_and_marker() {
        let current = ReportContent::sample("current");
        let prompt = build_regenerate_prompt(
            &StudentRecord::sample(),
            &current,
            ReportField::LiteracyNextSteps,
        )
        .unwrap();

        assert!(prompt.contains("ONLY for\n\"literacyNextSteps\" (Literacy Next Steps)"));
        assert!(prompt.contains("exactly the string \"[UNCHANGED]\""));
        assert!(prompt.contains("current literacyNextSteps"));
    }

    #[tokio::test]
    async fn test_generate_report_returns_parsed_content() {
        let llm = ScriptedGenerator::new(vec![Ok(format!("```json\n{}\n```", full_json("gen")))]);

        let content = generate_report(&llm, &StudentRecord::sample()).await.unwrap();
        assert_eq!(content, ReportContent::sample("gen"));
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test]
    async fn test_generate_report_retries_on_missing_fields() {
        let partial = r#"{"generalComments": "Only this one."}"#.to_string();
        let llm = ScriptedGenerator::new(vec![Ok(partial), Ok(full_json("second"))]);

        let content = generate_report(&llm, &StudentRecord::sample()).await.unwrap();
        assert_eq!(content.general_comments, "second generalComments");
        assert_eq!(llm.calls(), 2);
    }

    #[tokio::test]
    async fn test_generate_report_retries_on_null_fields() {
        let mut first: serde_json::Value = serde_json::from_str(&full_json("first")).unwrap();
        first["generalComments"] = serde_json::Value::Null;
        let llm = ScriptedGenerator::new(vec![Ok(first.to_string()), Ok(full_json("second"))]);

        let content = generate_report(&llm, &StudentRecord::sample()).await.unwrap();
        assert_eq!(content, ReportContent::sample("second"));
        assert_eq!(llm.calls(), 2);
    }

    #[tokio::test]
    async fn test_generate_report_gives_up_after_retries() {
        let marker_only = serde_json::to_string(&ReportContent::unchanged()).unwrap();
        let llm = ScriptedGenerator::replying(&[marker_only.as_str(); 3]);

        let err = generate_report(&llm, &StudentRecord::sample()).await.unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
        assert_eq!(llm.calls(), (MAX_GENERATION_RETRIES + 1) as usize);
    }

    #[tokio::test]
    async fn test_generate_report_surfaces_service_failure() {
        let llm = ScriptedGenerator::new(vec![Err(LlmError::Api {
            status: 529,
            message: "overloaded".to_string(),
        })]);

        let err = generate_report(&llm, &StudentRecord::sample()).await.unwrap_err();
        match err {
            AppError::Llm(msg) => assert!(msg.contains("overloaded")),
            other => panic!("expected LLM error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_report_rejects_non_json() {
        let llm = ScriptedGenerator::replying(&["I cannot help with that."]);
        let err = generate_report(&llm, &StudentRecord::sample()).await.unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }

    #[tokio::test]
    async fn test_regenerate_field_merges_target_only() {
        let current = ReportContent::sample("current");
        let mut response = ReportContent::unchanged();
        response.set(ReportField::GeneralComments, "A fresh comment.".to_string());
        let reply = serde_json::to_string(&response).unwrap();
        let llm = ScriptedGenerator::replying(&[reply.as_str()]);

        let merged = regenerate_field(
            &llm,
            &StudentRecord::sample(),
            &current,
            ReportField::GeneralComments,
        )
        .await
        .unwrap();

        assert_eq!(merged.general_comments, "A fresh comment.");
        assert_eq!(merged.active_learning, "current activeLearning");
    }

    #[tokio::test]
    async fn test_regenerate_field_accepts_target_only_response() {
        let current = ReportContent::sample("current");
        let llm = ScriptedGenerator::replying(&[r#"{"activeLearning": "Keeps trying."}"#]);

        let merged = regenerate_field(
            &llm,
            &StudentRecord::sample(),
            &current,
            ReportField::ActiveLearning,
        )
        .await
        .unwrap();

        assert_eq!(merged.active_learning, "Keeps trying.");
        assert_eq!(merged.literacy_next_steps, "current literacyNextSteps");
    }

    #[tokio::test]
    async fn test_regenerate_field_keeps_current_on_marker_or_blank() {
        let current = ReportContent::sample("current");
        let llm = ScriptedGenerator::replying(&[
            r#"{"mathematicsNextSteps": "[UNCHANGED]"}"#,
            r#"{"mathematicsNextSteps": "  "}"#,
        ]);
        let record = StudentRecord::sample();

        for _ in 0..2 {
            let merged =
                regenerate_field(&llm, &record, &current, ReportField::MathematicsNextSteps)
                    .await
                    .unwrap();
            assert_eq!(merged, current);
        }
    }
}
