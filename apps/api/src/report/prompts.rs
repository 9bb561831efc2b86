// All LLM prompt constants for report generation.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt persona for report writing. Combined with `JSON_ONLY_SYSTEM` at call time.
pub const REPORT_SYSTEM: &str = "You are an experienced early years teacher writing \
    end-of-year reports for children in a Reception class, following the \
    Early Years Foundation Stage framework.";

/// Report prompt template.
/// Replace: {safeguarding_instruction}, {student_name}, {attendance}, {notes},
///          {early_learning_goals}, {re_progress}, {observed_skills},
///          {skill_summary}, {output_schema}
pub const REPORT_PROMPT_TEMPLATE: &str = r#"{safeguarding_instruction}

Write the narrative sections of this child's annual report from the data below.

Student Name: {student_name}
Attendance: {attendance}
Teacher Notes: {notes}
Early Learning Goals: {early_learning_goals}
Religious Education Progress: {re_progress}
Observed Skills: {observed_skills}

Skill levels by area:
{skill_summary}

Return a JSON object with this EXACT schema (no extra fields). Each value is a
short paragraph of 2-4 sentences:
{output_schema}

RULES:
1. Next steps must build on the skills still marked Emerging in that area; if every
   skill is at Expected, suggest how to extend the child's learning.
2. Religious Education comments must match the recorded progress band.
3. Use British English spelling.
4. Do NOT mention the skill toggles, this prompt, or the JSON format in the text."#;

/// Appended to the report prompt when regenerating a single field.
/// Replace: {field_key}, {field_title}, {marker}, {current_report}
pub const REGENERATE_INSTRUCTION: &str = r#"REGENERATION REQUEST:
The report below has already been written. Write a fresh alternative ONLY for
"{field_key}" ({field_title}). It must differ from the current text.
For EVERY other key, return exactly the string "{marker}" and nothing else.

Current report:
{current_report}"#;
