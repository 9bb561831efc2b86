// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction appended to every prompt that writes about a child.
pub const SAFEGUARDING_INSTRUCTION: &str = "\
    Write about the child warmly and professionally, for parents to read. \
    Only use facts present in the data provided. Do NOT invent events, diagnoses, \
    or comparisons with other children. Refer to the child by first name.";
