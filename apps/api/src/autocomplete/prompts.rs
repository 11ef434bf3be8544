// Prompt constants for the Autocompletion module.

use crate::autocomplete::FieldKind;
use crate::models::presentation::Language;

/// System prompt for single-field completion — plain text, continuation only.
pub const AUTOCOMPLETE_SYSTEM: &str =
    "You are an inline autocompletion engine for a CV editor. \
    Continue the user's text naturally in the same voice. \
    Respond with ONLY the continuation text — no quotes, no preamble, \
    no explanations, no markdown. \
    Keep the continuation under 30 words. \
    If no good continuation exists, respond with an empty string.";

/// Completion prompt template. Replace `{field_hint}`, `{context_block}`,
/// `{language_instruction}`, and `{current_text}` before sending.
pub const AUTOCOMPLETE_PROMPT_TEMPLATE: &str = r#"Field being edited: {field_hint}
{context_block}{language_instruction}

Text so far (continue from exactly where it stops):
{current_text}"#;

/// What the model is told about the field under edit.
pub fn field_hint(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Summary => "professional summary — a short paragraph selling the candidate",
        FieldKind::JobTitle => "job title",
        FieldKind::Company => "company name",
        FieldKind::Description => "experience bullet describing achievements in a role",
        FieldKind::Skills => "comma-separated skills list",
        FieldKind::Education => "education entry",
        FieldKind::Degree => "degree name",
        FieldKind::Institution => "school or university name",
        FieldKind::Generic => "free-form CV text",
    }
}

pub fn completion_language_instruction(language: Language) -> &'static str {
    match language {
        Language::En => "Continue in English.",
        Language::Ar => "أكمل النص باللغة العربية.",
    }
}
