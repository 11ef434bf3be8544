// All LLM prompt constants for the Analysis module.
// Templates use `{placeholder}` segments replaced before sending.

use crate::models::presentation::Language;

/// System prompt for ATS analysis — enforces JSON-only output.
pub const ATS_SYSTEM: &str =
    "You are an expert ATS (Applicant Tracking System) compatibility analyst. \
    Score a CV the way screening software would. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// ATS analysis prompt template. Replace `{cv_json}` and
/// `{language_instruction}` before sending.
pub const ATS_PROMPT_TEMPLATE: &str = r#"Analyze the following CV for ATS compatibility.

Return a JSON object with this EXACT schema (no extra fields):
{
  "atsScore": 78,
  "overallFeedback": "One or two sentences on overall ATS readiness",
  "categories": {
    "formatting": {"score": 85, "feedback": "...", "suggestions": ["..."]},
    "keywords": {"score": 60, "feedback": "...", "suggestions": ["..."]},
    "content": {"score": 75, "feedback": "...", "suggestions": ["..."]},
    "structure": {"score": 80, "feedback": "...", "suggestions": ["..."]}
  },
  "prioritySuggestions": ["Highest-impact change first"],
  "missingElements": ["Element screening software expects but did not find"],
  "strengths": ["What already works well"]
}

Rules:
- All scores are integers from 0 to 100.
- atsScore reflects how reliably parsing software extracts this CV's content
  and how well it matches common screening criteria.
- prioritySuggestions are ordered by impact, at most 5.
- {language_instruction}

CV DATA (verbatim):
{cv_json}"#;

/// System prompt for field-level suggestions — enforces JSON-only output.
pub const SUGGESTIONS_SYSTEM: &str =
    "You are an expert CV coach generating concrete, field-level rewrite \
    suggestions for a structured CV. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT invent facts that are not present in the CV data.";

/// Field-suggestions prompt template. Replace `{cv_json}`,
/// `{job_description_block}`, and `{language_instruction}` before sending.
pub const SUGGESTIONS_PROMPT_TEMPLATE: &str = r#"Review the following CV and propose field-level improvements.

Return a JSON object with this EXACT schema (no extra fields):
{
  "atsScore": 72,
  "overallFeedback": "One or two sentences summarizing the review",
  "suggestions": [
    {
      "id": "1",
      "type": "improvement",
      "title": "Short imperative title",
      "description": "Why this change helps",
      "section": "experience",
      "fieldPath": "experience.0.description",
      "originalText": "the current field text, copied exactly",
      "suggestedText": "the full replacement text",
      "priority": "high"
    }
  ]
}

Rules:
- `type` is one of: "improvement", "keyword", "format".
- `priority` is one of: "high", "medium", "low".
- `fieldPath` is a dotted path into the CV data using the exact field names
  below, with numeric segments for list indices.
- `originalText` MUST be copied byte-for-byte from the CV data so the change
  can be reverted.
- At most 8 suggestions, highest impact first.
- {language_instruction}
{job_description_block}
CV DATA (verbatim):
{cv_json}"#;

/// Block inserted into the suggestions prompt when a target job description
/// is provided. Replace `{job_description}` before sending.
pub const JOB_DESCRIPTION_BLOCK: &str = r#"
TARGET JOB DESCRIPTION (tailor keyword and phrasing suggestions to it):
{job_description}
"#;

/// Narrative-language instruction embedded in both analysis prompts.
pub fn language_instruction(language: Language) -> &'static str {
    match language {
        Language::En => "Write every narrative string (feedback, titles, descriptions) in English.",
        Language::Ar => {
            "اكتب جميع النصوص السردية (الملاحظات والعناوين والأوصاف) باللغة العربية."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_carry_their_placeholders() {
        assert!(ATS_PROMPT_TEMPLATE.contains("{cv_json}"));
        assert!(ATS_PROMPT_TEMPLATE.contains("{language_instruction}"));
        assert!(SUGGESTIONS_PROMPT_TEMPLATE.contains("{cv_json}"));
        assert!(SUGGESTIONS_PROMPT_TEMPLATE.contains("{job_description_block}"));
        assert!(JOB_DESCRIPTION_BLOCK.contains("{job_description}"));
    }

    #[test]
    fn test_arabic_instruction_is_arabic() {
        let instruction = language_instruction(Language::Ar);
        assert!(instruction.chars().any(|c| ('\u{0600}'..='\u{06FF}').contains(&c)));
    }
}
