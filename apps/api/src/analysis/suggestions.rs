//! Field-level suggestion generation and the apply/revert contract.
//!
//! The heuristic baseline always runs; remote suggestions are validated and
//! concatenated after it with ids renumbered. A remote failure degrades to
//! the heuristics alone with a fixed localized score and message.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::analysis::ats::FALLBACK_ATS_SCORE;
use crate::analysis::heuristics::heuristic_suggestions;
use crate::analysis::prompts::{
    language_instruction, JOB_DESCRIPTION_BLOCK, SUGGESTIONS_PROMPT_TEMPLATE, SUGGESTIONS_SYSTEM,
};
use crate::i18n;
use crate::llm_client::{complete_json, ChatCompletion};
use crate::models::cv::CvDocument;
use crate::models::presentation::Language;
use crate::models::suggestion::{de_score, Suggestion};
use crate::store::paths::{self, PathError};
use crate::store::CvStore;

/// The suggestion review returned to callers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionReport {
    pub suggestions: Vec<Suggestion>,
    pub ats_score: u8,
    pub overall_feedback: String,
}

/// Raw remote payload. Suggestions are taken as loose values first so one
/// malformed entry is dropped instead of sinking the whole response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RemotePayload {
    suggestions: Vec<Value>,
    #[serde(deserialize_with = "de_score")]
    ats_score: u8,
    overall_feedback: String,
}

impl Default for RemotePayload {
    fn default() -> Self {
        Self {
            suggestions: Vec::new(),
            ats_score: FALLBACK_ATS_SCORE,
            overall_feedback: String::new(),
        }
    }
}

/// Generates the review: heuristics first, then validated remote
/// suggestions, ids renumbered to stay unique across the merged list.
pub async fn generate_suggestions(
    llm: &dyn ChatCompletion,
    doc: &CvDocument,
    language: Language,
    job_description: Option<&str>,
) -> SuggestionReport {
    let mut suggestions = heuristic_suggestions(doc, language);

    let report = match request_remote(llm, doc, language, job_description).await {
        Ok(payload) => {
            let mut accepted = 0usize;
            for value in payload.suggestions {
                match validate_remote(value, doc) {
                    Some(suggestion) => {
                        suggestions.push(suggestion);
                        accepted += 1;
                    }
                    None => debug!("Dropped non-conforming remote suggestion"),
                }
            }
            debug!("Accepted {accepted} remote suggestions");
            let overall_feedback = if payload.overall_feedback.trim().is_empty() {
                i18n::fallback_analysis_feedback(language).to_string()
            } else {
                payload.overall_feedback
            };
            SuggestionReport {
                suggestions: Vec::new(),
                ats_score: payload.ats_score,
                overall_feedback,
            }
        }
        Err(e) => {
            warn!("Suggestion call failed, returning heuristic set only: {e}");
            SuggestionReport {
                suggestions: Vec::new(),
                ats_score: FALLBACK_ATS_SCORE,
                overall_feedback: i18n::heuristics_only_feedback(language).to_string(),
            }
        }
    };

    renumber(&mut suggestions);
    SuggestionReport {
        suggestions,
        ..report
    }
}

async fn request_remote(
    llm: &dyn ChatCompletion,
    doc: &CvDocument,
    language: Language,
    job_description: Option<&str>,
) -> Result<RemotePayload, crate::llm_client::LlmError> {
    let cv_json = serde_json::to_string_pretty(doc)?;
    let jd_block = match job_description {
        Some(jd) if !jd.trim().is_empty() => {
            JOB_DESCRIPTION_BLOCK.replace("{job_description}", jd)
        }
        _ => String::new(),
    };
    let prompt = SUGGESTIONS_PROMPT_TEMPLATE
        .replace("{language_instruction}", language_instruction(language))
        .replace("{job_description_block}", &jd_block)
        .replace("{cv_json}", &cv_json);

    complete_json::<RemotePayload>(llm, SUGGESTIONS_SYSTEM, &prompt).await
}

/// Remote suggestions are untrusted input: enum membership is enforced by
/// the typed parse, a non-empty title is required, any field path must
/// resolve in the current document, and the applied flag is never taken
/// from the model.
fn validate_remote(value: Value, doc: &CvDocument) -> Option<Suggestion> {
    let mut suggestion: Suggestion = serde_json::from_value(value).ok()?;
    if suggestion.title.trim().is_empty() {
        return None;
    }
    if let Some(path) = &suggestion.field_path {
        let current = paths::get_text(doc, path).ok()?;
        // A revert target the model half-copied would corrupt the field;
        // re-anchor originalText to what the document actually holds.
        suggestion.original_text = Some(current);
        suggestion.suggested_text.as_deref()?;
    }
    suggestion.applied = false;
    Some(suggestion)
}

/// Reassigns sequential numeric-string ids ("1", "2", ...) so merged lists
/// stay unique.
pub fn renumber(suggestions: &mut [Suggestion]) {
    for (index, suggestion) in suggestions.iter_mut().enumerate() {
        suggestion.id = (index + 1).to_string();
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Apply / revert
// ────────────────────────────────────────────────────────────────────────────

/// Writes `suggestedText` into the document at the suggestion's field path
/// and marks it applied. Applying an already-applied suggestion is a no-op.
pub fn apply_suggestion(store: &CvStore, suggestion: &mut Suggestion) -> Result<(), PathError> {
    if suggestion.applied {
        return Ok(());
    }
    let (path, text) = match (&suggestion.field_path, &suggestion.suggested_text) {
        (Some(path), Some(text)) => (path.clone(), text.clone()),
        _ => return Ok(()), // advisory suggestion, nothing to write
    };
    store.set_field(&path, &text)?;
    suggestion.applied = true;
    Ok(())
}

/// Writes `originalText` back and clears the applied flag. Reverting an
/// unapplied suggestion is a no-op.
pub fn revert_suggestion(store: &CvStore, suggestion: &mut Suggestion) -> Result<(), PathError> {
    if !suggestion.applied {
        return Ok(());
    }
    let (path, text) = match (&suggestion.field_path, &suggestion.original_text) {
        (Some(path), Some(text)) => (path.clone(), text.clone()),
        _ => return Ok(()),
    };
    store.set_field(&path, &text)?;
    suggestion.applied = false;
    Ok(())
}

/// Applies every currently-unapplied suggestion. Returns how many changed.
pub fn apply_all(store: &CvStore, suggestions: &mut [Suggestion]) -> Result<usize, PathError> {
    let mut changed = 0;
    for suggestion in suggestions.iter_mut() {
        if !suggestion.applied {
            apply_suggestion(store, suggestion)?;
            if suggestion.applied {
                changed += 1;
            }
        }
    }
    Ok(changed)
}

/// Reverts every currently-applied suggestion. Returns how many changed.
pub fn revert_all(store: &CvStore, suggestions: &mut [Suggestion]) -> Result<usize, PathError> {
    let mut changed = 0;
    for suggestion in suggestions.iter_mut() {
        if suggestion.applied {
            revert_suggestion(store, suggestion)?;
            if !suggestion.applied {
                changed += 1;
            }
        }
    }
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use crate::models::cv::PersonalInfo;
    use crate::models::suggestion::SuggestionType;
    use crate::store::storage::MemoryStorage;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::time::Duration;

    struct Canned(String);

    #[async_trait]
    impl ChatCompletion for Canned {
        async fn complete(&self, _system: &str, _prompt: &str) -> Result<String, LlmError> {
            Ok(self.0.clone())
        }
    }

    struct Failing;

    #[async_trait]
    impl ChatCompletion for Failing {
        async fn complete(&self, _system: &str, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::Api {
                status: 503,
                message: "unavailable".to_string(),
            })
        }
    }

    fn doc_with_summary(summary: &str) -> CvDocument {
        let mut doc = CvDocument::default();
        doc.personal_info.summary = summary.to_string();
        doc
    }

    fn store_with_summary(summary: &str) -> CvStore {
        let store = CvStore::open(Arc::new(MemoryStorage::new()), Duration::from_millis(300));
        store.update_personal_info(PersonalInfo {
            summary: summary.to_string(),
            ..Default::default()
        });
        store
    }

    #[tokio::test(start_paused = true)]
    async fn test_remote_failure_still_yields_heuristics() {
        let doc = doc_with_summary("Did stuff");
        let report = generate_suggestions(&Failing, &doc, Language::En, None).await;

        assert_eq!(report.ats_score, FALLBACK_ATS_SCORE);
        assert_eq!(
            report.overall_feedback,
            i18n::heuristics_only_feedback(Language::En)
        );
        let summary_improvement = report
            .suggestions
            .iter()
            .find(|s| {
                s.field_path.as_deref() == Some("personalInfo.summary")
                    && s.kind == SuggestionType::Improvement
            })
            .expect("heuristic improvement targeting the summary");
        assert!(!summary_improvement.applied);
    }

    #[tokio::test(start_paused = true)]
    async fn test_remote_suggestions_are_concatenated_and_renumbered() {
        let doc = doc_with_summary("Experienced engineer.");
        let remote = r#"{
            "atsScore": 82,
            "overallFeedback": "Decent baseline",
            "suggestions": [
                {
                    "id": "99",
                    "type": "keyword",
                    "title": "Mention Kubernetes",
                    "description": "The target role asks for it",
                    "section": "skills",
                    "priority": "low",
                    "applied": true
                }
            ]
        }"#;
        let report =
            generate_suggestions(&Canned(remote.to_string()), &doc, Language::En, None).await;

        assert_eq!(report.ats_score, 82);
        let remote_suggestion = report
            .suggestions
            .iter()
            .find(|s| s.title == "Mention Kubernetes")
            .expect("remote suggestion kept");
        // The model does not get to pre-apply its own suggestions.
        assert!(!remote_suggestion.applied);

        // Ids are sequential and unique across the merged list.
        let ids: Vec<&str> = report.suggestions.iter().map(|s| s.id.as_str()).collect();
        let expected: Vec<String> = (1..=ids.len()).map(|i| i.to_string()).collect();
        assert_eq!(ids, expected);
        // Heuristic suggestions come first.
        assert_eq!(report.suggestions[0].field_path.as_deref(), Some("personalInfo.summary"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_remote_entries_are_dropped_not_fatal() {
        let doc = doc_with_summary("Experienced engineer.");
        let remote = r#"{
            "atsScore": 70,
            "overallFeedback": "ok",
            "suggestions": [
                {"type": "banana", "title": "bad enum"},
                {"type": "keyword", "title": ""},
                {"type": "keyword", "title": "good", "description": "d", "section": "skills"},
                {"type": "format", "title": "ghost path", "fieldPath": "experience.7.description",
                 "suggestedText": "x"}
            ]
        }"#;
        let report =
            generate_suggestions(&Canned(remote.to_string()), &doc, Language::En, None).await;
        let remote_titles: Vec<&str> = report
            .suggestions
            .iter()
            .filter(|s| s.section == "skills" && s.kind == SuggestionType::Keyword && s.title == "good")
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(remote_titles, vec!["good"]);
        assert!(!report.suggestions.iter().any(|s| s.title == "ghost path"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_remote_original_text_is_reanchored_to_document() {
        let doc = doc_with_summary("Experienced engineer.");
        let remote = r#"{
            "atsScore": 75,
            "overallFeedback": "ok",
            "suggestions": [
                {"type": "improvement", "title": "Rewrite summary",
                 "section": "personalInfo",
                 "fieldPath": "personalInfo.summary",
                 "originalText": "something the model hallucinated",
                 "suggestedText": "A sharper summary."}
            ]
        }"#;
        let report =
            generate_suggestions(&Canned(remote.to_string()), &doc, Language::En, None).await;
        let rewrite = report
            .suggestions
            .iter()
            .find(|s| s.title == "Rewrite summary")
            .unwrap();
        assert_eq!(rewrite.original_text.as_deref(), Some("Experienced engineer."));
    }

    #[tokio::test(start_paused = true)]
    async fn test_apply_then_revert_round_trips_byte_for_byte() {
        let store = store_with_summary("Experienced engineer.");
        let report =
            generate_suggestions(&Failing, &store.document(), Language::En, None).await;
        let mut suggestion = report
            .suggestions
            .into_iter()
            .find(|s| s.field_path.as_deref() == Some("personalInfo.summary"))
            .unwrap();
        let original = suggestion.original_text.clone().unwrap();
        let suggested = suggestion.suggested_text.clone().unwrap();

        apply_suggestion(&store, &mut suggestion).unwrap();
        assert!(suggestion.applied);
        assert_eq!(store.document().personal_info.summary, suggested);

        revert_suggestion(&store, &mut suggestion).unwrap();
        assert!(!suggestion.applied);
        assert_eq!(store.document().personal_info.summary, original);
    }

    #[tokio::test(start_paused = true)]
    async fn test_apply_is_idempotent() {
        let store = store_with_summary("Experienced engineer.");
        let mut suggestion = Suggestion {
            id: "1".to_string(),
            field_path: Some("personalInfo.summary".to_string()),
            original_text: Some("Experienced engineer.".to_string()),
            suggested_text: Some("Better.".to_string()),
            ..Default::default()
        };
        apply_suggestion(&store, &mut suggestion).unwrap();
        apply_suggestion(&store, &mut suggestion).unwrap();
        assert_eq!(store.document().personal_info.summary, "Better.");
        // Reverting an unapplied suggestion is equally a no-op.
        suggestion.applied = false;
        revert_suggestion(&store, &mut suggestion).unwrap();
        assert_eq!(store.document().personal_info.summary, "Better.");
    }

    #[tokio::test(start_paused = true)]
    async fn test_apply_all_and_revert_all() {
        let store = store_with_summary("Did stuff");
        let report =
            generate_suggestions(&Failing, &store.document(), Language::En, None).await;
        let mut suggestions = report.suggestions;

        let applied = apply_all(&store, &mut suggestions).unwrap();
        assert!(applied >= 2);
        assert!(suggestions.iter().all(|s| s.applied || s.field_path.is_none()));

        let reverted = revert_all(&store, &mut suggestions).unwrap();
        assert_eq!(applied, reverted);
        assert_eq!(store.document().personal_info.summary, "Did stuff");
    }
}
