//! Autocompletion client — debounced per-field text completion with an
//! independent lifecycle from the analysis client. Non-critical UX: every
//! failure path is a silent no-suggestion, never a visible error.

pub mod handlers;
pub mod prompts;

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::autocomplete::prompts::{
    completion_language_instruction, field_hint, AUTOCOMPLETE_PROMPT_TEMPLATE, AUTOCOMPLETE_SYSTEM,
};
use crate::llm_client::ChatCompletion;
use crate::models::presentation::Language;

/// Characters that end a sentence; text ending in one gets no completion.
const TERMINAL_PUNCTUATION: [char; 5] = ['.', '!', '?', ';', ':'];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    Summary,
    JobTitle,
    Company,
    Description,
    Skills,
    Education,
    Degree,
    Institution,
    #[default]
    #[serde(other)]
    Generic,
}

impl FieldKind {
    /// Minimum text length before a completion request is worth making.
    pub fn min_chars(self) -> usize {
        match self {
            FieldKind::Summary | FieldKind::Description => 5,
            _ => 3,
        }
    }
}

/// Optional targeting context sent along with a completion request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContextHints {
    pub job_title: Option<String>,
    pub industry: Option<String>,
}

/// Whether the current text should produce a completion request at all.
pub fn should_request(text: &str, kind: FieldKind) -> bool {
    let trimmed = text.trim_end();
    if trimmed.chars().count() < kind.min_chars() {
        return false;
    }
    !trimmed
        .chars()
        .last()
        .is_some_and(|c| TERMINAL_PUNCTUATION.contains(&c))
}

/// Per-field completion client. The sequence counter supersedes in-flight
/// requests: a completion that resolves after a newer request was issued is
/// discarded, so a slow early response can never clobber fresher input.
#[derive(Debug, Default)]
pub struct AutocompleteClient {
    sequence: AtomicU64,
}

impl AutocompleteClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn complete(
        &self,
        llm: &dyn ChatCompletion,
        text: &str,
        kind: FieldKind,
        language: Language,
        hints: &ContextHints,
    ) -> Option<String> {
        if !should_request(text, kind) {
            return None;
        }

        let token = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let prompt = build_prompt(text, kind, language, hints);

        match llm.complete(AUTOCOMPLETE_SYSTEM, &prompt).await {
            Ok(completion) => {
                if self.sequence.load(Ordering::SeqCst) != token {
                    debug!("Discarding stale autocompletion for superseded request {token}");
                    return None;
                }
                let cleaned = clean_completion(&completion);
                if cleaned.is_empty() {
                    None
                } else {
                    Some(cleaned)
                }
            }
            Err(e) => {
                debug!("Autocompletion call failed (silent): {e}");
                None
            }
        }
    }
}

fn build_prompt(text: &str, kind: FieldKind, language: Language, hints: &ContextHints) -> String {
    let mut context_block = String::new();
    if let Some(job_title) = hints.job_title.as_deref().filter(|s| !s.trim().is_empty()) {
        context_block.push_str(&format!("Target role: {job_title}\n"));
    }
    if let Some(industry) = hints.industry.as_deref().filter(|s| !s.trim().is_empty()) {
        context_block.push_str(&format!("Industry: {industry}\n"));
    }

    AUTOCOMPLETE_PROMPT_TEMPLATE
        .replace("{field_hint}", field_hint(kind))
        .replace("{context_block}", &context_block)
        .replace(
            "{language_instruction}",
            completion_language_instruction(language),
        )
        .replace("{current_text}", text)
}

/// Models occasionally quote or fence the continuation; strip that and keep
/// a single line.
fn clean_completion(completion: &str) -> String {
    let line = completion.trim().lines().next().unwrap_or_default().trim();
    line.trim_matches('`').trim_matches('"').trim().to_string()
}
