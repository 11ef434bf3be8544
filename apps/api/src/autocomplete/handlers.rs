//! Axum route handler for the Autocompletion API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::autocomplete::{ContextHints, FieldKind};
use crate::models::presentation::Language;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutocompleteRequest {
    pub current_text: String,
    #[serde(default)]
    pub field_kind: FieldKind,
    #[serde(default)]
    pub language: Option<Language>,
    #[serde(default)]
    pub context_hints: ContextHints,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutocompleteResponse {
    /// Empty string when there is nothing to suggest.
    pub suggestion: String,
}

/// POST /api/v1/autocomplete
///
/// Single-field completion. Suppressed input, remote errors, and stale
/// responses all answer with an empty suggestion — never an error.
pub async fn handle_autocomplete(
    State(state): State<AppState>,
    Json(request): Json<AutocompleteRequest>,
) -> Json<AutocompleteResponse> {
    let language = request.language.unwrap_or_else(|| state.store.language());
    let suggestion = state
        .autocomplete
        .complete(
            state.llm.as_ref(),
            &request.current_text,
            request.field_kind,
            language,
            &request.context_hints,
        )
        .await
        .unwrap_or_default();
    Json(AutocompleteResponse { suggestion })
}
