//! Axum route handlers for the Analysis API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::analysis::ats::analyze_cv;
use crate::analysis::suggestions::{
    apply_all, generate_suggestions, revert_all, SuggestionReport,
};
use crate::errors::AppError;
use crate::models::cv::CvDocument;
use crate::models::presentation::Language;
use crate::models::suggestion::{AtsAnalysis, Suggestion};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzeRequest {
    /// Document to analyze; defaults to the store's current document.
    pub cv: Option<CvDocument>,
    /// Narrative language; defaults to the store's language preference.
    pub language: Option<Language>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuggestRequest {
    pub cv: Option<CvDocument>,
    pub language: Option<Language>,
    /// Optional free-text target job description.
    pub job_description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionBatchRequest {
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionBatchResponse {
    pub suggestions: Vec<Suggestion>,
    pub document: CvDocument,
    pub changed: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analysis/ats
///
/// Scores the document against ATS heuristics. Always answers — a remote
/// failure yields the fixed localized fallback analysis.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Json<AtsAnalysis> {
    let doc = request.cv.unwrap_or_else(|| state.store.document());
    let language = request.language.unwrap_or_else(|| state.store.language());
    Json(analyze_cv(state.llm.as_ref(), &doc, language).await)
}

/// POST /api/v1/analysis/suggestions
///
/// Returns the heuristic baseline plus any remote suggestions, renumbered.
pub async fn handle_suggestions(
    State(state): State<AppState>,
    Json(request): Json<SuggestRequest>,
) -> Json<SuggestionReport> {
    let doc = request.cv.unwrap_or_else(|| state.store.document());
    let language = request.language.unwrap_or_else(|| state.store.language());
    Json(
        generate_suggestions(
            state.llm.as_ref(),
            &doc,
            language,
            request.job_description.as_deref(),
        )
        .await,
    )
}

/// POST /api/v1/cv/suggestions/apply
///
/// Applies every unapplied suggestion in the batch to the document and
/// returns the updated batch and document.
pub async fn handle_apply_suggestions(
    State(state): State<AppState>,
    Json(mut request): Json<SuggestionBatchRequest>,
) -> Result<Json<SuggestionBatchResponse>, AppError> {
    let changed = apply_all(&state.store, &mut request.suggestions)?;
    Ok(Json(SuggestionBatchResponse {
        suggestions: request.suggestions,
        document: state.store.document(),
        changed,
    }))
}

/// POST /api/v1/cv/suggestions/revert
pub async fn handle_revert_suggestions(
    State(state): State<AppState>,
    Json(mut request): Json<SuggestionBatchRequest>,
) -> Result<Json<SuggestionBatchResponse>, AppError> {
    let changed = revert_all(&state.store, &mut request.suggestions)?;
    Ok(Json(SuggestionBatchResponse {
        suggestions: request.suggestions,
        document: state.store.document(),
        changed,
    }))
}
