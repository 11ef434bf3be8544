//! Axum route handlers for the document/presentation store.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::i18n;
use crate::models::cv::{CustomSection, EducationEntry, ExperienceEntry, PersonalInfo, Skills};
use crate::models::presentation::{custom_section_key, Direction, Language, PersistedCv};
use crate::state::AppState;
use crate::store::autosave::SaveStatus;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CvStateResponse {
    #[serde(flatten)]
    pub state: PersistedCv,
    /// Display label per section key in order: user override, then the
    /// custom section's own title, then the language default.
    pub section_labels: BTreeMap<String, String>,
    pub save_status: SaveStatus,
    pub reset_generation: u64,
}

fn resolve_section_labels(state: &PersistedCv) -> BTreeMap<String, String> {
    let mut labels = BTreeMap::new();
    for key in &state.presentation.section_order {
        let label = state
            .presentation
            .section_names
            .get(key)
            .cloned()
            .or_else(|| {
                state
                    .document
                    .custom_sections
                    .iter()
                    .find(|s| custom_section_key(&s.id) == *key)
                    .map(|s| s.title.clone())
            })
            .or_else(|| {
                i18n::default_section_label(state.presentation.language, key)
                    .map(|l| l.to_string())
            })
            .unwrap_or_else(|| key.clone());
        labels.insert(key.clone(), label);
    }
    labels
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveStatusResponse {
    pub save_status: SaveStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_saved: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionOrderResponse {
    pub section_order: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityResponse {
    pub key: String,
    pub visible: bool,
}

#[derive(Debug, Deserialize)]
pub struct SectionNameRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct DirectionRequest {
    pub direction: Direction,
}

#[derive(Debug, Deserialize)]
pub struct LanguageRequest {
    pub language: Language,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeRequest {
    pub theme_color: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearResponse {
    pub reset_generation: u64,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/cv
pub async fn handle_get_cv(State(state): State<AppState>) -> Json<CvStateResponse> {
    let snapshot = state.store.snapshot();
    let section_labels = resolve_section_labels(&snapshot);
    Json(CvStateResponse {
        state: snapshot,
        section_labels,
        save_status: state.store.save_status(),
        reset_generation: state.store.reset_generation(),
    })
}

/// GET /api/v1/cv/status
pub async fn handle_save_status(State(state): State<AppState>) -> Json<SaveStatusResponse> {
    Json(SaveStatusResponse {
        save_status: state.store.save_status(),
        last_saved: state.store.last_saved(),
    })
}

/// PUT /api/v1/cv/personal-info
pub async fn handle_update_personal_info(
    State(state): State<AppState>,
    Json(personal_info): Json<PersonalInfo>,
) -> StatusCode {
    state.store.update_personal_info(personal_info);
    StatusCode::NO_CONTENT
}

/// PUT /api/v1/cv/experience
pub async fn handle_update_experience(
    State(state): State<AppState>,
    Json(experience): Json<Vec<ExperienceEntry>>,
) -> StatusCode {
    state.store.update_experience(experience);
    StatusCode::NO_CONTENT
}

/// PUT /api/v1/cv/education
pub async fn handle_update_education(
    State(state): State<AppState>,
    Json(education): Json<Vec<EducationEntry>>,
) -> StatusCode {
    state.store.update_education(education);
    StatusCode::NO_CONTENT
}

/// PUT /api/v1/cv/skills
pub async fn handle_update_skills(
    State(state): State<AppState>,
    Json(skills): Json<Skills>,
) -> StatusCode {
    state.store.update_skills(skills);
    StatusCode::NO_CONTENT
}

/// PUT /api/v1/cv/custom-sections
pub async fn handle_update_custom_sections(
    State(state): State<AppState>,
    Json(sections): Json<Vec<CustomSection>>,
) -> StatusCode {
    state.store.update_custom_sections(sections);
    StatusCode::NO_CONTENT
}

/// POST /api/v1/cv/custom-sections
///
/// Atomic: the section, its order entry, and its visibility flag appear
/// together. Returns the section with its assigned id.
pub async fn handle_add_custom_section(
    State(state): State<AppState>,
    Json(section): Json<CustomSection>,
) -> Result<(StatusCode, Json<CustomSection>), AppError> {
    if section.title.trim().is_empty() {
        return Err(AppError::Validation("section title cannot be empty".to_string()));
    }
    let section = state.store.add_custom_section(section);
    Ok((StatusCode::CREATED, Json(section)))
}

/// DELETE /api/v1/cv/custom-sections/:id
pub async fn handle_remove_custom_section(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !state.store.remove_custom_section(&id) {
        return Err(AppError::NotFound(format!("Custom section {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/cv/section-order
///
/// Returns the order actually stored, which may differ from the request if
/// it had to be repaired.
pub async fn handle_update_section_order(
    State(state): State<AppState>,
    Json(order): Json<Vec<String>>,
) -> Json<SectionOrderResponse> {
    Json(SectionOrderResponse {
        section_order: state.store.update_section_order(order),
    })
}

/// POST /api/v1/cv/sections/:key/visibility
pub async fn handle_toggle_visibility(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<VisibilityResponse> {
    let visible = state.store.toggle_section_visibility(&key);
    Json(VisibilityResponse { key, visible })
}

/// PUT /api/v1/cv/sections/:key/name
pub async fn handle_update_section_name(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<SectionNameRequest>,
) -> StatusCode {
    state.store.update_section_name(&key, &req.name);
    StatusCode::NO_CONTENT
}

/// PUT /api/v1/cv/direction
pub async fn handle_update_direction(
    State(state): State<AppState>,
    Json(req): Json<DirectionRequest>,
) -> StatusCode {
    state.store.update_direction(req.direction);
    StatusCode::NO_CONTENT
}

/// PUT /api/v1/cv/language
pub async fn handle_update_language(
    State(state): State<AppState>,
    Json(req): Json<LanguageRequest>,
) -> StatusCode {
    state.store.update_language(req.language);
    StatusCode::NO_CONTENT
}

/// PUT /api/v1/cv/theme
pub async fn handle_update_theme(
    State(state): State<AppState>,
    Json(req): Json<ThemeRequest>,
) -> StatusCode {
    state.store.update_theme_color(req.theme_color);
    StatusCode::NO_CONTENT
}

/// POST /api/v1/cv/flush
///
/// Blur path: persists immediately instead of waiting out the debounce.
pub async fn handle_flush(State(state): State<AppState>) -> Json<SaveStatusResponse> {
    state.store.flush();
    Json(SaveStatusResponse {
        save_status: state.store.save_status(),
        last_saved: state.store.last_saved(),
    })
}

/// DELETE /api/v1/cv
///
/// Clears storage and resets to defaults. The bumped reset generation tells
/// clients to remount their bound inputs.
pub async fn handle_clear(State(state): State<AppState>) -> Json<ClearResponse> {
    Json(ClearResponse {
        reset_generation: state.store.clear_all(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_labels_prefer_override_then_title_then_default() {
        let mut state = PersistedCv::default();
        state.document.custom_sections.push(CustomSection {
            id: "abc".to_string(),
            title: "Volunteering".to_string(),
            ..Default::default()
        });
        state.presentation.section_order.push("custom-abc".to_string());
        state
            .presentation
            .section_names
            .insert("experience".to_string(), "Work History".to_string());

        let labels = resolve_section_labels(&state);
        assert_eq!(labels["experience"], "Work History");
        assert_eq!(labels["custom-abc"], "Volunteering");
        assert_eq!(labels["education"], "Education");
    }

    #[test]
    fn test_section_labels_follow_language() {
        let mut state = PersistedCv::default();
        state.presentation.language = Language::Ar;
        let labels = resolve_section_labels(&state);
        assert_eq!(labels["skills"], "المهارات");
    }
}
