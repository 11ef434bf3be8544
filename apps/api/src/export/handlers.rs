//! Axum route handler for the Export API.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use serde::Deserialize;

use crate::errors::AppError;
use crate::export::{export_filename, standalone_html};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    /// The rendered preview markup.
    pub markup: String,
    /// Collected stylesheet rules to inline.
    #[serde(default)]
    pub styles: String,
}

/// POST /api/v1/export/pdf
///
/// Assembles a standalone HTML document from the preview and hands it to the
/// renderer. Renderer failures surface as real errors — this is an explicit
/// user action — but the handler itself never wedges: it answers exactly
/// once per request.
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Result<impl IntoResponse, AppError> {
    if request.markup.trim().is_empty() {
        return Err(AppError::Validation("markup cannot be empty".to_string()));
    }

    let snapshot = state.store.snapshot();
    let html = standalone_html(&request.markup, &request.styles, &snapshot.presentation);
    let pdf = state.renderer.render(&html).await?;
    let filename = export_filename(&snapshot.document);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        Bytes::from(pdf),
    ))
}
