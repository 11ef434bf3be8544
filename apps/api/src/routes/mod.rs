pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::autocomplete::handlers as autocomplete;
use crate::export::handlers as export;
use crate::state::AppState;
use crate::store::handlers as store;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Document/Presentation store
        .route("/api/v1/cv", get(store::handle_get_cv))
        .route("/api/v1/cv", delete(store::handle_clear))
        .route("/api/v1/cv/status", get(store::handle_save_status))
        .route("/api/v1/cv/flush", post(store::handle_flush))
        .route(
            "/api/v1/cv/personal-info",
            put(store::handle_update_personal_info),
        )
        .route("/api/v1/cv/experience", put(store::handle_update_experience))
        .route("/api/v1/cv/education", put(store::handle_update_education))
        .route("/api/v1/cv/skills", put(store::handle_update_skills))
        .route(
            "/api/v1/cv/custom-sections",
            put(store::handle_update_custom_sections),
        )
        .route(
            "/api/v1/cv/custom-sections",
            post(store::handle_add_custom_section),
        )
        .route(
            "/api/v1/cv/custom-sections/:id",
            delete(store::handle_remove_custom_section),
        )
        .route(
            "/api/v1/cv/section-order",
            put(store::handle_update_section_order),
        )
        .route(
            "/api/v1/cv/sections/:key/visibility",
            post(store::handle_toggle_visibility),
        )
        .route(
            "/api/v1/cv/sections/:key/name",
            put(store::handle_update_section_name),
        )
        .route("/api/v1/cv/direction", put(store::handle_update_direction))
        .route("/api/v1/cv/language", put(store::handle_update_language))
        .route("/api/v1/cv/theme", put(store::handle_update_theme))
        // Suggestion/Analysis client
        .route("/api/v1/analysis/ats", post(analysis::handle_analyze))
        .route(
            "/api/v1/analysis/suggestions",
            post(analysis::handle_suggestions),
        )
        .route(
            "/api/v1/cv/suggestions/apply",
            post(analysis::handle_apply_suggestions),
        )
        .route(
            "/api/v1/cv/suggestions/revert",
            post(analysis::handle_revert_suggestions),
        )
        // Autocompletion client
        .route(
            "/api/v1/autocomplete",
            post(autocomplete::handle_autocomplete),
        )
        // Export boundary
        .route("/api/v1/export/pdf", post(export::handle_export_pdf))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    use crate::autocomplete::AutocompleteClient;
    use crate::config::Config;
    use crate::export::NoRenderer;
    use crate::llm_client::Disabled;
    use crate::store::storage::MemoryStorage;
    use crate::store::CvStore;

    fn test_state() -> AppState {
        AppState {
            store: CvStore::open(Arc::new(MemoryStorage::new()), Duration::from_millis(300)),
            llm: Arc::new(Disabled),
            autocomplete: Arc::new(AutocompleteClient::new()),
            renderer: Arc::new(NoRenderer),
            config: Config {
                port: 0,
                rust_log: "info".to_string(),
                anthropic_api_key: None,
                pdf_renderer_url: None,
                data_dir: PathBuf::from("data"),
                autosave_debounce_ms: 300,
            },
        }
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = build_router(test_state());
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_update_then_get_round_trip() {
        let app = build_router(test_state());

        let put = Request::builder()
            .method("PUT")
            .uri("/api/v1/cv/personal-info")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"fullName": "Ada Lovelace"}"#))
            .unwrap();
        let response = app.clone().oneshot(put).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let get = Request::builder()
            .uri("/api/v1/cv")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(get).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["personalInfo"]["fullName"], "Ada Lovelace");
        // A save is pending or already completed, but the edit is not lost.
        assert_ne!(json["saveStatus"], "unsaved");
        assert_eq!(json["sectionLabels"]["experience"], "Experience");
    }

    #[tokio::test]
    async fn test_suggestions_endpoint_answers_without_llm() {
        let app = build_router(test_state());
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/analysis/suggestions")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"cv": {"personalInfo": {"summary": "Did stuff"}}}"#))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(!json["suggestions"].as_array().unwrap().is_empty());
        assert_eq!(json["atsScore"], 75);
    }

    #[tokio::test]
    async fn test_export_without_renderer_is_rejected_cleanly() {
        let app = build_router(test_state());
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/export/pdf")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"markup": "<main>CV</main>"}"#))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "EXPORT_NOT_CONFIGURED");
    }

    #[tokio::test]
    async fn test_clear_resets_and_bumps_generation() {
        let app = build_router(test_state());
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/v1/cv")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["resetGeneration"], 1);
    }
}
