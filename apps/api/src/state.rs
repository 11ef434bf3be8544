use std::sync::Arc;

use crate::autocomplete::AutocompleteClient;
use crate::config::Config;
use crate::export::PdfRenderer;
use crate::llm_client::ChatCompletion;
use crate::store::CvStore;

/// Shared application state injected into all route handlers via Axum
/// extractors. No ambient singletons: language, theme, and the AI backends
/// all travel through here.
#[derive(Clone)]
pub struct AppState {
    /// Single source of truth for the CV document and presentation state.
    pub store: CvStore,
    /// Completion backend. `Disabled` when no API key is configured, which
    /// routes analysis and autocompletion onto their local fallbacks.
    pub llm: Arc<dyn ChatCompletion>,
    pub autocomplete: Arc<AutocompleteClient>,
    /// PDF-rendering collaborator. `NoRenderer` when unconfigured.
    pub renderer: Arc<dyn PdfRenderer>,
    /// Kept for handlers that need deployment knobs; currently read only at startup.
    #[allow(dead_code)]
    pub config: Config,
}
