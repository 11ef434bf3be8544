//! Export glue — assembles the preview markup and collected stylesheet rules
//! into one standalone HTML document and hands it to the PDF-rendering
//! collaborator. Thin by design: the renderer itself is an external service.

pub mod handlers;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::models::cv::CvDocument;
use crate::models::presentation::PresentationState;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF renderer is not configured")]
    NotConfigured,

    #[error("renderer request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("renderer returned status {0}")]
    Status(u16),
}

/// The PDF-rendering collaborator: standalone HTML in, PDF bytes out.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn render(&self, html: &str) -> Result<Vec<u8>, ExportError>;
}

/// Posts the HTML document to a headless-browser rendering endpoint.
pub struct HttpPdfRenderer {
    client: Client,
    endpoint: String,
}

impl HttpPdfRenderer {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .expect("Failed to build HTTP client"),
            endpoint,
        }
    }
}

#[async_trait]
impl PdfRenderer for HttpPdfRenderer {
    async fn render(&self, html: &str) -> Result<Vec<u8>, ExportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("content-type", "text/html; charset=utf-8")
            .body(html.to_string())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExportError::Status(status.as_u16()));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

/// Stand-in when no renderer endpoint is configured. Export is one of the
/// few user-facing failure paths, so this surfaces as a real error instead
/// of degrading silently.
pub struct NoRenderer;

#[async_trait]
impl PdfRenderer for NoRenderer {
    async fn render(&self, _html: &str) -> Result<Vec<u8>, ExportError> {
        Err(ExportError::NotConfigured)
    }
}

/// Wraps preview markup and collected stylesheet rules into a standalone
/// document, carrying the language and direction attributes so the renderer
/// lays out RTL content correctly.
pub fn standalone_html(markup: &str, styles: &str, presentation: &PresentationState) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"{lang}\" dir=\"{dir}\">\n<head>\n<meta charset=\"utf-8\">\n\
         <style>\n{styles}\n</style>\n</head>\n<body>\n{markup}\n</body>\n</html>\n",
        lang = presentation.language.as_str(),
        dir = presentation.direction.as_str(),
    )
}

/// Derives the download filename: full name plus title, falling back to the
/// first experience entry's job title, then to the literal `CV`. Whitespace
/// becomes underscores.
pub fn export_filename(doc: &CvDocument) -> String {
    let name = doc.personal_info.full_name.trim();
    let title = match doc.personal_info.title.trim() {
        "" => doc
            .experience
            .first()
            .map(|e| e.job_title.trim())
            .unwrap_or(""),
        title => title,
    };

    let base = match (name.is_empty(), title.is_empty()) {
        (false, false) => format!("{name} {title}"),
        (false, true) => name.to_string(),
        (true, false) => format!("CV {title}"),
        (true, true) => "CV".to_string(),
    };

    let underscored: String = base.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{underscored}.pdf")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cv::ExperienceEntry;
    use crate::models::presentation::{Direction, Language};

    #[test]
    fn test_filename_uses_name_and_title() {
        let mut doc = CvDocument::default();
        doc.personal_info.full_name = "Ada Lovelace".to_string();
        doc.personal_info.title = "Software Engineer".to_string();
        assert_eq!(export_filename(&doc), "Ada_Lovelace_Software_Engineer.pdf");
    }

    #[test]
    fn test_filename_falls_back_to_first_job_title() {
        let mut doc = CvDocument::default();
        doc.personal_info.full_name = "Ada Lovelace".to_string();
        doc.experience.push(ExperienceEntry {
            job_title: "Backend Developer".to_string(),
            ..Default::default()
        });
        assert_eq!(export_filename(&doc), "Ada_Lovelace_Backend_Developer.pdf");
    }

    #[test]
    fn test_filename_falls_back_to_cv() {
        assert_eq!(export_filename(&CvDocument::default()), "CV.pdf");
    }

    #[test]
    fn test_filename_collapses_whitespace_runs() {
        let mut doc = CvDocument::default();
        doc.personal_info.full_name = "  Ada   Lovelace ".to_string();
        assert_eq!(export_filename(&doc), "Ada_Lovelace.pdf");
    }

    #[test]
    fn test_standalone_html_carries_direction_and_language() {
        let mut presentation = PresentationState::default();
        presentation.language = Language::Ar;
        presentation.direction = Direction::Rtl;
        let html = standalone_html("<main>سيرة</main>", "body { margin: 0; }", &presentation);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("lang=\"ar\""));
        assert!(html.contains("dir=\"rtl\""));
        assert!(html.contains("<style>\nbody { margin: 0; }\n</style>"));
        assert!(html.contains("<main>سيرة</main>"));
    }

    #[tokio::test]
    async fn test_no_renderer_reports_not_configured() {
        let result = NoRenderer.render("<html></html>").await;
        assert!(matches!(result, Err(ExportError::NotConfigured)));
    }
}
