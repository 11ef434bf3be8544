//! ATS analysis — scores a document against applicant-tracking heuristics
//! via the remote model, with a fixed localized fallback when the call
//! fails. This path never surfaces an error to the caller.

use tracing::warn;

use crate::analysis::prompts::{language_instruction, ATS_PROMPT_TEMPLATE, ATS_SYSTEM};
use crate::i18n;
use crate::llm_client::{complete_json, ChatCompletion};
use crate::models::cv::CvDocument;
use crate::models::presentation::Language;
use crate::models::suggestion::{AtsAnalysis, CategoryScore};

/// Score reported when the remote call fails and the fixed fallback
/// analysis is returned instead.
pub const FALLBACK_ATS_SCORE: u8 = 75;

/// Analyzes a document for ATS compatibility. Remote failure, timeout, or an
/// unusable response all degrade to `fallback_analysis` — never an error.
pub async fn analyze_cv(
    llm: &dyn ChatCompletion,
    doc: &CvDocument,
    language: Language,
) -> AtsAnalysis {
    let cv_json = match serde_json::to_string_pretty(doc) {
        Ok(json) => json,
        Err(e) => {
            warn!("Failed to serialize CV for analysis: {e}");
            return fallback_analysis(language);
        }
    };

    let prompt = ATS_PROMPT_TEMPLATE
        .replace("{language_instruction}", language_instruction(language))
        .replace("{cv_json}", &cv_json);

    match complete_json::<AtsAnalysis>(llm, ATS_SYSTEM, &prompt).await {
        Ok(analysis) => normalize(analysis, language),
        Err(e) => {
            warn!("ATS analysis call failed, returning fallback: {e}");
            fallback_analysis(language)
        }
    }
}

/// Scores arrive clamped by the deserializer; the remaining coercion is
/// filling an empty feedback line so callers always have something to show.
fn normalize(mut analysis: AtsAnalysis, language: Language) -> AtsAnalysis {
    if analysis.overall_feedback.trim().is_empty() {
        analysis.overall_feedback = i18n::fallback_analysis_feedback(language).to_string();
    }
    analysis
}

/// The fixed localized analysis returned when the remote model is
/// unavailable. Deterministic by design.
pub fn fallback_analysis(language: Language) -> AtsAnalysis {
    let categories = i18n::fallback_category_feedback(language)
        .into_iter()
        .map(|(name, feedback)| {
            (
                name.to_string(),
                CategoryScore {
                    score: FALLBACK_ATS_SCORE,
                    feedback: feedback.to_string(),
                    suggestions: Vec::new(),
                },
            )
        })
        .collect();

    AtsAnalysis {
        ats_score: FALLBACK_ATS_SCORE,
        overall_feedback: i18n::fallback_analysis_feedback(language).to_string(),
        categories,
        priority_suggestions: i18n::fallback_analysis_advice(language),
        missing_elements: Vec::new(),
        strengths: i18n::fallback_analysis_strengths(language),
    }
}
