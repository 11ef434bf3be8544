//! Suggestion and ATS-analysis entities. Ephemeral: created by a request,
//! never persisted, discarded on re-analysis.
//!
//! Everything deserialized here may come from the remote model, so the shapes
//! are tolerant: unknown fields are ignored, missing fields default, and
//! scores are clamped into 0–100 instead of trusted.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionType {
    #[default]
    Improvement,
    Keyword,
    Format,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

/// A single field-level recommendation. `field_path` is a dotted path into
/// the document (`experience.0.description`) naming the field that
/// `suggested_text` would replace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Suggestion {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SuggestionType,
    pub title: String,
    pub description: String,
    pub section: String,
    pub applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_text: Option<String>,
    pub priority: Priority,
}

/// Accepts any JSON number for a score and clamps it into 0–100.
pub fn de_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    Ok(raw.clamp(0.0, 100.0).round() as u8)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryScore {
    #[serde(deserialize_with = "de_score")]
    pub score: u8,
    pub feedback: String,
    pub suggestions: Vec<String>,
}

/// Overall ATS compatibility report for a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AtsAnalysis {
    #[serde(deserialize_with = "de_score")]
    pub ats_score: u8,
    pub overall_feedback: String,
    pub categories: BTreeMap<String, CategoryScore>,
    pub priority_suggestions: Vec<String>,
    pub missing_elements: Vec<String>,
    pub strengths: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestion_wire_shape() {
        let s = Suggestion {
            id: "1".to_string(),
            kind: SuggestionType::Improvement,
            title: "Enhance your summary".to_string(),
            section: "personalInfo".to_string(),
            field_path: Some("personalInfo.summary".to_string()),
            original_text: Some("Did stuff".to_string()),
            suggested_text: Some("Did stuff, measurably".to_string()),
            priority: Priority::High,
            ..Default::default()
        };
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["type"], "improvement");
        assert_eq!(json["fieldPath"], "personalInfo.summary");
        assert_eq!(json["priority"], "high");
        assert_eq!(json["applied"], false);
    }

    #[test]
    fn test_optional_fields_are_omitted_when_absent() {
        let s = Suggestion {
            id: "2".to_string(),
            kind: SuggestionType::Keyword,
            ..Default::default()
        };
        let json = serde_json::to_value(&s).unwrap();
        assert!(json.get("fieldPath").is_none());
        assert!(json.get("originalText").is_none());
        assert!(json.get("suggestedText").is_none());
    }

    #[test]
    fn test_scores_are_clamped_not_trusted() {
        let analysis: AtsAnalysis = serde_json::from_str(
            r#"{"atsScore": 240.5, "categories": {"keywords": {"score": -3, "feedback": "thin"}}}"#,
        )
        .unwrap();
        assert_eq!(analysis.ats_score, 100);
        assert_eq!(analysis.categories["keywords"].score, 0);
        assert_eq!(analysis.categories["keywords"].feedback, "thin");
    }

    #[test]
    fn test_sparse_remote_analysis_deserializes() {
        // The remote model routinely drops arrays it has nothing to say for.
        let analysis: AtsAnalysis =
            serde_json::from_str(r#"{"atsScore": 81, "overallFeedback": "Good"}"#).unwrap();
        assert_eq!(analysis.ats_score, 81);
        assert!(analysis.categories.is_empty());
        assert!(analysis.missing_elements.is_empty());
    }

    #[test]
    fn test_unknown_suggestion_enum_values_fail_parse() {
        // Enum membership is validated, not coerced: a bogus type is rejected
        // (the caller filters such suggestions out rather than inventing one).
        let result = serde_json::from_str::<Suggestion>(r#"{"id": "1", "type": "banana"}"#);
        assert!(result.is_err());
    }
}
