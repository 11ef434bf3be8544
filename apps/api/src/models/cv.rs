use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Returns a fresh locally-unique id for list entries and custom sections.
/// Uniqueness is the only invariant callers may rely on.
pub fn new_entry_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linked_in: String,
    pub website: String,
    pub github: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    pub id: String,
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    /// When set, `end_date` is ignored and cleared on update.
    pub current: bool,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub id: String,
    pub degree: String,
    pub institution: String,
    pub location: String,
    pub graduation_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skills {
    pub technical: Vec<String>,
    pub soft: Vec<String>,
    pub languages: Vec<String>,
    pub certifications: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomSectionType {
    #[default]
    Text,
    List,
    Timeline,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomSectionItem {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomSection {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub section_type: CustomSectionType,
    pub content: String,
    pub items: Vec<CustomSectionItem>,
}

/// The canonical structured résumé data. Persisted as part of the single
/// storage blob together with `PresentationState`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CvDocument {
    pub personal_info: PersonalInfo,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Skills,
    pub custom_sections: Vec<CustomSection>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_ids_are_unique() {
        let a = new_entry_id();
        let b = new_entry_id();
        assert_ne!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn test_document_wire_names_are_camel_case() {
        let mut doc = CvDocument::default();
        doc.personal_info.full_name = "Ada Lovelace".to_string();
        doc.experience.push(ExperienceEntry {
            id: "e1".to_string(),
            job_title: "Engineer".to_string(),
            ..Default::default()
        });

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["personalInfo"]["fullName"], "Ada Lovelace");
        assert_eq!(json["experience"][0]["jobTitle"], "Engineer");
        assert!(json["customSections"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        // A blob from an older schema revision: most fields absent.
        let json = r#"{"personalInfo": {"fullName": "Ada"}}"#;
        let doc: CvDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.personal_info.full_name, "Ada");
        assert_eq!(doc.personal_info.title, "");
        assert!(doc.experience.is_empty());
        assert!(doc.skills.technical.is_empty());
    }

    #[test]
    fn test_custom_section_type_tag_is_lowercase() {
        let section = CustomSection {
            id: "c1".to_string(),
            title: "Volunteering".to_string(),
            section_type: CustomSectionType::Timeline,
            ..Default::default()
        };
        let json = serde_json::to_value(&section).unwrap();
        assert_eq!(json["type"], "timeline");
    }
}
