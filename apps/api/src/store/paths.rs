//! Dotted field-path addressing into a `CvDocument`, the mechanism behind
//! suggestion apply/revert. Paths use the wire (camelCase) field names with
//! numeric segments indexing lists: `experience.0.description`.
//!
//! Text fields read and write directly. String-list fields (the four skills
//! lists) read as a `", "`-joined string and write by splitting on commas,
//! so a suggestion can target `skills.technical` like any other field.

use serde_json::Value;
use thiserror::Error;

use crate::models::cv::CvDocument;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("field path `{0}` does not resolve")]
    NotFound(String),

    #[error("field path `{0}` does not address a text field")]
    NotText(String),
}

fn resolve<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(list) => list.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

fn resolve_mut<'a>(root: &'a mut Value, path: &str) -> Option<&'a mut Value> {
    let mut current = root;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get_mut(segment)?,
            Value::Array(list) => list.get_mut(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

fn list_to_text(list: &[Value]) -> Option<String> {
    let items: Option<Vec<&str>> = list.iter().map(|v| v.as_str()).collect();
    items.map(|items| items.join(", "))
}

fn text_to_list(text: &str) -> Value {
    Value::Array(
        text.split(',')
            .map(|item| item.trim())
            .filter(|item| !item.is_empty())
            .map(|item| Value::String(item.to_string()))
            .collect(),
    )
}

/// Reads the text at `path`.
pub fn get_text(doc: &CvDocument, path: &str) -> Result<String, PathError> {
    let root = serde_json::to_value(doc).map_err(|_| PathError::NotFound(path.to_string()))?;
    let value = resolve(&root, path).ok_or_else(|| PathError::NotFound(path.to_string()))?;
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Array(list) => list_to_text(list).ok_or_else(|| PathError::NotText(path.to_string())),
        _ => Err(PathError::NotText(path.to_string())),
    }
}

/// Replaces the text at `path`, returning the updated document.
pub fn set_text(doc: &CvDocument, path: &str, text: &str) -> Result<CvDocument, PathError> {
    let mut root = serde_json::to_value(doc).map_err(|_| PathError::NotFound(path.to_string()))?;
    {
        let slot = resolve_mut(&mut root, path)
            .ok_or_else(|| PathError::NotFound(path.to_string()))?;
        match slot {
            Value::String(_) => *slot = Value::String(text.to_string()),
            Value::Array(_) => *slot = text_to_list(text),
            _ => return Err(PathError::NotText(path.to_string())),
        }
    }
    serde_json::from_value(root).map_err(|_| PathError::NotText(path.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cv::{ExperienceEntry, Skills};

    fn sample_doc() -> CvDocument {
        let mut doc = CvDocument::default();
        doc.personal_info.summary = "Did stuff".to_string();
        doc.experience.push(ExperienceEntry {
            id: "e1".to_string(),
            description: "Worked on backend systems".to_string(),
            ..Default::default()
        });
        doc.skills = Skills {
            technical: vec!["Rust".to_string(), "SQL".to_string()],
            ..Default::default()
        };
        doc
    }

    #[test]
    fn test_get_text_simple_path() {
        let doc = sample_doc();
        assert_eq!(get_text(&doc, "personalInfo.summary").unwrap(), "Did stuff");
    }

    #[test]
    fn test_get_text_indexed_path() {
        let doc = sample_doc();
        assert_eq!(
            get_text(&doc, "experience.0.description").unwrap(),
            "Worked on backend systems"
        );
    }

    #[test]
    fn test_get_text_string_list_joins() {
        let doc = sample_doc();
        assert_eq!(get_text(&doc, "skills.technical").unwrap(), "Rust, SQL");
    }

    #[test]
    fn test_set_text_simple_path() {
        let doc = sample_doc();
        let updated = set_text(&doc, "personalInfo.summary", "Shipped things").unwrap();
        assert_eq!(updated.personal_info.summary, "Shipped things");
        // Original untouched; everything else preserved.
        assert_eq!(doc.personal_info.summary, "Did stuff");
        assert_eq!(updated.experience[0].description, "Worked on backend systems");
    }

    #[test]
    fn test_set_text_string_list_splits() {
        let doc = sample_doc();
        let updated = set_text(&doc, "skills.technical", "Rust, SQL, Docker").unwrap();
        assert_eq!(updated.skills.technical, vec!["Rust", "SQL", "Docker"]);
    }

    #[test]
    fn test_set_then_get_round_trips_list_text() {
        let doc = sample_doc();
        let original = get_text(&doc, "skills.technical").unwrap();
        let updated = set_text(&doc, "skills.technical", "Rust, SQL, Go").unwrap();
        let reverted = set_text(&updated, "skills.technical", &original).unwrap();
        assert_eq!(get_text(&reverted, "skills.technical").unwrap(), original);
    }

    #[test]
    fn test_out_of_range_index_is_not_found() {
        let doc = sample_doc();
        assert_eq!(
            get_text(&doc, "experience.5.description"),
            Err(PathError::NotFound("experience.5.description".to_string()))
        );
    }

    #[test]
    fn test_unknown_field_is_not_found() {
        let doc = sample_doc();
        assert!(matches!(
            get_text(&doc, "personalInfo.nope"),
            Err(PathError::NotFound(_))
        ));
    }

    #[test]
    fn test_non_text_target_is_rejected() {
        let doc = sample_doc();
        assert!(matches!(
            get_text(&doc, "experience.0.current"),
            Err(PathError::NotText(_))
        ));
        assert!(matches!(
            set_text(&doc, "experience.0", "x"),
            Err(PathError::NotText(_))
        ));
    }
}
