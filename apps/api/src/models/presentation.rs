use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::cv::CvDocument;

/// Section keys of the built-in sections, in default render order.
/// Custom sections use the `custom-<id>` key form.
pub const BUILTIN_SECTIONS: [&str; 4] = ["personalInfo", "experience", "education", "skills"];

/// Key under which a custom section appears in `section_order`,
/// `visible_sections`, and `section_names`.
pub fn custom_section_key(id: &str) -> String {
    format!("custom-{id}")
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }
}

/// User-controlled layout and display preferences layered over a `CvDocument`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PresentationState {
    /// Render/tab order. Always the built-in keys plus one `custom-<id>`
    /// entry per live custom section.
    pub section_order: Vec<String>,
    /// Keys absent from the map default to visible.
    pub visible_sections: BTreeMap<String, bool>,
    /// User label overrides; absence falls back to the language default.
    pub section_names: BTreeMap<String, String>,
    pub direction: Direction,
    pub language: Language,
    pub theme_color: String,
}

impl Default for PresentationState {
    fn default() -> Self {
        Self {
            section_order: BUILTIN_SECTIONS.iter().map(|s| s.to_string()).collect(),
            visible_sections: BTreeMap::new(),
            section_names: BTreeMap::new(),
            direction: Direction::default(),
            language: Language::default(),
            theme_color: "blue".to_string(),
        }
    }
}

impl PresentationState {
    /// Visibility for a section key; unlisted keys are visible.
    pub fn is_visible(&self, key: &str) -> bool {
        self.visible_sections.get(key).copied().unwrap_or(true)
    }
}

/// Version written with every persisted blob. Loading still tolerates blobs
/// without it via merge-with-defaults.
pub const SCHEMA_VERSION: u32 = 1;

/// The single persisted record: `CvDocument` and `PresentationState` fields
/// as one flat JSON object, plus `lastSaved` and the schema version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedCv {
    pub schema_version: u32,
    #[serde(flatten)]
    pub document: CvDocument,
    #[serde(flatten)]
    pub presentation: PresentationState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_saved: Option<DateTime<Utc>>,
}

impl Default for PersistedCv {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            document: CvDocument::default(),
            presentation: PresentationState::default(),
            last_saved: None,
        }
    }
}
