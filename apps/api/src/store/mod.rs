//! Document/Presentation store — single source of truth for the CV document
//! and its presentation state, and owner of the persistence contract.
//!
//! All mutation goes through the named update operations below. Each edit
//! schedules a debounced save; blur events and structural operations persist
//! immediately. Storage failures are logged and swallowed — the in-memory
//! state stays authoritative for the session.

pub mod autosave;
pub mod handlers;
pub mod merge;
pub mod paths;
pub mod storage;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::models::cv::{
    new_entry_id, CustomSection, CvDocument, EducationEntry, ExperienceEntry, PersonalInfo, Skills,
};
use crate::models::presentation::{custom_section_key, Direction, Language, PersistedCv};
use crate::store::autosave::{Debounce, SaveStatus};
use crate::store::paths::PathError;
use crate::store::storage::Storage;

/// The single key the full state blob is persisted under.
pub const STORAGE_KEY: &str = "cv-builder-data";
/// Keys with this prefix are considered CV-related and swept by clear.
pub const CV_KEY_PREFIX: &str = "cv-";

struct StoreInner {
    state: RwLock<PersistedCv>,
    storage: Arc<dyn Storage>,
    debounce: Debounce,
    /// Bumped by clear so clients remount their bound inputs instead of the
    /// store sweeping them imperatively.
    reset_generation: AtomicU64,
}

impl StoreInner {
    /// Serializes the current state with a fresh `lastSaved` and writes it
    /// under the storage key. Never propagates storage failures.
    fn persist(&self) {
        let serialized = {
            let mut state = self.state.write().unwrap();
            state.last_saved = Some(Utc::now());
            serde_json::to_string(&*state)
        };
        match serialized {
            Ok(blob) => match self.storage.write(STORAGE_KEY, &blob) {
                Ok(()) => self.debounce.mark_complete(),
                Err(e) => {
                    warn!("Autosave write failed, continuing with in-memory state: {e}");
                    self.debounce.mark_failed();
                }
            },
            Err(e) => {
                warn!("Failed to serialize CV state: {e}");
                self.debounce.mark_failed();
            }
        }
    }
}

#[derive(Clone)]
pub struct CvStore {
    inner: Arc<StoreInner>,
}

impl CvStore {
    /// Opens the store, loading the persisted blob (merged over defaults) if
    /// one exists. Storage being absent, corrupt, or unavailable silently
    /// yields the defaults.
    pub fn open(storage: Arc<dyn Storage>, debounce_delay: Duration) -> Self {
        let state = match storage.read(STORAGE_KEY) {
            Ok(Some(raw)) => merge::load_persisted(&raw),
            Ok(None) => PersistedCv::default(),
            Err(e) => {
                warn!("Could not read persisted CV, starting from defaults: {e}");
                PersistedCv::default()
            }
        };
        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(state),
                storage,
                debounce: Debounce::new(debounce_delay),
                reset_generation: AtomicU64::new(0),
            }),
        }
    }

    // ── Reads ───────────────────────────────────────────────────────────

    pub fn snapshot(&self) -> PersistedCv {
        self.inner.state.read().unwrap().clone()
    }

    pub fn document(&self) -> CvDocument {
        self.inner.state.read().unwrap().document.clone()
    }

    pub fn language(&self) -> Language {
        self.inner.state.read().unwrap().presentation.language
    }

    pub fn save_status(&self) -> SaveStatus {
        self.inner.debounce.status()
    }

    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.inner.state.read().unwrap().last_saved
    }

    pub fn reset_generation(&self) -> u64 {
        self.inner.reset_generation.load(Ordering::SeqCst)
    }

    // ── Sub-tree replacement operations ─────────────────────────────────

    pub fn update_personal_info(&self, personal_info: PersonalInfo) {
        self.inner.state.write().unwrap().document.personal_info = personal_info;
        self.schedule_save();
    }

    /// Replaces the experience list. Entries marked `current` get their end
    /// date cleared and missing ids assigned, so the invariants hold at the
    /// model boundary rather than in the UI.
    pub fn update_experience(&self, mut experience: Vec<ExperienceEntry>) {
        for entry in &mut experience {
            if entry.current {
                entry.end_date.clear();
            }
            if entry.id.is_empty() {
                entry.id = new_entry_id();
            }
        }
        self.inner.state.write().unwrap().document.experience = experience;
        self.schedule_save();
    }

    pub fn update_education(&self, mut education: Vec<EducationEntry>) {
        for entry in &mut education {
            if entry.id.is_empty() {
                entry.id = new_entry_id();
            }
        }
        self.inner.state.write().unwrap().document.education = education;
        self.schedule_save();
    }

    pub fn update_skills(&self, skills: Skills) {
        self.inner.state.write().unwrap().document.skills = skills;
        self.schedule_save();
    }

    pub fn update_custom_sections(&self, sections: Vec<CustomSection>) {
        self.inner.state.write().unwrap().document.custom_sections = sections;
        self.schedule_save();
    }

    // ── Custom-section lifecycle (atomic with presentation bookkeeping) ─

    /// Appends a custom section and, under the same lock, its order entry
    /// and visibility flag. Persists immediately (structural change).
    pub fn add_custom_section(&self, mut section: CustomSection) -> CustomSection {
        if section.id.is_empty() {
            section.id = new_entry_id();
        }
        {
            let mut state = self.inner.state.write().unwrap();
            let key = custom_section_key(&section.id);
            state.document.custom_sections.push(section.clone());
            if !state.presentation.section_order.contains(&key) {
                state.presentation.section_order.push(key.clone());
            }
            state.presentation.visible_sections.insert(key, true);
        }
        self.save_now();
        section
    }

    /// Removes a custom section together with its order entry, visibility
    /// flag, and name override. Returns false if the id is unknown.
    pub fn remove_custom_section(&self, id: &str) -> bool {
        let removed = {
            let mut state = self.inner.state.write().unwrap();
            let before = state.document.custom_sections.len();
            state.document.custom_sections.retain(|s| s.id != id);
            if state.document.custom_sections.len() == before {
                false
            } else {
                let key = custom_section_key(id);
                state.presentation.section_order.retain(|k| *k != key);
                state.presentation.visible_sections.remove(&key);
                state.presentation.section_names.remove(&key);
                true
            }
        };
        if removed {
            self.save_now();
        }
        removed
    }

    // ── Presentation operations ─────────────────────────────────────────

    /// Replaces the section order. The caller (a drag-reorder UI) should be
    /// sending a permutation of the known keys; an order that drops or
    /// duplicates a key is repaired rather than trusted. Returns the order
    /// actually stored.
    pub fn update_section_order(&self, new_order: Vec<String>) -> Vec<String> {
        let repaired = {
            let mut state = self.inner.state.write().unwrap();
            let known: Vec<String> = state.presentation.section_order.clone();
            let mut repaired: Vec<String> = Vec::with_capacity(known.len());
            for key in new_order {
                if known.contains(&key) && !repaired.contains(&key) {
                    repaired.push(key);
                }
            }
            for key in &known {
                if !repaired.contains(key) {
                    repaired.push(key.clone());
                }
            }
            if repaired != state.presentation.section_order {
                state.presentation.section_order = repaired.clone();
            }
            repaired
        };
        self.schedule_save();
        repaired
    }

    /// Flips visibility for a key (unlisted keys are visible, so the first
    /// toggle hides). Returns the new visibility.
    pub fn toggle_section_visibility(&self, key: &str) -> bool {
        let visible = {
            let mut state = self.inner.state.write().unwrap();
            let next = !state.presentation.is_visible(key);
            state
                .presentation
                .visible_sections
                .insert(key.to_string(), next);
            next
        };
        self.schedule_save();
        visible
    }

    /// Sets or clears a user label override for a section key.
    pub fn update_section_name(&self, key: &str, name: &str) {
        {
            let mut state = self.inner.state.write().unwrap();
            if name.trim().is_empty() {
                state.presentation.section_names.remove(key);
            } else {
                state
                    .presentation
                    .section_names
                    .insert(key.to_string(), name.to_string());
            }
        }
        self.schedule_save();
    }

    pub fn update_direction(&self, direction: Direction) {
        self.inner.state.write().unwrap().presentation.direction = direction;
        self.schedule_save();
    }

    pub fn update_language(&self, language: Language) {
        self.inner.state.write().unwrap().presentation.language = language;
        self.schedule_save();
    }

    pub fn update_theme_color(&self, theme_color: String) {
        self.inner.state.write().unwrap().presentation.theme_color = theme_color;
        self.schedule_save();
    }

    // ── Field-path writes (suggestion apply/revert) ─────────────────────

    /// Writes `text` into the document at a dotted field path.
    pub fn set_field(&self, path: &str, text: &str) -> Result<(), PathError> {
        {
            let mut state = self.inner.state.write().unwrap();
            let updated = paths::set_text(&state.document, path, text)?;
            state.document = updated;
        }
        self.schedule_save();
        Ok(())
    }

    // ── Persistence control ─────────────────────────────────────────────

    /// Blur/teardown path: supersedes any pending timer and writes now.
    pub fn flush(&self) {
        self.inner.debounce.supersede();
        self.inner.persist();
    }

    /// Wipes the storage key and every CV-prefixed key, resets the in-memory
    /// state to defaults, and bumps the reset generation so bound UI
    /// remounts. Idempotent; never fails on unavailable storage.
    pub fn clear_all(&self) -> u64 {
        self.inner.debounce.reset();

        if let Err(e) = self.inner.storage.remove(STORAGE_KEY) {
            warn!("Failed to remove storage key during clear: {e}");
        }
        match self.inner.storage.keys() {
            Ok(keys) => {
                for key in keys.iter().filter(|k| k.starts_with(CV_KEY_PREFIX)) {
                    if let Err(e) = self.inner.storage.remove(key) {
                        warn!("Failed to remove CV-related key `{key}` during clear: {e}");
                    }
                }
            }
            Err(e) => warn!("Failed to enumerate storage keys during clear: {e}"),
        }

        *self.inner.state.write().unwrap() = PersistedCv::default();
        let generation = self.inner.reset_generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!("All CV data cleared (reset generation {generation})");
        generation
    }

    /// Arms the debounce and spawns the timer that persists once no newer
    /// edit has superseded it.
    fn schedule_save(&self) {
        let generation = self.inner.debounce.arm();
        let inner = self.inner.clone();
        tokio::spawn(async move {
            tokio::time::sleep(inner.debounce.delay()).await;
            if inner.debounce.is_current(generation) {
                inner.persist();
            }
        });
    }

    /// Immediate path for structural operations.
    fn save_now(&self) {
        self.inner.debounce.supersede();
        self.inner.persist();
    }
}
