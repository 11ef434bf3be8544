#![allow(dead_code)]

//! Debounce bookkeeping for autosave. Each edit arms a new generation; the
//! timer that fires checks it is still the latest before persisting, so N
//! rapid edits coalesce into exactly one write. Structural operations and
//! blur events skip the timer and persist immediately.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;

/// Target debounce delay between the last edit and the persistence write.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveStatus {
    /// No save has completed and none is scheduled.
    Unsaved,
    /// A save is scheduled or in flight.
    Saving,
    /// At least one save has completed and nothing is pending.
    Saved,
}

#[derive(Debug)]
pub struct Debounce {
    delay: Duration,
    generation: AtomicU64,
    pending: AtomicBool,
    completed: AtomicBool,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: AtomicU64::new(0),
            pending: AtomicBool::new(false),
            completed: AtomicBool::new(false),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arms a new save generation, superseding any timer still waiting.
    /// Returns the generation the new timer must present to win.
    pub fn arm(&self) -> u64 {
        self.pending.store(true, Ordering::SeqCst);
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether `generation` is still the latest armed one.
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Invalidates any armed timer without recording a completion.
    /// Used by the immediate-save path and by clear/teardown.
    pub fn supersede(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.pending.store(false, Ordering::SeqCst);
    }

    /// Records a successful write.
    pub fn mark_complete(&self) {
        self.pending.store(false, Ordering::SeqCst);
        self.completed.store(true, Ordering::SeqCst);
    }

    /// Records a failed write: nothing pending, but not "saved" either
    /// unless an earlier write succeeded.
    pub fn mark_failed(&self) {
        self.pending.store(false, Ordering::SeqCst);
    }

    /// Forgets save history. Used by the clear operation, after which the
    /// storage key is absent again.
    pub fn reset(&self) {
        self.supersede();
        self.completed.store(false, Ordering::SeqCst);
    }

    pub fn status(&self) -> SaveStatus {
        if self.pending.load(Ordering::SeqCst) {
            SaveStatus::Saving
        } else if self.completed.load(Ordering::SeqCst) {
            SaveStatus::Saved
        } else {
            SaveStatus::Unsaved
        }
    }

    /// Whether an armed timer has not yet fired or been superseded.
    pub fn has_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }
}
