//! Note record and projections.
//!
//! # Responsibility
//! - Define the canonical in-memory note shape.
//! - Provide list (`NoteSummary`) and detail (`NoteDetail`) projections.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `updated >= created`; mutation helpers clamp to uphold it.

use crate::model::title::{derive_title, DEFAULT_TITLE_LEN};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Opaque note identifier (32 lowercase hex characters).
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = String;

/// Allocates a fresh random note id.
pub fn new_note_id() -> NoteId {
    Uuid::new_v4().simple().to_string()
}

/// Current wall-clock time in epoch milliseconds.
///
/// Clocks set before the Unix epoch read as `0`.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

/// A single note held by the session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    /// Free-form text; may be empty.
    pub content: String,
    /// Unix epoch milliseconds at creation.
    pub created: i64,
    /// Unix epoch milliseconds at last content change. Always >= `created`.
    pub updated: i64,
}

impl Note {
    /// Creates a note with a generated id and both timestamps set to `now`.
    pub fn new(content: impl Into<String>, now: i64) -> Self {
        Self::with_id(new_note_id(), content, now)
    }

    /// Creates a note with a caller-provided id.
    pub fn with_id(id: impl Into<NoteId>, content: impl Into<String>, now: i64) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            created: now,
            updated: now,
        }
    }

    /// Replaces content and bumps `updated`, never below `created`.
    pub fn replace_content(&mut self, content: impl Into<String>, now: i64) {
        self.content = content.into();
        self.updated = now.max(self.created);
    }

    /// Title derived from the first content line.
    pub fn title(&self) -> String {
        derive_title(self.content.as_str(), DEFAULT_TITLE_LEN)
    }

    /// Content length in characters.
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    pub fn summary(&self) -> NoteSummary {
        NoteSummary {
            id: self.id.clone(),
            title: self.title(),
            updated: self.updated,
            length: self.char_len(),
        }
    }

    pub fn detail(&self) -> NoteDetail {
        NoteDetail {
            id: self.id.clone(),
            content: self.content.clone(),
            created: self.created,
            updated: self.updated,
        }
    }
}

/// List row projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteSummary {
    pub id: NoteId,
    pub title: String,
    pub updated: i64,
    /// Content length in characters.
    pub length: usize,
}

/// Selected-note projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDetail {
    pub id: NoteId,
    pub content: String,
    pub created: i64,
    pub updated: i64,
}

#[cfg(test)]
mod tests {
    use super::{new_note_id, Note};

    #[test]
    fn ids_are_hex_and_unique() {
        let first = new_note_id();
        let second = new_note_id();
        assert_eq!(first.len(), 32);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, second);
    }

    #[test]
    fn replace_content_never_moves_updated_before_created() {
        let mut note = Note::with_id("n1", "draft", 1_000);
        note.replace_content("edited", 500);
        assert_eq!(note.updated, 1_000);
        note.replace_content("edited again", 2_000);
        assert_eq!(note.updated, 2_000);
        assert_eq!(note.created, 1_000);
    }

    #[test]
    fn summary_counts_characters() {
        let note = Note::with_id("n1", "héllo\nworld", 10);
        let summary = note.summary();
        assert_eq!(summary.title, "héllo");
        assert_eq!(summary.length, 11);
        assert_eq!(summary.updated, 10);
    }
}
