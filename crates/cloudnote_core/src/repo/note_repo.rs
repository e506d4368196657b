//! Note repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Provide create/get/update/delete/list over the session's notes.
//! - Own id allocation so uniqueness is checked in one place.
//!
//! # Invariants
//! - `create_note` inserts at index 0.
//! - Ids are unique within one repository.
//! - Failed operations leave the note sequence untouched.

use crate::model::note::{new_note_id, now_epoch_ms, Note, NoteId};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Source of epoch-millisecond timestamps.
pub type Clock = fn() -> i64;

/// Repository error for note lookups and mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    NotFound(NoteId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "note not found: {id}"),
        }
    }
}

impl Error for RepoError {}

/// Repository interface for note CRUD operations.
pub trait NoteRepository {
    /// Creates a note at the front of the store and returns a copy.
    fn create_note(&mut self, content: &str) -> Note;
    /// Gets one note by id.
    fn get_note(&self, id: &str) -> Option<&Note>;
    /// Replaces full note content and bumps `updated`.
    fn update_note(&mut self, id: &str, content: &str) -> RepoResult<Note>;
    /// Removes one note and returns it.
    fn delete_note(&mut self, id: &str) -> RepoResult<Note>;
    /// All notes in store order.
    fn notes(&self) -> &[Note];

    fn len(&self) -> usize {
        self.notes().len()
    }

    fn is_empty(&self) -> bool {
        self.notes().is_empty()
    }
}

/// Volatile, single-owner note store.
#[derive(Debug, Clone)]
pub struct InMemoryNoteRepository {
    notes: Vec<Note>,
    clock: Clock,
}

impl Default for InMemoryNoteRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryNoteRepository {
    /// Creates an empty store using the wall clock.
    pub fn new() -> Self {
        Self::with_clock(now_epoch_ms)
    }

    /// Creates an empty store with an injected clock.
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            notes: Vec::new(),
            clock,
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.notes.iter().position(|note| note.id == id)
    }

    fn allocate_id(&self) -> NoteId {
        loop {
            let candidate = new_note_id();
            if self.position(candidate.as_str()).is_none() {
                return candidate;
            }
        }
    }
}

impl NoteRepository for InMemoryNoteRepository {
    fn create_note(&mut self, content: &str) -> Note {
        let note = Note::with_id(self.allocate_id(), content, (self.clock)());
        self.notes.insert(0, note.clone());
        note
    }

    fn get_note(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    fn update_note(&mut self, id: &str, content: &str) -> RepoResult<Note> {
        let now = (self.clock)();
        let note = self
            .notes
            .iter_mut()
            .find(|note| note.id == id)
            .ok_or_else(|| RepoError::NotFound(id.to_string()))?;
        note.replace_content(content, now);
        Ok(note.clone())
    }

    fn delete_note(&mut self, id: &str) -> RepoResult<Note> {
        let index = self
            .position(id)
            .ok_or_else(|| RepoError::NotFound(id.to_string()))?;
        Ok(self.notes.remove(index))
    }

    fn notes(&self) -> &[Note] {
        self.notes.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryNoteRepository, NoteRepository, RepoError};

    fn fixed_clock() -> i64 {
        1_700_000_000_000
    }

    #[test]
    fn create_inserts_at_front() {
        let mut repo = InMemoryNoteRepository::with_clock(fixed_clock);
        let first = repo.create_note("first");
        let second = repo.create_note("second");
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.notes()[0].id, second.id);
        assert_eq!(repo.notes()[1].id, first.id);
        assert_eq!(first.created, fixed_clock());
        assert_eq!(first.updated, first.created);
    }

    #[test]
    fn update_missing_note_reports_not_found() {
        let mut repo = InMemoryNoteRepository::with_clock(fixed_clock);
        repo.create_note("kept");
        let err = repo.update_note("missing", "x").expect_err("update note should fail");
        assert_eq!(err, RepoError::NotFound("missing".to_string()));
        assert_eq!(repo.notes()[0].content, "kept");
    }

    #[test]
    fn delete_removes_only_target() {
        let mut repo = InMemoryNoteRepository::with_clock(fixed_clock);
        let a = repo.create_note("a");
        let b = repo.create_note("b");
        let removed = repo.delete_note(&a.id).expect("delete note should succeed");
        assert_eq!(removed.id, a.id);
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.notes()[0].id, b.id);
        assert!(repo.get_note(&a.id).is_none());
    }
}
