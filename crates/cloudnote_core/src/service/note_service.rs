//! Note use-case service.
//!
//! # Responsibility
//! - Provide note create/read/update/delete/search APIs.
//! - Translate repository errors into the application taxonomy.
//! - Emit metadata-only diagnostic events.
//!
//! # Invariants
//! - `update_note` uses full content replacement semantics.
//! - Listing and search follow store order (most-recent-first).
//! - Log lines carry ids and lengths, never note content.

use crate::error::{CloudNoteError, CloudNoteResult};
use crate::model::note::{Note, NoteSummary};
use crate::repo::note_repo::NoteRepository;
use crate::search::substring::{search_notes, NoteMatches, SearchQuery};
use log::{debug, info, warn};

/// Note service facade over repository implementations.
#[derive(Debug, Clone, Default)]
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one note, possibly empty, at the front of the store.
    pub fn create_note(&mut self, content: impl Into<String>) -> Note {
        let content = content.into();
        let note = self.repo.create_note(content.as_str());
        info!(
            "event=note_create module=service status=ok id={} len={} total={}",
            note.id,
            note.char_len(),
            self.repo.len()
        );
        note
    }

    /// Gets one note by id.
    pub fn get_note(&self, id: &str) -> CloudNoteResult<&Note> {
        self.repo
            .get_note(id)
            .ok_or_else(|| CloudNoteError::NotFound(id.to_string()))
    }

    /// Replaces note content fully.
    pub fn update_note(
        &mut self,
        id: &str,
        content: impl Into<String>,
    ) -> CloudNoteResult<Note> {
        let content = content.into();
        match self.repo.update_note(id, content.as_str()) {
            Ok(note) => {
                info!(
                    "event=note_update module=service status=ok id={} len={}",
                    note.id,
                    note.char_len()
                );
                Ok(note)
            }
            Err(err) => {
                warn!("event=note_update module=service status=not_found id={id}");
                Err(err.into())
            }
        }
    }

    /// Removes one note.
    pub fn delete_note(&mut self, id: &str) -> CloudNoteResult<Note> {
        match self.repo.delete_note(id) {
            Ok(note) => {
                info!(
                    "event=note_delete module=service status=ok id={} total={}",
                    note.id,
                    self.repo.len()
                );
                Ok(note)
            }
            Err(err) => {
                warn!("event=note_delete module=service status=not_found id={id}");
                Err(err.into())
            }
        }
    }

    /// Lazily searches notes in store order.
    pub fn search<'a>(&'a self, query: &'a SearchQuery) -> NoteMatches<'a> {
        debug!(
            "event=note_search module=service match_all={} query_len={}",
            query.is_match_all(),
            query.text().chars().count()
        );
        search_notes(self.repo.notes(), query)
    }

    /// List rows for notes matching `query`.
    pub fn list_summaries(&self, query: &SearchQuery) -> Vec<NoteSummary> {
        self.search(query).map(Note::summary).collect()
    }

    /// All notes in store order.
    pub fn notes(&self) -> &[Note] {
        self.repo.notes()
    }

    pub fn len(&self) -> usize {
        self.repo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repo.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::NoteService;
    use crate::error::CloudNoteError;
    use crate::repo::note_repo::InMemoryNoteRepository;
    use crate::search::substring::SearchQuery;

    #[test]
    fn get_missing_note_is_not_found() {
        let service = NoteService::new(InMemoryNoteRepository::new());
        assert_eq!(
            service.get_note("nope").expect_err("get note should fail"),
            CloudNoteError::NotFound("nope".to_string())
        );
    }

    #[test]
    fn list_summaries_filters_and_keeps_order() {
        let mut service = NoteService::new(InMemoryNoteRepository::new());
        service.create_note("alpha milk");
        service.create_note("beta");
        service.create_note("gamma MILK");

        let rows = service.list_summaries(&SearchQuery::new("milk"));
        let titles: Vec<&str> = rows.iter().map(|row| row.title.as_str()).collect();
        assert_eq!(titles, vec!["gamma MILK", "alpha milk"]);
    }
}
