//! Event-driven editor session.
//!
//! # Responsibility
//! - Apply `SessionEvent`s to the owned note store and the view state.
//! - Build share links from the current store.
//!
//! # Invariants
//! - Transition checks run before any store mutation.
//! - A cancelled delete restores the exact prior view, or `NoSelection`
//!   when that view names a note that no longer exists.

use crate::error::{CloudNoteError, CloudNoteResult};
use crate::model::note::{NoteDetail, NoteId, NoteSummary};
use crate::repo::note_repo::{InMemoryNoteRepository, NoteRepository};
use crate::search::substring::SearchQuery;
use crate::service::note_service::NoteService;
use crate::session::view::ViewState;
use crate::share::generate::{generate_share_link, ShareLink, ShareSource};
use log::debug;
use serde::{Deserialize, Serialize};

/// Input events emitted by a presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum SessionEvent {
    /// `None` creates an empty note; `Some` must contain visible text.
    CreateNote { content: Option<String> },
    SelectNote { id: NoteId },
    StartEdit { id: NoteId },
    SaveEdit { id: NoteId, content: String },
    CancelEdit { id: NoteId },
    RequestDelete { id: NoteId },
    ConfirmDelete { id: NoteId },
    CancelDelete { id: NoteId },
    Search { query: String },
    GenerateShareLink { source: ShareSource, password: String },
}

impl SessionEvent {
    /// Stable label used in logs and transition errors.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CreateNote { .. } => "create_note",
            Self::SelectNote { .. } => "select_note",
            Self::StartEdit { .. } => "start_edit",
            Self::SaveEdit { .. } => "save_edit",
            Self::CancelEdit { .. } => "cancel_edit",
            Self::RequestDelete { .. } => "request_delete",
            Self::ConfirmDelete { .. } => "confirm_delete",
            Self::CancelDelete { .. } => "cancel_delete",
            Self::Search { .. } => "search",
            Self::GenerateShareLink { .. } => "generate_share_link",
        }
    }
}

/// Result of one handled event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "output", content = "data")]
pub enum SessionOutput {
    Created(NoteDetail),
    Selected(NoteDetail),
    Saved(NoteDetail),
    Deleted(NoteId),
    StateChanged(ViewState),
    SearchUpdated(Vec<NoteSummary>),
    Share(ShareLink),
}

/// One user's editor session.
#[derive(Debug, Clone)]
pub struct Session<R: NoteRepository = InMemoryNoteRepository> {
    notes: NoteService<R>,
    view: ViewState,
    query: SearchQuery,
    base_url: String,
}

impl Session<InMemoryNoteRepository> {
    /// Creates an empty in-memory session building links on `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_repository(InMemoryNoteRepository::new(), base_url)
    }
}

impl<R: NoteRepository> Session<R> {
    pub fn with_repository(repo: R, base_url: impl Into<String>) -> Self {
        Self {
            notes: NoteService::new(repo),
            view: ViewState::NoSelection,
            query: SearchQuery::default(),
            base_url: base_url.into(),
        }
    }

    /// Applies one event.
    ///
    /// # Errors
    /// Any `CloudNoteError`; the session stays usable afterwards.
    pub fn handle(&mut self, event: SessionEvent) -> CloudNoteResult<SessionOutput> {
        let trigger = event.label();
        let from = self.view.label();
        let result = match event {
            SessionEvent::CreateNote { content } => self.create_note(content),
            SessionEvent::SelectNote { id } => self.select_note(id),
            SessionEvent::StartEdit { id } => self.start_edit(id),
            SessionEvent::SaveEdit { id, content } => self.save_edit(id, content),
            SessionEvent::CancelEdit { id } => self.cancel_edit(id),
            SessionEvent::RequestDelete { id } => self.request_delete(id),
            SessionEvent::ConfirmDelete { id } => self.confirm_delete(id),
            SessionEvent::CancelDelete { id } => self.cancel_delete(id),
            SessionEvent::Search { query } => Ok(self.search(query)),
            SessionEvent::GenerateShareLink { source, password } => {
                self.share(&source, password.as_str())
            }
        };
        debug!(
            "event=view_transition module=session trigger={} from={} to={} status={}",
            trigger,
            from,
            self.view.label(),
            result.as_ref().map_or_else(CloudNoteError::kind, |_| "ok")
        );
        result
    }

    /// Current view state.
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Active search query text.
    pub fn query(&self) -> &str {
        self.query.text()
    }

    /// List rows filtered by the active query, in store order.
    pub fn list(&self) -> Vec<NoteSummary> {
        self.notes.list_summaries(&self.query)
    }

    /// Detail of the note referenced by the view state.
    pub fn detail(&self) -> Option<NoteDetail> {
        let id = self.view.note_id()?;
        self.notes.get_note(id).ok().map(|note| note.detail())
    }

    /// Read access to the underlying note service.
    pub fn notes(&self) -> &NoteService<R> {
        &self.notes
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Restores a deep-linked view (`open=`, `edit=`, `del=`).
    ///
    /// Unknown ids fall back to `NoSelection` and report `NotFound`.
    pub fn restore_view(&mut self, query: &str) -> CloudNoteResult<&ViewState> {
        let requested = ViewState::from_query(query);
        if let Some(id) = requested.note_id() {
            if self.notes.get_note(id).is_err() {
                self.view = ViewState::NoSelection;
                return Err(CloudNoteError::NotFound(id.to_string()));
            }
        }
        self.view = requested;
        Ok(&self.view)
    }

    fn create_note(&mut self, content: Option<String>) -> CloudNoteResult<SessionOutput> {
        let content = match content {
            Some(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(CloudNoteError::EmptyInput("note content is blank"));
                }
                trimmed.to_string()
            }
            None => String::new(),
        };
        let note = self.notes.create_note(content);
        self.view = ViewState::Viewing(note.id.clone());
        Ok(SessionOutput::Created(note.detail()))
    }

    fn select_note(&mut self, id: NoteId) -> CloudNoteResult<SessionOutput> {
        let detail = self.existing_detail(id.as_str())?;
        self.view = ViewState::Viewing(id);
        Ok(SessionOutput::Selected(detail))
    }

    fn start_edit(&mut self, id: NoteId) -> CloudNoteResult<SessionOutput> {
        if matches!(self.view, ViewState::ConfirmingDelete { .. }) {
            return Err(self.invalid("start_edit"));
        }
        self.existing_detail(id.as_str())?;
        self.view = ViewState::Editing(id);
        Ok(SessionOutput::StateChanged(self.view.clone()))
    }

    fn save_edit(&mut self, id: NoteId, content: String) -> CloudNoteResult<SessionOutput> {
        if !matches!(&self.view, ViewState::Editing(current) if *current == id) {
            return Err(self.invalid("save_edit"));
        }
        self.existing_detail(id.as_str())?;
        let note = self.notes.update_note(id.as_str(), content.trim())?;
        self.view = ViewState::Viewing(id);
        Ok(SessionOutput::Saved(note.detail()))
    }

    fn cancel_edit(&mut self, id: NoteId) -> CloudNoteResult<SessionOutput> {
        if !matches!(&self.view, ViewState::Editing(current) if *current == id) {
            return Err(self.invalid("cancel_edit"));
        }
        self.existing_detail(id.as_str())?;
        self.view = ViewState::Viewing(id);
        Ok(SessionOutput::StateChanged(self.view.clone()))
    }

    fn request_delete(&mut self, id: NoteId) -> CloudNoteResult<SessionOutput> {
        if matches!(self.view, ViewState::ConfirmingDelete { .. }) {
            return Err(self.invalid("request_delete"));
        }
        self.existing_detail(id.as_str())?;
        let prior = std::mem::take(&mut self.view);
        self.view = ViewState::confirming_delete(id, prior);
        Ok(SessionOutput::StateChanged(self.view.clone()))
    }

    fn confirm_delete(&mut self, id: NoteId) -> CloudNoteResult<SessionOutput> {
        if !matches!(&self.view, ViewState::ConfirmingDelete { id: current, .. } if *current == id)
        {
            return Err(self.invalid("confirm_delete"));
        }
        self.view = ViewState::NoSelection;
        let removed = self.notes.delete_note(id.as_str())?;
        Ok(SessionOutput::Deleted(removed.id))
    }

    fn cancel_delete(&mut self, id: NoteId) -> CloudNoteResult<SessionOutput> {
        let resume = match &self.view {
            ViewState::ConfirmingDelete { id: current, resume } if *current == id => {
                resume.as_ref().clone()
            }
            _ => return Err(self.invalid("cancel_delete")),
        };
        self.existing_detail(id.as_str())?;
        let resume_exists = resume
            .note_id()
            .map_or(true, |prior| self.notes.notes().iter().any(|note| note.id == prior));
        self.view = if resume_exists {
            resume
        } else {
            ViewState::NoSelection
        };
        Ok(SessionOutput::StateChanged(self.view.clone()))
    }

    fn search(&mut self, query: String) -> SessionOutput {
        self.query = SearchQuery::new(query);
        SessionOutput::SearchUpdated(self.list())
    }

    fn share(&self, source: &ShareSource, password: &str) -> CloudNoteResult<SessionOutput> {
        generate_share_link(
            self.notes.notes(),
            source,
            password,
            self.base_url.as_str(),
        )
        .map(SessionOutput::Share)
    }

    /// Looks up a note; a view pointing at a missing note is cleared.
    fn existing_detail(&mut self, id: &str) -> CloudNoteResult<NoteDetail> {
        match self.notes.get_note(id) {
            Ok(note) => Ok(note.detail()),
            Err(err) => {
                if self.view.note_id() == Some(id) {
                    self.view = ViewState::NoSelection;
                }
                Err(err)
            }
        }
    }

    fn invalid(&self, event: &'static str) -> CloudNoteError {
        CloudNoteError::InvalidTransition {
            state: self.view.label(),
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Session, SessionEvent, SessionOutput};
    use crate::error::CloudNoteError;
    use crate::session::view::ViewState;

    fn session_with_note(content: &str) -> (Session, String) {
        let mut session = Session::new("https://notes.test");
        let output = session
            .handle(SessionEvent::CreateNote {
                content: Some(content.to_string()),
            })
            .expect("event should be handled");
        let detail = match output {
            SessionOutput::Created(detail) => detail,
            other => panic!("expected Created, got {other:?}"),
        };
        (session, detail.id)
    }

    #[test]
    fn blank_create_is_empty_input_and_no_op() {
        let mut session = Session::new("https://notes.test");
        let err = session
            .handle(SessionEvent::CreateNote {
                content: Some("   ".to_string()),
            })
            .expect_err("event should be rejected");
        assert!(matches!(err, CloudNoteError::EmptyInput(_)));
        assert!(session.notes().is_empty());
    }

    #[test]
    fn create_without_content_makes_empty_note() {
        let mut session = Session::new("https://notes.test");
        session
            .handle(SessionEvent::CreateNote { content: None })
            .expect("event should be handled");
        assert_eq!(session.list()[0].title, "Untitled");
    }

    #[test]
    fn cancel_delete_returns_to_editing() {
        let (mut session, id) = session_with_note("draft");
        session
            .handle(SessionEvent::StartEdit { id: id.clone() })
            .expect("event should be handled");
        session
            .handle(SessionEvent::RequestDelete { id: id.clone() })
            .expect("event should be handled");
        assert_eq!(
            session.view(),
            &ViewState::ConfirmingDelete {
                id: id.clone(),
                resume: Box::new(ViewState::Editing(id.clone())),
            }
        );
        session
            .handle(SessionEvent::CancelDelete { id: id.clone() })
            .expect("event should be handled");
        assert_eq!(session.view(), &ViewState::Editing(id));
        assert_eq!(session.notes().len(), 1);
    }

    #[test]
    fn save_outside_editing_is_invalid_transition() {
        let (mut session, id) = session_with_note("draft");
        let err = session
            .handle(SessionEvent::SaveEdit {
                id: id.clone(),
                content: "x".to_string(),
            })
            .expect_err("event should be rejected");
        assert_eq!(
            err,
            CloudNoteError::InvalidTransition {
                state: "viewing",
                event: "save_edit"
            }
        );
        assert_eq!(session.detail().expect("a note should be selected").content, "draft");
    }

    #[test]
    fn restore_view_rejects_unknown_ids() {
        let (mut session, id) = session_with_note("draft");
        let restored = session
            .restore_view(&format!("edit={id}"))
            .expect("known id should restore");
        assert_eq!(restored, &ViewState::Editing(id));
        let err = session.restore_view("open=missing").expect_err("restore view should fail");
        assert_eq!(err, CloudNoteError::NotFound("missing".to_string()));
        assert_eq!(session.view(), &ViewState::NoSelection);
    }

    #[test]
    fn vanished_selection_falls_back_to_no_selection() {
        let (mut session, id) = session_with_note("gone soon");
        session
            .notes
            .delete_note(&id)
            .expect("direct delete should succeed");

        let err = session
            .handle(SessionEvent::StartEdit { id: id.clone() })
            .expect_err("edit of a vanished note should fail");
        assert_eq!(err, CloudNoteError::NotFound(id));
        assert_eq!(session.view(), &ViewState::NoSelection);
        assert!(session.detail().is_none());
    }

    #[test]
    fn cancel_delete_skips_prior_view_of_vanished_note() {
        let (mut session, first) = session_with_note("first");
        let second = match session
            .handle(SessionEvent::CreateNote {
                content: Some("second".to_string()),
            })
            .expect("create should succeed")
        {
            SessionOutput::Created(detail) => detail.id,
            other => panic!("expected Created, got {other:?}"),
        };
        session
            .handle(SessionEvent::StartEdit { id: first.clone() })
            .expect("start edit should succeed");
        session
            .handle(SessionEvent::RequestDelete { id: second.clone() })
            .expect("request delete should succeed");
        session
            .notes
            .delete_note(&first)
            .expect("direct delete should succeed");

        session
            .handle(SessionEvent::CancelDelete { id: second })
            .expect("cancel delete should succeed");
        assert_eq!(session.view(), &ViewState::NoSelection);
    }
}
