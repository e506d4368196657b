//! FFI use-case API for host UI calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions over an owned session handle.
//! - Flatten core results into plain response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every envelope carries `ok`, a human-readable `message` and, on
//!   failure, a stable `error_kind`.
//! - Session state lives in the handle; nothing here is process-global
//!   except logging.

use cloudnote_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AppConfig, CloudNoteError, NoteDetail, NoteSummary, Session, SessionEvent, SessionOutput,
    ShareSource, SharedNote, ViewState,
};
use log::warn;
use std::sync::{Mutex, MutexGuard};

const INTERNAL_ERROR_KIND: &str = "internal";

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Opaque per-user session handle.
///
/// Host calls may arrive from any thread, so the session sits behind a
/// mutex; a poisoned lock is reported as an `internal` error envelope.
#[flutter_rust_bridge::frb(opaque)]
pub struct NotesSession {
    inner: Mutex<Session>,
}

impl NotesSession {
    fn lock(&self) -> Result<MutexGuard<'_, Session>, ActionResponse> {
        self.inner.lock().map_err(|_| {
            warn!("event=session_lock module=ffi status=poisoned");
            ActionResponse::internal("session state is unavailable")
        })
    }
}

/// Note row returned to hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListItem {
    pub id: String,
    pub title: String,
    /// Epoch milliseconds.
    pub updated: i64,
    /// Content length in characters.
    pub length: u64,
}

/// Selected note returned to hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteView {
    pub id: String,
    pub content: String,
    pub created: i64,
    pub updated: i64,
}

/// Generic action envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Note affected by the action, when there is one.
    pub note_id: Option<String>,
    /// View state after the action (`no_selection|viewing|editing|confirming_delete`).
    pub view_state: String,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
    /// Stable error label; `None` on success.
    pub error_kind: Option<String>,
}

impl ActionResponse {
    fn success(message: impl Into<String>, note_id: Option<String>, view: &ViewState) -> Self {
        Self {
            ok: true,
            note_id,
            view_state: view.label().to_string(),
            message: message.into(),
            error_kind: None,
        }
    }

    fn failure(err: &CloudNoteError, view: &ViewState) -> Self {
        Self {
            ok: false,
            note_id: None,
            view_state: view.label().to_string(),
            message: err.to_string(),
            error_kind: Some(err.kind().to_string()),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            note_id: None,
            view_state: ViewState::NoSelection.label().to_string(),
            message: message.into(),
            error_kind: Some(INTERNAL_ERROR_KIND.to_string()),
        }
    }
}

/// List envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListResponse {
    pub ok: bool,
    /// Rows filtered by the active search, in store order.
    pub items: Vec<NoteListItem>,
    /// Active search query.
    pub query: String,
    pub message: String,
}

/// Selected-note envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDetailResponse {
    pub ok: bool,
    /// `None` when nothing is selected.
    pub note: Option<NoteView>,
    pub view_state: String,
    pub message: String,
}

/// Share envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareResponse {
    pub ok: bool,
    pub token: Option<String>,
    pub url: Option<String>,
    pub message: String,
    pub error_kind: Option<String>,
}

impl ShareResponse {
    fn failure(message: impl Into<String>, kind: &str) -> Self {
        Self {
            ok: false,
            token: None,
            url: None,
            message: message.into(),
            error_kind: Some(kind.to_string()),
        }
    }
}

/// Shared-link viewer envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedNoteResponse {
    pub ok: bool,
    /// Decoded text; only set when the password matched.
    pub text: Option<String>,
    pub message: String,
    pub error_kind: Option<String>,
}

/// Creates a new, empty session.
///
/// Base URL comes from `CLOUDNOTE_BASE_URL`; an invalid value falls back to
/// the default and is logged.
#[flutter_rust_bridge::frb(sync)]
pub fn session_new() -> NotesSession {
    let config = AppConfig::from_env().unwrap_or_else(|err| {
        warn!("event=config_load module=ffi status=error reason={err}");
        AppConfig::default()
    });
    NotesSession {
        inner: Mutex::new(Session::new(config.base_url)),
    }
}

/// Creates a session with an explicit base URL (tests, embedded hosts).
#[flutter_rust_bridge::frb(sync)]
pub fn session_new_with_base_url(base_url: String) -> NotesSession {
    NotesSession {
        inner: Mutex::new(Session::new(base_url)),
    }
}

/// Creates a note; `None` creates an empty note, blank text is rejected.
#[flutter_rust_bridge::frb(sync)]
pub fn session_create_note(session: &NotesSession, content: Option<String>) -> ActionResponse {
    dispatch(session, SessionEvent::CreateNote { content }, "Created.")
}

#[flutter_rust_bridge::frb(sync)]
pub fn session_select_note(session: &NotesSession, id: String) -> ActionResponse {
    dispatch(session, SessionEvent::SelectNote { id }, "Viewing note.")
}

#[flutter_rust_bridge::frb(sync)]
pub fn session_start_edit(session: &NotesSession, id: String) -> ActionResponse {
    dispatch(session, SessionEvent::StartEdit { id }, "Editing note.")
}

#[flutter_rust_bridge::frb(sync)]
pub fn session_save_edit(session: &NotesSession, id: String, content: String) -> ActionResponse {
    dispatch(session, SessionEvent::SaveEdit { id, content }, "Saved.")
}

#[flutter_rust_bridge::frb(sync)]
pub fn session_cancel_edit(session: &NotesSession, id: String) -> ActionResponse {
    dispatch(session, SessionEvent::CancelEdit { id }, "Edit cancelled.")
}

/// First phase of deletion; nothing is removed yet.
#[flutter_rust_bridge::frb(sync)]
pub fn session_request_delete(session: &NotesSession, id: String) -> ActionResponse {
    dispatch(
        session,
        SessionEvent::RequestDelete { id },
        "Confirm to delete this note.",
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn session_confirm_delete(session: &NotesSession, id: String) -> ActionResponse {
    dispatch(session, SessionEvent::ConfirmDelete { id }, "Deleted.")
}

#[flutter_rust_bridge::frb(sync)]
pub fn session_cancel_delete(session: &NotesSession, id: String) -> ActionResponse {
    dispatch(session, SessionEvent::CancelDelete { id }, "Delete cancelled.")
}

/// Sets the active search query and returns the filtered list.
#[flutter_rust_bridge::frb(sync)]
pub fn session_search(session: &NotesSession, query: String) -> NoteListResponse {
    let mut guard = match session.lock() {
        Ok(guard) => guard,
        Err(err) => return list_failure(err.message),
    };
    match guard.handle(SessionEvent::Search { query }) {
        Ok(_) => list_response(&guard),
        Err(err) => list_failure(err.to_string()),
    }
}

/// Lists notes filtered by the active search.
#[flutter_rust_bridge::frb(sync)]
pub fn session_list_notes(session: &NotesSession) -> NoteListResponse {
    match session.lock() {
        Ok(guard) => list_response(&guard),
        Err(err) => list_failure(err.message),
    }
}

/// Returns the selected note, if any.
#[flutter_rust_bridge::frb(sync)]
pub fn session_selected_note(session: &NotesSession) -> NoteDetailResponse {
    let guard = match session.lock() {
        Ok(guard) => guard,
        Err(err) => {
            return NoteDetailResponse {
                ok: false,
                note: None,
                view_state: err.view_state,
                message: err.message,
            }
        }
    };
    let note = guard.detail().map(to_note_view);
    let message = if note.is_some() {
        "Note selected.".to_string()
    } else {
        "No note selected.".to_string()
    };
    NoteDetailResponse {
        ok: true,
        note,
        view_state: guard.view().label().to_string(),
        message,
    }
}

/// Current view state label.
#[flutter_rust_bridge::frb(sync)]
pub fn session_view_state(session: &NotesSession) -> String {
    match session.lock() {
        Ok(guard) => guard.view().label().to_string(),
        Err(err) => err.view_state,
    }
}

/// Generates a share link.
///
/// Input semantics:
/// - `note_ids = None`: share every note.
/// - `note_ids = Some(ids)`: share the listed notes in store order.
/// - `content = Some(text)` takes precedence and shares free text.
#[flutter_rust_bridge::frb(sync)]
pub fn session_share(
    session: &NotesSession,
    note_ids: Option<Vec<String>>,
    content: Option<String>,
    password: String,
) -> ShareResponse {
    let source = match (content, note_ids) {
        (Some(text), _) => ShareSource::Content(text),
        (None, Some(ids)) => ShareSource::Notes(ids),
        (None, None) => ShareSource::AllNotes,
    };
    let mut guard = match session.lock() {
        Ok(guard) => guard,
        Err(err) => return ShareResponse::failure(err.message, INTERNAL_ERROR_KIND),
    };
    match guard.handle(SessionEvent::GenerateShareLink { source, password }) {
        Ok(SessionOutput::Share(link)) => ShareResponse {
            ok: true,
            token: Some(link.token),
            url: Some(link.url),
            message: "Share the link together with the password.".to_string(),
            error_kind: None,
        },
        Ok(other) => ShareResponse::failure(
            format!("unexpected session output: {other:?}"),
            INTERNAL_ERROR_KIND,
        ),
        Err(err) => ShareResponse::failure(err.to_string(), err.kind()),
    }
}

/// Opens a share link (URL, query string or bare token) with a password.
///
/// # FFI contract
/// - `malformed_link` when the link cannot be decoded.
/// - `wrong_password` / `empty_input` for password problems; retry allowed.
#[flutter_rust_bridge::frb(sync)]
pub fn shared_note_open(link: String, password: String) -> SharedNoteResponse {
    let result = SharedNote::open(link.as_str()).and_then(|mut viewer| {
        let text = viewer.unlock(password.as_str())?.to_owned();
        Ok(text)
    });
    match result {
        Ok(text) => SharedNoteResponse {
            ok: true,
            text: Some(text),
            message: "Password correct.".to_string(),
            error_kind: None,
        },
        Err(err) => SharedNoteResponse {
            ok: false,
            text: None,
            message: err.to_string(),
            error_kind: Some(err.kind().to_string()),
        },
    }
}

fn dispatch(session: &NotesSession, event: SessionEvent, message: &str) -> ActionResponse {
    let mut guard = match session.lock() {
        Ok(guard) => guard,
        Err(err) => return err,
    };
    match guard.handle(event) {
        Ok(output) => ActionResponse::success(message, affected_note(&output), guard.view()),
        Err(err) => ActionResponse::failure(&err, guard.view()),
    }
}

fn affected_note(output: &SessionOutput) -> Option<String> {
    match output {
        SessionOutput::Created(detail)
        | SessionOutput::Selected(detail)
        | SessionOutput::Saved(detail) => Some(detail.id.clone()),
        SessionOutput::Deleted(id) => Some(id.clone()),
        SessionOutput::StateChanged(view) => view.note_id().map(str::to_owned),
        SessionOutput::SearchUpdated(_) | SessionOutput::Share(_) => None,
    }
}

fn list_response(session: &Session) -> NoteListResponse {
    let items = session
        .list()
        .into_iter()
        .map(to_list_item)
        .collect::<Vec<_>>();
    let message = if items.is_empty() {
        "No notes yet.".to_string()
    } else {
        format!("{} note(s).", items.len())
    };
    NoteListResponse {
        ok: true,
        items,
        query: session.query().to_string(),
        message,
    }
}

fn list_failure(message: String) -> NoteListResponse {
    NoteListResponse {
        ok: false,
        items: Vec::new(),
        query: String::new(),
        message,
    }
}

fn to_list_item(summary: NoteSummary) -> NoteListItem {
    NoteListItem {
        id: summary.id,
        title: summary.title,
        updated: summary.updated,
        length: summary.length as u64,
    }
}

fn to_note_view(detail: NoteDetail) -> NoteView {
    NoteView {
        id: detail.id,
        content: detail.content,
        created: detail.created,
        updated: detail.updated,
    }
}
