//! Core domain logic for Cloud Notes.
//! This crate is the single source of truth for note and share-link invariants.

pub mod codec;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod session;
pub mod share;

pub use codec::{decode_bundle, encode_bundle, BundleError, ShareBundle};
pub use config::{AppConfig, ConfigError};
pub use error::{CloudNoteError, CloudNoteResult, MalformedLinkReason};
pub use logging::{default_log_level, init_logging, init_stderr_logging, logging_status, LogSink};
pub use model::note::{Note, NoteDetail, NoteId, NoteSummary};
pub use model::title::{derive_title, DEFAULT_TITLE_LEN, UNTITLED};
pub use repo::note_repo::{InMemoryNoteRepository, NoteRepository, RepoError, RepoResult};
pub use search::substring::{search_notes, NoteMatches, SearchQuery};
pub use service::note_service::NoteService;
pub use session::{AccessGate, AppMode, Session, SessionEvent, SessionOutput, ViewState};
pub use share::generate::{combine_notes, generate_share_link, ShareLink, ShareSource};
pub use share::link::{build_share_url, extract_token};
pub use share::viewer::SharedNote;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
