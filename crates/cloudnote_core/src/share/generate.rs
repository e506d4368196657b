//! Share link generation from notes.
//!
//! # Responsibility
//! - Resolve a `ShareSource` into the text to share, in store order.
//! - Validate the password and encode text and password into a link.
//!
//! # Invariants
//! - Selection is validated before the password.
//! - A password containing the bundle separator is never encoded.

use crate::codec::{encode_bundle, SEPARATOR};
use crate::error::{CloudNoteError, CloudNoteResult};
use crate::model::note::{Note, NoteId};
use crate::share::link::build_share_url;
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Separator between note contents when several notes share one link.
pub const NOTE_JOINER: &str = "\n\n";

/// What a share link should carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum ShareSource {
    /// Every note, in store order.
    AllNotes,
    /// Selected notes, emitted in store order regardless of id order.
    Notes(Vec<NoteId>),
    /// Free text not tied to a stored note.
    Content(String),
}

/// Generated share artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLink {
    /// Raw codec output.
    pub token: String,
    /// `<base-url>/?note=<percent-encoded token>`.
    pub url: String,
}

/// Joins note contents with a blank line, in the given order.
pub fn combine_notes<'a>(notes: impl IntoIterator<Item = &'a Note>) -> String {
    notes
        .into_iter()
        .map(|note| note.content.as_str())
        .collect::<Vec<_>>()
        .join(NOTE_JOINER)
}

/// Checks that `password` can be carried by a share token.
///
/// # Errors
/// - `EmptyInput` when the password is empty.
/// - `InvalidPassword` when it contains the bundle separator.
pub fn validate_share_password(password: &str) -> CloudNoteResult<()> {
    if password.is_empty() {
        return Err(CloudNoteError::EmptyInput("set a password first"));
    }
    if password.contains(SEPARATOR) {
        return Err(CloudNoteError::InvalidPassword(
            "password must not contain `|||`",
        ));
    }
    Ok(())
}

/// Resolves `source` against `notes` into the text to share.
///
/// # Errors
/// - `EmptyInput` when there is nothing to share.
/// - `NotFound` when a selected id is not in `notes`.
pub fn resolve_share_text(notes: &[Note], source: &ShareSource) -> CloudNoteResult<String> {
    match source {
        ShareSource::AllNotes => {
            if notes.is_empty() {
                return Err(CloudNoteError::EmptyInput("no notes to share"));
            }
            Ok(combine_notes(notes))
        }
        ShareSource::Notes(ids) => {
            if ids.is_empty() {
                return Err(CloudNoteError::EmptyInput("no notes selected"));
            }
            if let Some(missing) = ids.iter().find(|id| !notes.iter().any(|n| &n.id == *id)) {
                return Err(CloudNoteError::NotFound(missing.clone()));
            }
            Ok(combine_notes(notes.iter().filter(|note| ids.contains(&note.id))))
        }
        ShareSource::Content(text) => {
            if text.is_empty() {
                return Err(CloudNoteError::EmptyInput("nothing to share"));
            }
            Ok(text.clone())
        }
    }
}

/// Builds a share link for `source` protected by `password`.
///
/// Selection is checked before the password, so an empty store reports
/// "no notes to share" even when the password is also missing.
pub fn generate_share_link(
    notes: &[Note],
    source: &ShareSource,
    password: &str,
    base_url: &str,
) -> CloudNoteResult<ShareLink> {
    let text = match resolve_share_text(notes, source) {
        Ok(text) => text,
        Err(err) => {
            warn!("event=share_generate module=share status={}", err.kind());
            return Err(err);
        }
    };
    if let Err(err) = validate_share_password(password) {
        warn!("event=share_generate module=share status={}", err.kind());
        return Err(err);
    }

    let token = encode_bundle(password, text.as_str());
    let url = build_share_url(base_url, token.as_str());
    info!(
        "event=share_generate module=share status=ok text_len={} token_len={}",
        text.chars().count(),
        token.len()
    );
    Ok(ShareLink { token, url })
}
