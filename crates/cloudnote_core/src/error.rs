//! Application-level error taxonomy.
//!
//! # Responsibility
//! - Collapse layer-specific errors into the conditions a user can act on.
//! - Keep every condition recoverable: callers surface a message and move on.
//!
//! # Invariants
//! - No variant represents a fatal condition; the store is never left
//!   half-mutated when one of these is returned.
//! - `MalformedLink` and `WrongPassword` stay distinct so a viewer can tell
//!   a broken link from a retryable password typo.

use crate::codec::BundleError;
use crate::model::note::NoteId;
use crate::repo::note_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CloudNoteResult<T> = Result<T, CloudNoteError>;

/// Why a share link could not be turned into a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedLinkReason {
    /// Link did not carry a `note` parameter, or it was empty.
    MissingToken,
    /// Token was present but did not decode.
    Bundle(BundleError),
}

impl Display for MalformedLinkReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingToken => write!(f, "link has no note token"),
            Self::Bundle(err) => write!(f, "{err}"),
        }
    }
}

/// User-facing error conditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloudNoteError {
    /// Token failed to decode at any stage.
    MalformedLink(MalformedLinkReason),
    /// Bundle decoded but the entered password does not match.
    WrongPassword,
    /// Referenced note id is not in the store.
    NotFound(NoteId),
    /// Required input was empty; the operation was a no-op.
    EmptyInput(&'static str),
    /// Password cannot be carried by the bundle format.
    InvalidPassword(&'static str),
    /// Event is not valid in the current view state.
    InvalidTransition {
        state: &'static str,
        event: &'static str,
    },
}

impl CloudNoteError {
    /// Stable snake_case label for hosts that switch on error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedLink(_) => "malformed_link",
            Self::WrongPassword => "wrong_password",
            Self::NotFound(_) => "not_found",
            Self::EmptyInput(_) => "empty_input",
            Self::InvalidPassword(_) => "invalid_password",
            Self::InvalidTransition { .. } => "invalid_transition",
        }
    }
}

impl Display for CloudNoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedLink(reason) => write!(f, "invalid or corrupted link: {reason}"),
            Self::WrongPassword => write!(f, "wrong password"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::EmptyInput(details) => write!(f, "empty input: {details}"),
            Self::InvalidPassword(details) => write!(f, "invalid password: {details}"),
            Self::InvalidTransition { state, event } => {
                write!(f, "cannot handle `{event}` while {state}")
            }
        }
    }
}

impl Error for CloudNoteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MalformedLink(MalformedLinkReason::Bundle(err)) => Some(err),
            _ => None,
        }
    }
}

impl From<BundleError> for CloudNoteError {
    fn from(value: BundleError) -> Self {
        Self::MalformedLink(MalformedLinkReason::Bundle(value))
    }
}

impl From<RepoError> for CloudNoteError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CloudNoteError, MalformedLinkReason};
    use crate::codec::BundleError;
    use crate::repo::note_repo::RepoError;
    use std::error::Error;

    #[test]
    fn bundle_errors_become_malformed_link_with_source() {
        let err = CloudNoteError::from(BundleError::MissingSeparator);
        assert_eq!(err.kind(), "malformed_link");
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("invalid or corrupted link"));
    }

    #[test]
    fn repo_not_found_keeps_the_id() {
        let err = CloudNoteError::from(RepoError::NotFound("abc".to_string()));
        assert_eq!(err, CloudNoteError::NotFound("abc".to_string()));
    }

    #[test]
    fn missing_token_has_no_source() {
        let err = CloudNoteError::MalformedLink(MalformedLinkReason::MissingToken);
        assert!(err.source().is_none());
    }
}
