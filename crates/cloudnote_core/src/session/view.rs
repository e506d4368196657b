//! Selected-note view state for one editor session.
//!
//! # Responsibility
//! - Name the note the presentation layer is showing and in which mode.
//! - Serialize the state as a deep-link query and parse it back.
//!
//! # Invariants
//! - `ConfirmingDelete::resume` is never itself a `ConfirmingDelete`.
//! - Parsed ids are not checked against any store here.

use crate::model::note::NoteId;
use crate::share::link::query_param;
use serde::{Deserialize, Serialize};

/// Selected-note view state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "data")]
pub enum ViewState {
    #[default]
    NoSelection,
    Viewing(NoteId),
    Editing(NoteId),
    /// `resume` is the state restored when the confirmation is cancelled.
    ConfirmingDelete { id: NoteId, resume: Box<ViewState> },
}

impl ViewState {
    /// Note referenced by this state, if any.
    pub fn note_id(&self) -> Option<&str> {
        match self {
            Self::NoSelection => None,
            Self::Viewing(id) | Self::Editing(id) => Some(id.as_str()),
            Self::ConfirmingDelete { id, .. } => Some(id.as_str()),
        }
    }

    /// Stable label used in logs and transition errors.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NoSelection => "no_selection",
            Self::Viewing(_) => "viewing",
            Self::Editing(_) => "editing",
            Self::ConfirmingDelete { .. } => "confirming_delete",
        }
    }

    /// Enters delete confirmation for `id`, remembering `prior`.
    ///
    /// Without a prior selection, cancelling shows the note itself.
    pub(crate) fn confirming_delete(id: NoteId, prior: ViewState) -> Self {
        let resume = match prior {
            Self::NoSelection | Self::ConfirmingDelete { .. } => Self::Viewing(id.clone()),
            selected => selected,
        };
        Self::ConfirmingDelete {
            id,
            resume: Box::new(resume),
        }
    }

    /// Serializes the state as a deep-link query (`open=`, `edit=`, `del=`).
    ///
    /// `NoSelection` serializes to an empty string.
    pub fn to_query(&self) -> String {
        let (key, id) = match self {
            Self::NoSelection => return String::new(),
            Self::Viewing(id) => ("open", id),
            Self::Editing(id) => ("edit", id),
            Self::ConfirmingDelete { id, .. } => ("del", id),
        };
        format!("{key}={}", urlencoding::encode(id))
    }

    /// Parses a deep-link query; unknown or empty queries mean `NoSelection`.
    ///
    /// The parsed id is not checked against any store.
    pub fn from_query(query: &str) -> Self {
        if let Some(id) = query_param(query, "edit") {
            return Self::Editing(id);
        }
        if let Some(id) = query_param(query, "del") {
            return Self::confirming_delete(id, Self::NoSelection);
        }
        if let Some(id) = query_param(query, "open") {
            return Self::Viewing(id);
        }
        Self::NoSelection
    }
}
