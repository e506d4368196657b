//! App-mode routing and the optional access gate.
//!
//! # Responsibility
//! - Decide between the shared viewer and the editor from a query string.
//! - Guard the editor behind a static password when one is configured.
//!
//! # Invariants
//! - A blank `note` parameter never selects the shared viewer.

use crate::error::{CloudNoteError, CloudNoteResult};
use crate::share::link::{query_param, NOTE_PARAM};

/// Top-level mode chosen from the request query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMode {
    /// A share token is present; show the password prompt for it.
    SharedViewer(String),
    /// Regular note editor.
    Editor,
}

impl AppMode {
    /// `SharedViewer` when a non-empty `note` parameter is present.
    pub fn from_query(query: &str) -> Self {
        match query_param(query, NOTE_PARAM) {
            Some(token) => Self::SharedViewer(token),
            None => Self::Editor,
        }
    }
}

/// Optional static password guarding the editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessGate {
    password: Option<String>,
}

impl AccessGate {
    /// An empty configured password disables the gate.
    pub fn new(password: Option<String>) -> Self {
        Self {
            password: password.filter(|value| !value.is_empty()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.password.is_some()
    }

    /// Passes when the gate is disabled or `entered` matches exactly.
    ///
    /// # Errors
    /// - `EmptyInput` when the gate is enabled and nothing was entered.
    /// - `WrongPassword` on mismatch.
    pub fn check(&self, entered: &str) -> CloudNoteResult<()> {
        let Some(expected) = self.password.as_deref() else {
            return Ok(());
        };
        if entered.is_empty() {
            return Err(CloudNoteError::EmptyInput("enter the access password"));
        }
        if entered != expected {
            return Err(CloudNoteError::WrongPassword);
        }
        Ok(())
    }
}
