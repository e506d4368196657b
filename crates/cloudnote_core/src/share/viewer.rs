//! Password-gated viewer for received share links.
//!
//! # Responsibility
//! - Decode a received link once and hold the bundle read-only.
//! - Release the text only for an exactly matching password.
//!
//! # Invariants
//! - A viewer exists only for a token that decoded cleanly.
//! - Wrong passwords never reveal text; retries are unlimited and counted.

use crate::codec::{decode_bundle, ShareBundle};
use crate::error::{CloudNoteError, CloudNoteResult};
use crate::share::link::extract_token;
use log::{info, warn};

/// A decoded share link waiting for its password.
///
/// Only constructed from a token that decoded cleanly, so every remaining
/// failure is a password problem.
#[derive(Debug, Clone)]
pub struct SharedNote {
    bundle: ShareBundle,
    failed_attempts: u32,
}

impl SharedNote {
    /// Opens a share URL, query string, or bare token.
    ///
    /// # Errors
    /// Returns `MalformedLink` when no token is present or it fails to decode.
    pub fn open(link: &str) -> CloudNoteResult<Self> {
        let token = extract_token(link)?;
        Self::from_token(token.as_str())
    }

    /// Decodes a bare token.
    pub fn from_token(token: &str) -> CloudNoteResult<Self> {
        match decode_bundle(token) {
            Ok(bundle) => {
                info!(
                    "event=shared_note_open module=share status=ok text_len={}",
                    bundle.text.chars().count()
                );
                Ok(Self {
                    bundle,
                    failed_attempts: 0,
                })
            }
            Err(err) => {
                warn!("event=shared_note_open module=share status=malformed reason={err}");
                Err(err.into())
            }
        }
    }

    /// Checks `entered` against the bundled password and returns the text.
    ///
    /// # Errors
    /// - `EmptyInput` when nothing was entered.
    /// - `WrongPassword` on mismatch; the caller may retry.
    pub fn unlock(&mut self, entered: &str) -> CloudNoteResult<&str> {
        if entered.is_empty() {
            return Err(CloudNoteError::EmptyInput("enter the password to view"));
        }
        if !self.bundle.password_matches(entered) {
            self.failed_attempts = self.failed_attempts.saturating_add(1);
            warn!(
                "event=shared_note_unlock module=share status=wrong_password attempts={}",
                self.failed_attempts
            );
            return Err(CloudNoteError::WrongPassword);
        }
        info!("event=shared_note_unlock module=share status=ok");
        Ok(self.bundle.text.as_str())
    }

    /// Number of wrong passwords entered so far.
    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }
}
