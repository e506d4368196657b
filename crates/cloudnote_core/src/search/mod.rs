//! Note search entry points.
//!
//! # Responsibility
//! - Expose case-insensitive substring search over the session's notes.
//! - Keep result ordering identical to store ordering.
//!
//! # See also
//! - `service::note_service` for the use-case wrapper.

pub mod substring;
