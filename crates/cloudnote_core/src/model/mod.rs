//! Note domain model.
//!
//! # Responsibility
//! - Define the note record and its list/detail projections.
//! - Own title derivation so every view renders the same title.
//!
//! # Invariants
//! - Every note is identified by a stable, unique `NoteId`.
//! - `updated` is never earlier than `created`.

pub mod note;
pub mod title;
