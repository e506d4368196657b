//! Repository layer abstractions and the in-memory implementation.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for notes.
//! - Keep ordering and id bookkeeping out of service orchestration.
//!
//! # Invariants
//! - Store order is most-recent-first: inserts go to the front.
//! - Repository APIs return semantic errors (`NotFound`) instead of panicking.

pub mod note_repo;
