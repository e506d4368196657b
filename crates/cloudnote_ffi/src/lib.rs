//! FFI surface for host UIs.
//!
//! Thin wrappers over `cloudnote_core`; no business rules live here.

pub mod api;
