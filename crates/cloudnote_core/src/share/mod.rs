//! Share links.
//!
//! # Responsibility
//! - Build `<base-url>/?note=<token>` links from notes and a password.
//! - Parse links back into tokens and gate decoded text behind the password.
//!
//! # Invariants
//! - Passwords are compared by exact string equality; nothing is hashed.
//! - A password containing the bundle separator is never encoded.
//! - Decode failures surface as `MalformedLink`, wrong passwords as
//!   `WrongPassword`.

pub mod generate;
pub mod link;
pub mod viewer;
