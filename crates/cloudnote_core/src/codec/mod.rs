//! Share-bundle codec.
//!
//! # Responsibility
//! - Turn a `(password, text)` pair into a URL-safe token and back.
//! - Report the failed decode stage as a typed error.
//!
//! # Invariants
//! - Decoding never panics on arbitrary input.
//! - Token format is `base64url(zlib(password + "|||" + text))`, padded.

mod bundle;

pub use bundle::{decode_bundle, encode_bundle, BundleError, BundleResult, ShareBundle, SEPARATOR};
