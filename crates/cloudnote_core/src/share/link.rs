//! Share URL construction and token extraction.
//!
//! # Responsibility
//! - Build share URLs with a percent-encoded `note` parameter.
//! - Recover the token from a URL, a query string or a bare token.
//!
//! # Invariants
//! - `extract_token(build_share_url(base, token)) == token` for any base.

use crate::error::{CloudNoteError, CloudNoteResult, MalformedLinkReason};
use url::{form_urlencoded, Url};

/// Query parameter carrying the share token.
pub const NOTE_PARAM: &str = "note";

/// Builds `<base-url>/?note=<percent-encoded token>`.
///
/// A trailing `/` on `base_url` is not duplicated.
pub fn build_share_url(base_url: &str, token: &str) -> String {
    format!(
        "{}/?{}={}",
        base_url.trim().trim_end_matches('/'),
        NOTE_PARAM,
        urlencoding::encode(token)
    )
}

/// Returns the first non-empty value of `name` in a query string.
///
/// Accepts the query with or without its leading `?`.
pub fn query_param(query: &str, name: &str) -> Option<String> {
    let query = query.trim().trim_start_matches('?');
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, value)| key == name && !value.trim().is_empty())
        .map(|(_, value)| value.trim().to_string())
}

/// Extracts the share token from user input.
///
/// Supported inputs:
/// - a full share URL (`https://host/?note=...`);
/// - a query string (`?note=...` or `note=...&x=y`);
/// - a bare token, optionally percent-encoded.
///
/// # Errors
/// Returns `MalformedLink(MissingToken)` when no non-empty token is present.
pub fn extract_token(input: &str) -> CloudNoteResult<String> {
    let trimmed = input.trim();
    let missing = || CloudNoteError::MalformedLink(MalformedLinkReason::MissingToken);
    if trimmed.is_empty() {
        return Err(missing());
    }

    if let Ok(parsed) = Url::parse(trimmed) {
        if parsed.has_host() {
            return parsed
                .query()
                .and_then(|query| query_param(query, NOTE_PARAM))
                .ok_or_else(missing);
        }
    }

    if let Some((_, query)) = trimmed.split_once('?') {
        let query = query.split('#').next().unwrap_or("");
        return query_param(query, NOTE_PARAM).ok_or_else(missing);
    }

    if trimmed.starts_with("note=") || trimmed.contains("&note=") {
        return query_param(trimmed, NOTE_PARAM).ok_or_else(missing);
    }

    let decoded = urlencoding::decode(trimmed)
        .map(|value| value.into_owned())
        .unwrap_or_else(|_| trimmed.to_string());
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::{build_share_url, extract_token, query_param};
    use crate::error::{CloudNoteError, MalformedLinkReason};

    #[test]
    fn build_share_url_percent_encodes_padding() {
        let url = build_share_url("https://notes.example.com/", "eJxz-_==");
        assert_eq!(url, "https://notes.example.com/?note=eJxz-_%3D%3D");
    }

    #[test]
    fn extract_token_from_full_url() {
        let token = extract_token("https://notes.example.com/?note=eJxz-_%3D%3D&x=1")
            .expect("full url should carry a token");
        assert_eq!(token, "eJxz-_==");
    }

    #[test]
    fn extract_token_from_query_forms() {
        for (input, expected) in [
            ("?note=abc%3D", "abc="),
            ("note=abc", "abc"),
            ("/?x=1&note=abc#frag", "abc"),
        ] {
            let token = extract_token(input).expect("query form should carry a token");
            assert_eq!(token, expected, "input {input:?}");
        }
    }

    #[test]
    fn extract_token_accepts_bare_tokens() {
        for input in [" eJxz-_== ", "eJxz-_%3D%3D"] {
            let token = extract_token(input).expect("bare token should be accepted");
            assert_eq!(token, "eJxz-_==", "input {input:?}");
        }
    }

    #[test]
    fn missing_note_param_is_malformed() {
        let err = extract_token("https://notes.example.com/?open=1")
            .expect_err("url without note param should fail");
        assert_eq!(
            err,
            CloudNoteError::MalformedLink(MalformedLinkReason::MissingToken)
        );
        assert!(extract_token("   ").is_err());
        assert!(extract_token("?note=").is_err());
    }

    #[test]
    fn query_param_skips_empty_values() {
        assert_eq!(query_param("note=&note=x", "note").as_deref(), Some("x"));
        assert_eq!(query_param("", "note"), None);
    }
}
