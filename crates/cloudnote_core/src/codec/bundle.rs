use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use flate2::write::ZlibEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Write;

/// Joins password and text inside the compressed payload.
pub const SEPARATOR: &str = "|||";

/// Upper bound for inflated payloads; links never legitimately get close.
const MAX_INFLATED_BYTES: usize = 64 * 1024 * 1024;
const INFLATE_CHUNK_BYTES: usize = 4 * 1024;

pub type BundleResult<T> = Result<T, BundleError>;

/// Decode failure, tagged by the stage that rejected the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleError {
    /// Token is empty or whitespace only.
    EmptyToken,
    /// Invalid alphabet, length or padding.
    Base64(String),
    /// zlib header, block data or checksum is corrupt.
    Inflate(String),
    /// Compressed stream ended before its final block.
    Truncated,
    /// Bytes follow the end of the compressed stream.
    TrailingBytes(usize),
    /// Inflated payload exceeds `MAX_INFLATED_BYTES`.
    TooLarge,
    /// Payload is not UTF-8.
    Utf8 { valid_up_to: usize },
    /// Payload has no `|||` separator.
    MissingSeparator,
}

impl Display for BundleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyToken => write!(f, "token is empty"),
            Self::Base64(message) => write!(f, "token is not url-safe base64: {message}"),
            Self::Inflate(message) => write!(f, "token payload is not a zlib stream: {message}"),
            Self::Truncated => write!(f, "token payload is truncated"),
            Self::TrailingBytes(count) => {
                write!(f, "token payload has {count} trailing byte(s)")
            }
            Self::TooLarge => write!(
                f,
                "token payload inflates beyond {MAX_INFLATED_BYTES} bytes"
            ),
            Self::Utf8 { valid_up_to } => {
                write!(f, "token payload is not UTF-8 after byte {valid_up_to}")
            }
            Self::MissingSeparator => write!(f, "token payload has no `{SEPARATOR}` separator"),
        }
    }
}

impl Error for BundleError {}

/// Decoded `(password, text)` pair carried by a share token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareBundle {
    /// Plaintext password; compared by exact equality only.
    pub password: String,
    /// Shared note text.
    pub text: String,
}

impl ShareBundle {
    pub fn new(password: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            text: text.into(),
        }
    }

    /// Encodes this bundle into a token.
    pub fn encode(&self) -> String {
        encode_bundle(self.password.as_str(), self.text.as_str())
    }

    /// Exact string comparison against the stored password.
    pub fn password_matches(&self, entered: &str) -> bool {
        self.password == entered
    }
}

/// Encodes `(password, text)` into a padded URL-safe base64 token.
///
/// A password containing [`SEPARATOR`] is encoded as-is and will not
/// round-trip; the share layer rejects such passwords before calling this.
pub fn encode_bundle(password: &str, text: &str) -> String {
    let mut joined = String::with_capacity(password.len() + SEPARATOR.len() + text.len());
    joined.push_str(password);
    joined.push_str(SEPARATOR);
    joined.push_str(text);

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(joined.as_bytes())
        .expect("zlib write into Vec is infallible");
    let compressed = encoder
        .finish()
        .expect("zlib finish into Vec is infallible");
    URL_SAFE.encode(compressed)
}

/// Decodes a token produced by [`encode_bundle`].
///
/// Surrounding whitespace is ignored. The payload is split on the first
/// separator occurrence, so text may contain `|||` freely.
///
/// # Errors
/// Returns the [`BundleError`] of the first stage that rejects the token.
pub fn decode_bundle(token: &str) -> BundleResult<ShareBundle> {
    let token = token.trim();
    if token.is_empty() {
        return Err(BundleError::EmptyToken);
    }

    let compressed = URL_SAFE
        .decode(token.as_bytes())
        .map_err(|err| BundleError::Base64(err.to_string()))?;
    let raw = inflate(compressed.as_slice())?;
    let decoded = String::from_utf8(raw).map_err(|err| BundleError::Utf8 {
        valid_up_to: err.utf8_error().valid_up_to(),
    })?;

    let Some((password, text)) = decoded.split_once(SEPARATOR) else {
        return Err(BundleError::MissingSeparator);
    };
    Ok(ShareBundle::new(password, text))
}

fn inflate(input: &[u8]) -> BundleResult<Vec<u8>> {
    let mut inflater = Decompress::new(true);
    let mut out = Vec::with_capacity(input.len().saturating_mul(4).max(INFLATE_CHUNK_BYTES));

    loop {
        let consumed_before = inflater.total_in();
        let produced_before = inflater.total_out();
        let remaining = input
            .get(consumed_before as usize..)
            .ok_or(BundleError::Truncated)?;

        let status = inflater
            .decompress_vec(remaining, &mut out, FlushDecompress::None)
            .map_err(|err| BundleError::Inflate(err.to_string()))?;

        match status {
            Status::StreamEnd => break,
            Status::Ok | Status::BufError => {
                if out.len() == out.capacity() {
                    if out.len() >= MAX_INFLATED_BYTES {
                        return Err(BundleError::TooLarge);
                    }
                    out.reserve(out.len().max(INFLATE_CHUNK_BYTES));
                    continue;
                }
                let progressed = inflater.total_in() != consumed_before
                    || inflater.total_out() != produced_before;
                if !progressed {
                    return Err(BundleError::Truncated);
                }
            }
        }
    }

    let trailing = input.len().saturating_sub(inflater.total_in() as usize);
    if trailing > 0 {
        return Err(BundleError::TrailingBytes(trailing));
    }
    if out.len() > MAX_INFLATED_BYTES {
        return Err(BundleError::TooLarge);
    }
    Ok(out)
}
