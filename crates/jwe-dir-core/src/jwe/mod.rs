//! Direct-key JWE (RFC 7516, `"alg": "dir"`) on top of the AES-CBC + HMAC-SHA2 core.
//!
//! # Compact format
//!
//! ```text
//! <b64(header)>..<b64(iv)>.<b64(ciphertext)>.<b64(tag)>
//! ```
//!
//! All parts are base64url without padding. The encrypted-key part is always
//! empty because the shared secret is used directly as the content key. The
//! ASCII bytes of the encoded header are the associated data.

pub mod compact;
pub mod deflate;
pub mod direct;
pub mod header;

pub use compact::JweParts;
pub use direct::{DirectDecrypter, DirectEncrypter};
pub use header::JweHeader;

use thiserror::Error;

use crate::error::AeadError;

/// The only supported key management algorithm.
pub const ALG_DIR: &str = "dir";

/// `zip` header value for raw DEFLATE compression.
pub const ZIP_DEFLATE: &str = "DEF";

/// Errors produced by the JWE layer.
#[derive(Debug, Error)]
pub enum JweError {
    /// The compact serialisation is malformed.
    #[error("invalid JWE format: {0}")]
    InvalidFormat(String),

    /// The protected header is not valid JSON for a JWE header.
    #[error("invalid JWE header: {0}")]
    Header(#[from] serde_json::Error),

    /// The key cannot be used directly with any encryption method.
    #[error("direct key must be 128, 192, 256, 384 or 512 bits, got {bits} bits")]
    UnsupportedKeyLength {
        /// Bit length of the rejected key.
        bits: usize,
    },

    /// The header lists critical extension parameters, none of which are
    /// understood here.
    #[error("unsupported critical header parameters: {0:?}")]
    UnsupportedCritical(Vec<String>),

    /// Compressing or inflating the payload failed.
    #[error("compression error: {0}")]
    Compression(String),

    /// The underlying AEAD operation failed.
    #[error(transparent)]
    Aead(#[from] AeadError),
}

/// Result type for JWE operations.
pub type Result<T> = std::result::Result<T, JweError>;
