//! JWE compact serialisation.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

use super::{JweError, JweHeader, Result};

/// The five parts of a JWE, decoded.
///
/// `protected` keeps the header exactly as it was encoded, because those ASCII
/// bytes (not a re-serialisation of `header`) are what the tag authenticates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JweParts {
    /// Parsed protected header.
    pub header: JweHeader,
    /// base64url-encoded protected header as transmitted.
    pub protected: String,
    /// Encrypted key; empty for `dir`.
    pub encrypted_key: Vec<u8>,
    /// Initialisation vector.
    pub iv: Vec<u8>,
    /// Ciphertext.
    pub ciphertext: Vec<u8>,
    /// Authentication tag.
    pub tag: Vec<u8>,
}

impl JweParts {
    /// Encode as `header.key.iv.ciphertext.tag`.
    pub fn serialize(&self) -> String {
        format!(
            "{}.{}.{}.{}.{}",
            self.protected,
            URL_SAFE_NO_PAD.encode(&self.encrypted_key),
            URL_SAFE_NO_PAD.encode(&self.iv),
            URL_SAFE_NO_PAD.encode(&self.ciphertext),
            URL_SAFE_NO_PAD.encode(&self.tag),
        )
    }

    /// Parse a compact-serialised JWE.
    ///
    /// # Errors
    ///
    /// Returns [`JweError::InvalidFormat`] unless the input is exactly five
    /// dot-separated base64url parts, and [`JweError::Header`] if the header is
    /// not valid JSON.
    pub fn parse(token: &str) -> Result<Self> {
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 5 {
            return Err(JweError::InvalidFormat(format!(
                "expected 5 parts, found {}",
                parts.len()
            )));
        }

        let header = JweHeader::decode(parts[0])?;
        Ok(Self {
            header,
            protected: parts[0].to_owned(),
            encrypted_key: decode_part(parts[1], "encrypted key")?,
            iv: decode_part(parts[2], "IV")?,
            ciphertext: decode_part(parts[3], "ciphertext")?,
            tag: decode_part(parts[4], "authentication tag")?,
        })
    }
}

fn decode_part(part: &str, name: &str) -> Result<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(part)
        .map_err(|_| JweError::InvalidFormat(format!("{name} is not base64url")))
}
