//! Splitting a shared secret into MAC and AES sub-keys.

use std::fmt;

use zeroize::Zeroizing;

use crate::error::{AeadError, Result};
use crate::suite::AlgorithmSuite;

/// Bit length of `bytes`, or [`AeadError::LengthOverflow`] if it does not fit.
pub fn bit_length(bytes: &[u8]) -> Result<usize> {
    bytes.len().checked_mul(8).ok_or(AeadError::LengthOverflow)
}

/// Check that `secret` is exactly as long as `suite` requires.
///
/// # Errors
///
/// Returns [`AeadError::KeyLength`] on mismatch. The error carries lengths only.
pub fn validate_key_length(suite: AlgorithmSuite, secret: &[u8]) -> Result<()> {
    let actual_bits = bit_length(secret)?;
    if actual_bits != suite.combined_key_bits() {
        return Err(AeadError::KeyLength {
            expected_bits: suite.combined_key_bits(),
            actual_bits,
        });
    }
    Ok(())
}

/// A shared secret split into its MAC and encryption halves.
///
/// Both halves are wiped when the key is dropped.
pub struct CompositeKey {
    mac_key: Zeroizing<Vec<u8>>,
    enc_key: Zeroizing<Vec<u8>>,
    truncated_tag_len: usize,
}

impl CompositeKey {
    /// Split `secret` for use with `suite`.
    ///
    /// The first half keys the HMAC, the second half keys AES.
    ///
    /// # Errors
    ///
    /// Returns [`AeadError::KeyLength`] if the secret length does not match the
    /// suite's combined key length.
    pub fn split(suite: AlgorithmSuite, secret: &[u8]) -> Result<Self> {
        validate_key_length(suite, secret)?;
        let (mac_half, enc_half) = secret.split_at(suite.mac_key_len());
        Ok(Self {
            mac_key: Zeroizing::new(mac_half.to_vec()),
            enc_key: Zeroizing::new(enc_half.to_vec()),
            truncated_tag_len: suite.truncated_tag_len(),
        })
    }

    /// The HMAC sub-key.
    pub fn mac_key(&self) -> &[u8] {
        &self.mac_key
    }

    /// The AES sub-key.
    pub fn enc_key(&self) -> &[u8] {
        &self.enc_key
    }

    /// Length in bytes of the authentication tag produced with this key.
    pub fn truncated_tag_len(&self) -> usize {
        self.truncated_tag_len
    }
}

impl fmt::Debug for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CompositeKey([REDACTED])")
    }
}
