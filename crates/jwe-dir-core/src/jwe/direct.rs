//! Direct-key JWE encrypter and decrypter.

use std::fmt;

use tracing::debug;
use zeroize::Zeroizing;

use super::{deflate, JweError, JweHeader, JweParts, Result};
use crate::coordinator::AeadCoordinator;
use crate::error::AeadError;
use crate::iv::{IvSource, OsIvSource};
use crate::key::{bit_length, validate_key_length};
use crate::suite::AlgorithmSuite;

/// Key lengths in bytes accepted for direct use (128 to 512 bits).
pub const ACCEPTED_KEY_LENS: [usize; 5] = [16, 24, 32, 48, 64];

/// Encrypts payloads to JWE with a shared symmetric key.
///
/// The key is checked against the header's `enc` on every call, so a single
/// encrypter only ever produces tokens for the suite its key length matches.
pub struct DirectEncrypter<S = OsIvSource> {
    secret: Zeroizing<Vec<u8>>,
    iv_source: S,
    coordinator: AeadCoordinator,
}

impl DirectEncrypter {
    /// Encrypter drawing IVs from the operating system CSPRNG.
    ///
    /// # Errors
    ///
    /// Returns [`JweError::UnsupportedKeyLength`] unless the key is 128, 192,
    /// 256, 384 or 512 bits long.
    pub fn new(secret: &[u8]) -> Result<Self> {
        Self::with_iv_source(secret, OsIvSource)
    }
}

impl<S: IvSource> DirectEncrypter<S> {
    /// Encrypter drawing IVs from `iv_source`.
    pub fn with_iv_source(secret: &[u8], iv_source: S) -> Result<Self> {
        check_direct_key(secret)?;
        Ok(Self {
            secret: Zeroizing::new(secret.to_vec()),
            iv_source,
            coordinator: AeadCoordinator::new(),
        })
    }

    /// Encrypt `plaintext` under `header`.
    ///
    /// # Errors
    ///
    /// [`AeadError::UnsupportedAlgorithm`] if `alg`, `enc` or `zip` is not
    /// supported, [`AeadError::KeyLength`] if the key does not match `enc`,
    /// and any error of compression or the AEAD core.
    pub fn encrypt(&self, header: &JweHeader, plaintext: &[u8]) -> Result<JweParts> {
        let suite = header.suite()?;
        validate_key_length(suite, &self.secret)?;
        let compress = header.deflate()?;

        let protected = header.encode()?;
        let compressed;
        let content: &[u8] = if compress {
            compressed = deflate::compress(plaintext)?;
            compressed.as_slice()
        } else {
            plaintext
        };

        let result = self.coordinator.encrypt(
            suite,
            &self.secret,
            protected.as_bytes(),
            content,
            &self.iv_source,
        )?;
        debug!(enc = %suite, compressed = compress, "JWE encrypted");

        Ok(JweParts {
            header: header.clone(),
            protected,
            encrypted_key: Vec::new(),
            iv: result.iv,
            ciphertext: result.ciphertext,
            tag: result.tag,
        })
    }

    /// Encrypt and serialise to compact form in one step.
    pub fn encrypt_compact(&self, header: &JweHeader, plaintext: &[u8]) -> Result<String> {
        Ok(self.encrypt(header, plaintext)?.serialize())
    }
}

impl<S> fmt::Debug for DirectEncrypter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DirectEncrypter([REDACTED])")
    }
}

/// Decrypts `dir` JWEs with a shared symmetric key.
pub struct DirectDecrypter {
    secret: Zeroizing<Vec<u8>>,
    coordinator: AeadCoordinator,
}

impl DirectDecrypter {
    /// Decrypter for `secret`.
    ///
    /// # Errors
    ///
    /// Returns [`JweError::UnsupportedKeyLength`] unless the key is 128, 192,
    /// 256, 384 or 512 bits long.
    pub fn new(secret: &[u8]) -> Result<Self> {
        check_direct_key(secret)?;
        Ok(Self {
            secret: Zeroizing::new(secret.to_vec()),
            coordinator: AeadCoordinator::new(),
        })
    }

    /// Verify and decrypt `parts`.
    ///
    /// # Errors
    ///
    /// [`JweError::InvalidFormat`] if an encrypted key is present,
    /// [`AeadError::UnsupportedAlgorithm`] / [`AeadError::KeyLength`] as for
    /// encryption, [`AeadError::AuthenticationFailed`] if the tag does not
    /// verify, and [`JweError::Compression`] if inflation fails.
    pub fn decrypt(&self, parts: &JweParts) -> Result<Zeroizing<Vec<u8>>> {
        let suite = parts.header.suite()?;
        if !parts.encrypted_key.is_empty() {
            return Err(JweError::InvalidFormat(
                "encrypted key must be empty for dir".into(),
            ));
        }
        validate_key_length(suite, &self.secret)?;
        let compressed = parts.header.deflate()?;

        let content = self.coordinator.decrypt(
            suite,
            &self.secret,
            parts.protected.as_bytes(),
            &parts.iv,
            &parts.ciphertext,
            &parts.tag,
        )?;
        debug!(enc = %suite, compressed, "JWE decrypted");

        if compressed {
            deflate::decompress(&content)
        } else {
            Ok(content)
        }
    }

    /// Parse a compact JWE and decrypt it.
    pub fn decrypt_compact(&self, token: &str) -> Result<Zeroizing<Vec<u8>>> {
        self.decrypt(&JweParts::parse(token)?)
    }
}

impl fmt::Debug for DirectDecrypter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DirectDecrypter([REDACTED])")
    }
}

/// The CBC-HMAC suite whose combined key length equals `secret`'s, if any.
///
/// # Errors
///
/// Returns [`AeadError::UnsupportedAlgorithm`] for lengths that only match a
/// GCM method (128 or 192 bits) or no method at all.
pub fn suite_for_key(secret: &[u8]) -> Result<AlgorithmSuite> {
    let bits = bit_length(secret)?;
    AlgorithmSuite::ALL
        .into_iter()
        .find(|suite| suite.combined_key_bits() == bits)
        .ok_or_else(|| {
            AeadError::UnsupportedAlgorithm(format!(
                "no CBC-HMAC encryption method uses a {bits}-bit key"
            ))
            .into()
        })
}

fn check_direct_key(secret: &[u8]) -> Result<()> {
    if ACCEPTED_KEY_LENS.contains(&secret.len()) {
        return Ok(());
    }
    Err(JweError::UnsupportedKeyLength {
        bits: bit_length(secret)?,
    })
}
