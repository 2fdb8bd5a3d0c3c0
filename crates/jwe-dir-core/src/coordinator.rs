//! Encrypt-then-MAC pipeline over the cipher and authenticator stages.
//!
//! # Encrypt
//!
//! 1. Check the secret length against the suite.
//! 2. Draw a fresh IV from the [`IvSource`].
//! 3. Split the secret into MAC and AES sub-keys.
//! 4. AES-CBC encrypt the plaintext.
//! 5. HMAC `AAD ‖ IV ‖ ciphertext ‖ AL` and truncate.
//! 6. Return `{iv, ciphertext, tag}`.
//!
//! Decryption mirrors this and verifies the tag before any plaintext is
//! produced.
//!
//! Nothing here logs key material, plaintext or derived keys.

use tracing::{debug, instrument};
use zeroize::Zeroizing;

use crate::cbc::{AesCbc, BlockCipherEngine, BLOCK_SIZE};
use crate::error::{AeadError, Result};
use crate::iv::{IvSource, OsIvSource};
use crate::key::{validate_key_length, CompositeKey};
use crate::mac::{verify_tag, HmacSha2, MacAuthenticator};
use crate::suite::AlgorithmSuite;

/// Output of one encryption: the only values a caller persists or transmits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptionResult {
    /// Initialisation vector, one AES block.
    pub iv: Vec<u8>,
    /// AES-CBC ciphertext including padding.
    pub ciphertext: Vec<u8>,
    /// Truncated HMAC tag.
    pub tag: Vec<u8>,
}

/// Stateless composition of a block cipher engine and a MAC authenticator.
///
/// Holds no keys and no mutable state, so one instance can be shared across
/// threads and used with any number of keys.
#[derive(Debug, Clone, Default)]
pub struct AeadCoordinator<C = AesCbc, M = HmacSha2> {
    cipher: C,
    authenticator: M,
}

impl AeadCoordinator {
    /// Coordinator over AES-CBC and HMAC-SHA2.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C, M> AeadCoordinator<C, M>
where
    C: BlockCipherEngine,
    M: MacAuthenticator,
{
    /// Coordinator over custom stages.
    pub fn with_stages(cipher: C, authenticator: M) -> Self {
        Self {
            cipher,
            authenticator,
        }
    }

    /// Encrypt `plaintext` and authenticate it together with `aad`.
    ///
    /// # Errors
    ///
    /// [`AeadError::KeyLength`] if `secret` does not fit `suite`; this is checked
    /// before the IV source or any primitive is used. Otherwise any error of
    /// the IV source, cipher or authenticator, unchanged.
    #[instrument(level = "debug", skip_all, fields(enc = %suite))]
    pub fn encrypt(
        &self,
        suite: AlgorithmSuite,
        secret: &[u8],
        aad: &[u8],
        plaintext: &[u8],
        iv_source: &dyn IvSource,
    ) -> Result<EncryptionResult> {
        validate_key_length(suite, secret)?;

        let iv = iv_source.next_bytes(BLOCK_SIZE)?;
        if iv.len() != BLOCK_SIZE {
            return Err(AeadError::RandomnessUnavailable(format!(
                "IV source returned {} bytes, expected {BLOCK_SIZE}",
                iv.len()
            )));
        }

        let key = CompositeKey::split(suite, secret)?;
        let ciphertext = self.cipher.encrypt(key.enc_key(), &iv, plaintext)?;
        let tag = self.authenticator.compute_tag(
            suite.hash(),
            key.mac_key(),
            aad,
            &iv,
            &ciphertext,
            key.truncated_tag_len(),
        )?;

        debug!(
            aad_len = aad.len(),
            ciphertext_len = ciphertext.len(),
            "content encrypted"
        );
        Ok(EncryptionResult {
            iv,
            ciphertext,
            tag,
        })
    }

    /// Verify `tag` and, only if it matches, decrypt `ciphertext`.
    ///
    /// # Errors
    ///
    /// [`AeadError::KeyLength`] for a mis-sized secret,
    /// [`AeadError::InvalidIv`] for a mis-sized IV,
    /// [`AeadError::AuthenticationFailed`] if the tag has the wrong length or
    /// does not verify, and [`AeadError::Decryption`] if the authenticated
    /// ciphertext has bad padding.
    #[instrument(level = "debug", skip_all, fields(enc = %suite))]
    pub fn decrypt(
        &self,
        suite: AlgorithmSuite,
        secret: &[u8],
        aad: &[u8],
        iv: &[u8],
        ciphertext: &[u8],
        tag: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>> {
        validate_key_length(suite, secret)?;
        if iv.len() != BLOCK_SIZE {
            return Err(AeadError::InvalidIv {
                expected: BLOCK_SIZE,
                actual: iv.len(),
            });
        }

        let key = CompositeKey::split(suite, secret)?;
        verify_tag(
            &self.authenticator,
            suite.hash(),
            key.mac_key(),
            aad,
            iv,
            ciphertext,
            tag,
            key.truncated_tag_len(),
        )?;

        let plaintext = self.cipher.decrypt(key.enc_key(), iv, ciphertext)?;
        debug!(
            aad_len = aad.len(),
            ciphertext_len = ciphertext.len(),
            "content decrypted"
        );
        Ok(plaintext)
    }
}

/// Encrypt with AES-CBC + HMAC-SHA2, drawing the IV from `iv_source`.
///
/// See [`AeadCoordinator::encrypt`].
pub fn encrypt(
    suite: AlgorithmSuite,
    secret: &[u8],
    aad: &[u8],
    plaintext: &[u8],
    iv_source: &dyn IvSource,
) -> Result<EncryptionResult> {
    AeadCoordinator::new().encrypt(suite, secret, aad, plaintext, iv_source)
}

/// Encrypt with an IV from the operating system CSPRNG.
pub fn encrypt_with_os_iv(
    suite: AlgorithmSuite,
    secret: &[u8],
    aad: &[u8],
    plaintext: &[u8],
) -> Result<EncryptionResult> {
    encrypt(suite, secret, aad, plaintext, &OsIvSource)
}

/// Verify and decrypt an [`EncryptionResult`]-shaped triple.
///
/// See [`AeadCoordinator::decrypt`].
pub fn decrypt(
    suite: AlgorithmSuite,
    secret: &[u8],
    aad: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
    tag: &[u8],
) -> Result<Zeroizing<Vec<u8>>> {
    AeadCoordinator::new().decrypt(suite, secret, aad, iv, ciphertext, tag)
}
