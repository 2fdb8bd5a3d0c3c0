//! AES-CBC with PKCS#7 padding.
//!
//! This stage provides confidentiality only. Integrity comes from the HMAC in
//! [`crate::mac`]; callers must verify the tag before calling [`decrypt_cbc`].

use aes::cipher::{
    block_padding::Pkcs7, BlockCipher, BlockDecryptMut, BlockEncryptMut, KeyInit, KeyIvInit,
};
use aes::{Aes128, Aes192, Aes256};
use zeroize::Zeroizing;

use crate::error::{AeadError, Result};

/// AES block size in bytes; also the required IV length.
pub const BLOCK_SIZE: usize = 16;

/// Length of the ciphertext produced for a plaintext of `plaintext_len` bytes.
///
/// PKCS#7 always adds between 1 and [`BLOCK_SIZE`] bytes of padding.
pub const fn ciphertext_len(plaintext_len: usize) -> usize {
    (plaintext_len / BLOCK_SIZE + 1) * BLOCK_SIZE
}

/// The block cipher stage of the construct.
#[cfg_attr(test, mockall::automock)]
pub trait BlockCipherEngine: Send + Sync {
    /// Encrypt `plaintext` under `enc_key` and `iv`.
    fn encrypt(&self, enc_key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>>;

    /// Decrypt and unpad `ciphertext` under `enc_key` and `iv`.
    fn decrypt(&self, enc_key: &[u8], iv: &[u8], ciphertext: &[u8])
        -> Result<Zeroizing<Vec<u8>>>;
}

/// AES-CBC/PKCS#7 engine backed by the `aes` and `cbc` crates.
#[derive(Debug, Clone, Copy, Default)]
pub struct AesCbc;

impl BlockCipherEngine for AesCbc {
    fn encrypt(&self, enc_key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        encrypt_cbc(enc_key, iv, plaintext)
    }

    fn decrypt(
        &self,
        enc_key: &[u8],
        iv: &[u8],
        ciphertext: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>> {
        decrypt_cbc(enc_key, iv, ciphertext)
    }
}

/// Encrypt `plaintext` with AES-CBC and PKCS#7 padding.
///
/// The AES variant is picked from the key length. Output is deterministic for
/// a given `(enc_key, iv, plaintext)`.
///
/// # Errors
///
/// Returns [`AeadError::InvalidIv`] if `iv` is not [`BLOCK_SIZE`] bytes and
/// [`AeadError::UnsupportedKeySize`] if `enc_key` is not 16, 24 or 32 bytes.
pub fn encrypt_cbc(enc_key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    check_iv(iv)?;
    match enc_key.len() {
        16 => encrypt_with::<Aes128>(enc_key, iv, plaintext),
        24 => encrypt_with::<Aes192>(enc_key, iv, plaintext),
        32 => encrypt_with::<Aes256>(enc_key, iv, plaintext),
        n => Err(unsupported_key_size(n)),
    }
}

/// Decrypt `ciphertext` with AES-CBC and strip PKCS#7 padding.
///
/// # Errors
///
/// Returns [`AeadError::InvalidIv`] / [`AeadError::UnsupportedKeySize`] as
/// [`encrypt_cbc`] does, and [`AeadError::Decryption`] if the ciphertext is not
/// a whole number of blocks or the padding is malformed.
pub fn decrypt_cbc(enc_key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    check_iv(iv)?;
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(AeadError::Decryption);
    }
    match enc_key.len() {
        16 => decrypt_with::<Aes128>(enc_key, iv, ciphertext),
        24 => decrypt_with::<Aes192>(enc_key, iv, ciphertext),
        32 => decrypt_with::<Aes256>(enc_key, iv, ciphertext),
        n => Err(unsupported_key_size(n)),
    }
}

fn encrypt_with<C>(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>>
where
    C: BlockEncryptMut + BlockCipher + KeyInit,
{
    let cipher = cbc::Encryptor::<C>::new_from_slices(key, iv)
        .map_err(|_| unsupported_key_size(key.len()))?;
    Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

fn decrypt_with<C>(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Zeroizing<Vec<u8>>>
where
    C: BlockDecryptMut + BlockCipher + KeyInit,
{
    let cipher = cbc::Decryptor::<C>::new_from_slices(key, iv)
        .map_err(|_| unsupported_key_size(key.len()))?;
    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map(Zeroizing::new)
        .map_err(|_| AeadError::Decryption)
}

fn check_iv(iv: &[u8]) -> Result<()> {
    if iv.len() != BLOCK_SIZE {
        return Err(AeadError::InvalidIv {
            expected: BLOCK_SIZE,
            actual: iv.len(),
        });
    }
    Ok(())
}

fn unsupported_key_size(len: usize) -> AeadError {
    AeadError::UnsupportedKeySize {
        bits: len.saturating_mul(8),
    }
}
