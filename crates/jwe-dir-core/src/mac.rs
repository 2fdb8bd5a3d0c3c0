//! HMAC-SHA2 authentication tag over `AAD ‖ IV ‖ ciphertext ‖ AL`.
//!
//! `AL` is the bit length of the associated data as a 64-bit big-endian
//! integer. It is always appended, so an empty AAD still contributes eight
//! zero bytes and bytes cannot be shifted between AAD and ciphertext.

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;

use crate::error::{AeadError, Result};
use crate::suite::HashFunction;

/// The authenticator stage of the construct.
#[cfg_attr(test, mockall::automock)]
pub trait MacAuthenticator: Send + Sync {
    /// Compute the truncated tag over `aad ‖ iv ‖ ciphertext ‖ AL`.
    fn compute_tag(
        &self,
        hash: HashFunction,
        mac_key: &[u8],
        aad: &[u8],
        iv: &[u8],
        ciphertext: &[u8],
        tag_len: usize,
    ) -> Result<Vec<u8>>;
}

/// HMAC-SHA-256/384/512 authenticator backed by the `hmac` and `sha2` crates.
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSha2;

impl MacAuthenticator for HmacSha2 {
    fn compute_tag(
        &self,
        hash: HashFunction,
        mac_key: &[u8],
        aad: &[u8],
        iv: &[u8],
        ciphertext: &[u8],
        tag_len: usize,
    ) -> Result<Vec<u8>> {
        compute_tag(hash, mac_key, aad, iv, ciphertext, tag_len)
    }
}

/// The `AL` field: bit length of `aad` as 8 big-endian bytes.
///
/// # Errors
///
/// Returns [`AeadError::LengthOverflow`] if the bit length exceeds `u64`.
pub fn aad_length(aad: &[u8]) -> Result<[u8; 8]> {
    let bits = u64::try_from(aad.len())
        .ok()
        .and_then(|len| len.checked_mul(8))
        .ok_or(AeadError::LengthOverflow)?;
    Ok(bits.to_be_bytes())
}

/// Compute `HMAC(mac_key, aad ‖ iv ‖ ciphertext ‖ AL)` truncated to `tag_len` bytes.
///
/// # Errors
///
/// Returns [`AeadError::LengthOverflow`] if `AL` cannot be encoded and
/// [`AeadError::MacComputation`] if the HMAC rejects the key or `tag_len` is
/// longer than the hash output.
pub fn compute_tag(
    hash: HashFunction,
    mac_key: &[u8],
    aad: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
    tag_len: usize,
) -> Result<Vec<u8>> {
    let al = aad_length(aad)?;
    if tag_len > hash.output_len() {
        return Err(AeadError::MacComputation);
    }
    let parts: [&[u8]; 4] = [aad, iv, ciphertext, &al];
    let mut mac = match hash {
        HashFunction::Sha256 => hmac_over::<Hmac<Sha256>>(mac_key, &parts)?,
        HashFunction::Sha384 => hmac_over::<Hmac<Sha384>>(mac_key, &parts)?,
        HashFunction::Sha512 => hmac_over::<Hmac<Sha512>>(mac_key, &parts)?,
    };
    mac.truncate(tag_len);
    Ok(mac)
}

/// Recompute the `tag_len`-byte tag and compare it with `tag` in constant time.
///
/// The expected length comes from the suite, never from `tag` itself.
///
/// # Errors
///
/// Returns [`AeadError::AuthenticationFailed`] if `tag` is not `tag_len` bytes
/// or differs in content, or any error [`compute_tag`] can return.
#[allow(clippy::too_many_arguments)]
pub fn verify_tag(
    authenticator: &dyn MacAuthenticator,
    hash: HashFunction,
    mac_key: &[u8],
    aad: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
    tag: &[u8],
    tag_len: usize,
) -> Result<()> {
    if tag_len == 0 || tag.len() != tag_len {
        return Err(AeadError::AuthenticationFailed);
    }
    let expected = authenticator.compute_tag(hash, mac_key, aad, iv, ciphertext, tag_len)?;
    if bool::from(expected.as_slice().ct_eq(tag)) {
        Ok(())
    } else {
        Err(AeadError::AuthenticationFailed)
    }
}

fn hmac_over<M>(key: &[u8], parts: &[&[u8]]) -> Result<Vec<u8>>
where
    M: Mac + KeyInit,
{
    let mut mac = <M as Mac>::new_from_slice(key).map_err(|_| AeadError::MacComputation)?;
    for part in parts {
        mac.update(part);
    }
    Ok(mac.finalize().into_bytes().to_vec())
}
