//! [`KeyStore`]: thread-safe holder for the shared content key.

use std::sync::Arc;

use jwe_dir_core::jwe::direct::ACCEPTED_KEY_LENS;
use thiserror::Error;
use tokio::sync::RwLock;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Errors produced by the key layer.
#[derive(Debug, Error)]
pub enum KeyError {
    /// No key has been loaded yet.
    #[error("shared key not yet initialised")]
    NotInitialised,

    /// The key material is not 128, 192, 256, 384 or 512 bits long.
    #[error("shared key has invalid length: {0} bytes")]
    InvalidLength(usize),
}

/// Owned copy of the shared key.
///
/// Stored inside [`KeyStore`]; cloned into handler call stacks when needed.
/// The buffer is overwritten with zeroes when dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretBytes(Vec<u8>);

impl SecretBytes {
    /// Borrow the raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for SecretBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretBytes([REDACTED])")
    }
}

/// Thread-safe store for the shared content key.
///
/// Wraps an `Arc<RwLock<Option<SecretBytes>>>` so request handlers can read the
/// key concurrently while startup holds the only write lock.
#[derive(Clone, Debug)]
pub struct KeyStore {
    inner: Arc<RwLock<Option<SecretBytes>>>,
}

impl KeyStore {
    /// Create a new, empty [`KeyStore`].
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns `true` once a key has been stored.
    pub async fn is_ready(&self) -> bool {
        self.inner.read().await.is_some()
    }

    /// Store (or replace) the shared key.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidLength`] unless the slice is one of the
    /// accepted direct-key lengths.
    pub async fn store(&self, key_bytes: &[u8]) -> Result<(), KeyError> {
        if !ACCEPTED_KEY_LENS.contains(&key_bytes.len()) {
            return Err(KeyError::InvalidLength(key_bytes.len()));
        }
        let mut lock = self.inner.write().await;
        *lock = Some(SecretBytes(key_bytes.to_vec()));
        Ok(())
    }

    /// Clone of the current key. Callers should use and drop it promptly.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::NotInitialised`] if no key has been stored yet.
    pub async fn current(&self) -> Result<SecretBytes, KeyError> {
        let lock = self.inner.read().await;
        lock.as_ref().cloned().ok_or(KeyError::NotInitialised)
    }
}

impl Default for KeyStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn initially_not_ready() {
        let store = KeyStore::new();
        assert!(!store.is_ready().await);
        assert!(matches!(
            store.current().await,
            Err(KeyError::NotInitialised)
        ));
    }

    #[tokio::test]
    async fn store_and_retrieve() {
        let store = KeyStore::new();
        let key = vec![0x42u8; 32];
        store.store(&key).await.unwrap();
        assert!(store.is_ready().await);
        assert_eq!(store.current().await.unwrap().as_bytes(), key.as_slice());
    }

    #[tokio::test]
    async fn accepts_every_direct_key_length() {
        let store = KeyStore::new();
        for len in ACCEPTED_KEY_LENS {
            store.store(&vec![1u8; len]).await.unwrap();
            assert_eq!(store.current().await.unwrap().as_bytes().len(), len);
        }
    }

    #[tokio::test]
    async fn rejects_wrong_length() {
        let store = KeyStore::new();
        assert!(matches!(
            store.store(&[0u8; 20]).await,
            Err(KeyError::InvalidLength(20))
        ));
        assert!(!store.is_ready().await);
    }

    #[tokio::test]
    async fn store_replaces_key() {
        let store = KeyStore::new();
        store.store(&[0x01u8; 32]).await.unwrap();
        store.store(&[0x02u8; 32]).await.unwrap();
        assert_eq!(store.current().await.unwrap().as_bytes(), &[0x02u8; 32]);
    }

    #[test]
    fn secret_bytes_redacted_in_debug() {
        let secret = SecretBytes(vec![0xFF; 16]);
        let dbg = format!("{secret:?}");
        assert!(dbg.contains("REDACTED"));
        assert!(!dbg.contains("255"));
    }
}
