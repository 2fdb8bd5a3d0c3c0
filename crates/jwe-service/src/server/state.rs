//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use jwe_dir_core::{jwe::JweHeader, AlgorithmSuite};

use crate::key::KeyStore;

/// Application state shared across all request handlers.
///
/// All fields are cheaply cloneable so that Axum can clone the state for each
/// request without copying the header.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe store for the shared content key.
    pub key_store: KeyStore,
    /// Protected header stamped on every issued token.
    pub header: Arc<JweHeader>,
}

impl AppState {
    /// Create a new [`AppState`] from a key store and token header template.
    pub fn new(key_store: KeyStore, header: JweHeader) -> Self {
        Self {
            key_store,
            header: Arc::new(header),
        }
    }
}

impl Default for AppState {
    /// Creates an [`AppState`] with no key and an `A128CBC-HS256` header,
    /// suitable for tests.
    fn default() -> Self {
        Self::new(KeyStore::new(), JweHeader::new(AlgorithmSuite::A128CbcHs256))
    }
}
