//! Shared content key loading and storage.
//!
//! # Lifecycle
//!
//! 1. At startup, [`load`] decodes `SHARED_SECRET` and seeds the [`KeyStore`].
//! 2. The key lives only in process memory behind an `Arc<RwLock<_>>`.
//! 3. Handlers borrow it via [`KeyStore::current`], which clones the bytes into
//!    a buffer that is zeroed on drop.
//!
//! # Security invariants
//!
//! - The key is **never** written to disk, logged, or included in traces.

pub mod store;

pub use store::KeyStore;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;

/// Decode the configured shared secret and store it in `store`.
///
/// # Errors
///
/// Returns an error if the secret cannot be decoded or has an unsupported length.
pub async fn load(cfg: &Config, store: &KeyStore) -> Result<()> {
    let secret = cfg.secret_bytes()?;
    let suite = cfg.suite()?;
    store
        .store(&secret)
        .await
        .context("failed to store shared key")?;

    info!(
        enc = %suite,
        key_bits = secret.len() * 8,
        "shared key loaded"
    );
    Ok(())
}
