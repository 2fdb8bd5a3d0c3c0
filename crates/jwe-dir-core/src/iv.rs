//! Source of fresh initialisation vectors.

use crate::error::{AeadError, Result};

/// A cryptographically secure source of random bytes.
///
/// Implementations must never repeat output across calls with more than
/// negligible probability and must fail rather than fall back to a weaker
/// generator.
#[cfg_attr(test, mockall::automock)]
pub trait IvSource: Send + Sync {
    /// Return `len` fresh random bytes.
    fn next_bytes(&self, len: usize) -> Result<Vec<u8>>;
}

/// IV source backed by the operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsIvSource;

impl IvSource for OsIvSource {
    fn next_bytes(&self, len: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        getrandom::fill(&mut buf).map_err(|e| AeadError::RandomnessUnavailable(e.to_string()))?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn returns_requested_length() {
        assert_eq!(OsIvSource.next_bytes(16).unwrap().len(), 16);
        assert!(OsIvSource.next_bytes(0).unwrap().is_empty());
    }

    #[test]
    fn consecutive_ivs_are_distinct() {
        let ivs: HashSet<Vec<u8>> = (0..1000)
            .map(|_| OsIvSource.next_bytes(16).unwrap())
            .collect();
        assert_eq!(ivs.len(), 1000);
    }
}
