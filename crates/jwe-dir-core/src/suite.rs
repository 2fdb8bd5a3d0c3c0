//! The closed set of AES-CBC + HMAC-SHA2 content encryption suites (RFC 7518 §5.2).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AeadError;

/// Hash function backing the HMAC of a suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashFunction {
    /// SHA-256 (32-byte output).
    Sha256,
    /// SHA-384 (48-byte output).
    Sha384,
    /// SHA-512 (64-byte output).
    Sha512,
}

impl HashFunction {
    /// Native output length of the hash in bytes.
    pub const fn output_len(self) -> usize {
        match self {
            HashFunction::Sha256 => 32,
            HashFunction::Sha384 => 48,
            HashFunction::Sha512 => 64,
        }
    }
}

/// An AES-CBC + HMAC-SHA2 algorithm suite.
///
/// Each suite fixes the combined key length, the hash function and the
/// truncated tag length. The combined key is split in half: the first half
/// keys the HMAC, the second half keys AES.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlgorithmSuite {
    /// 256-bit key: AES-128-CBC + HMAC-SHA-256 truncated to 128 bits.
    #[serde(rename = "A128CBC-HS256")]
    A128CbcHs256,
    /// 384-bit key: AES-192-CBC + HMAC-SHA-384 truncated to 192 bits.
    #[serde(rename = "A192CBC-HS384")]
    A192CbcHs384,
    /// 512-bit key: AES-256-CBC + HMAC-SHA-512 truncated to 256 bits.
    #[serde(rename = "A256CBC-HS512")]
    A256CbcHs512,
}

impl AlgorithmSuite {
    /// Every supported suite.
    pub const ALL: [AlgorithmSuite; 3] = [
        AlgorithmSuite::A128CbcHs256,
        AlgorithmSuite::A192CbcHs384,
        AlgorithmSuite::A256CbcHs512,
    ];

    /// JOSE `enc` name of the suite.
    pub const fn name(self) -> &'static str {
        match self {
            AlgorithmSuite::A128CbcHs256 => "A128CBC-HS256",
            AlgorithmSuite::A192CbcHs384 => "A192CBC-HS384",
            AlgorithmSuite::A256CbcHs512 => "A256CBC-HS512",
        }
    }

    /// Required bit length of the shared secret.
    pub const fn combined_key_bits(self) -> usize {
        match self {
            AlgorithmSuite::A128CbcHs256 => 256,
            AlgorithmSuite::A192CbcHs384 => 384,
            AlgorithmSuite::A256CbcHs512 => 512,
        }
    }

    /// Required byte length of the shared secret.
    pub const fn combined_key_len(self) -> usize {
        self.combined_key_bits() / 8
    }

    /// Byte length of the MAC sub-key (first half of the secret).
    pub const fn mac_key_len(self) -> usize {
        self.combined_key_len() / 2
    }

    /// Byte length of the AES sub-key (second half of the secret).
    pub const fn enc_key_len(self) -> usize {
        self.combined_key_len() / 2
    }

    /// Bit length of the truncated authentication tag.
    pub const fn truncated_tag_bits(self) -> usize {
        match self {
            AlgorithmSuite::A128CbcHs256 => 128,
            AlgorithmSuite::A192CbcHs384 => 192,
            AlgorithmSuite::A256CbcHs512 => 256,
        }
    }

    /// Byte length of the truncated authentication tag.
    pub const fn truncated_tag_len(self) -> usize {
        self.truncated_tag_bits() / 8
    }

    /// Hash function used for the HMAC.
    pub const fn hash(self) -> HashFunction {
        match self {
            AlgorithmSuite::A128CbcHs256 => HashFunction::Sha256,
            AlgorithmSuite::A192CbcHs384 => HashFunction::Sha384,
            AlgorithmSuite::A256CbcHs512 => HashFunction::Sha512,
        }
    }
}

impl fmt::Display for AlgorithmSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlgorithmSuite {
    type Err = AeadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AlgorithmSuite::ALL
            .into_iter()
            .find(|suite| suite.name() == s)
            .ok_or_else(|| {
                AeadError::UnsupportedAlgorithm(format!(
                    "encryption method {s} (supported: A128CBC-HS256, A192CBC-HS384, A256CBC-HS512)"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_halves_add_up() {
        for suite in AlgorithmSuite::ALL {
            assert_eq!(
                suite.mac_key_len() + suite.enc_key_len(),
                suite.combined_key_len()
            );
        }
    }

    #[test]
    fn tag_is_half_of_combined_key() {
        for suite in AlgorithmSuite::ALL {
            assert_eq!(suite.truncated_tag_bits() * 2, suite.combined_key_bits());
            assert!(suite.truncated_tag_len() <= suite.hash().output_len());
        }
    }

    #[test]
    fn a128_parameters() {
        let s = AlgorithmSuite::A128CbcHs256;
        assert_eq!(s.combined_key_len(), 32);
        assert_eq!(s.enc_key_len(), 16);
        assert_eq!(s.truncated_tag_len(), 16);
        assert_eq!(s.hash(), HashFunction::Sha256);
    }

    #[test]
    fn parse_round_trips_name() {
        for suite in AlgorithmSuite::ALL {
            assert_eq!(suite.name().parse::<AlgorithmSuite>().unwrap(), suite);
        }
    }

    #[test]
    fn gcm_is_rejected() {
        let err = "A256GCM".parse::<AlgorithmSuite>().unwrap_err();
        assert!(matches!(err, AeadError::UnsupportedAlgorithm(_)));
    }

    #[test]
    fn serde_uses_jose_name() {
        let json = serde_json::to_string(&AlgorithmSuite::A192CbcHs384).unwrap();
        assert_eq!(json, "\"A192CBC-HS384\"");
    }
}
