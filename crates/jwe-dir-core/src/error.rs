//! Error taxonomy for the AES-CBC + HMAC-SHA2 construct.

use thiserror::Error;

/// Errors produced by the AEAD layer.
///
/// Every variant is terminal for the operation that produced it. None of them
/// carry key bytes, plaintext, or primitive-specific error text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AeadError {
    /// The shared secret does not have the bit length the suite requires.
    #[error("invalid key length: expected {expected_bits} bits, got {actual_bits} bits")]
    KeyLength {
        /// Bit length required by the algorithm suite.
        expected_bits: usize,
        /// Bit length of the supplied secret.
        actual_bits: usize,
    },

    /// The requested algorithm, encryption method or compression is not supported.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The IV handed to the block cipher is not one block long.
    #[error("invalid IV length: expected {expected} bytes, got {actual}")]
    InvalidIv {
        /// Required IV length in bytes.
        expected: usize,
        /// Supplied IV length in bytes.
        actual: usize,
    },

    /// The encryption sub-key is not a 128, 192 or 256 bit AES key.
    #[error("unsupported AES key size: {bits} bits")]
    UnsupportedKeySize {
        /// Bit length of the rejected key.
        bits: usize,
    },

    /// The HMAC primitive could not produce a tag.
    #[error("MAC computation failed")]
    MacComputation,

    /// A length did not fit the 64-bit length field.
    #[error("length overflows 64-bit bit-length field")]
    LengthOverflow,

    /// The IV source could not supply random bytes.
    #[error("randomness unavailable: {0}")]
    RandomnessUnavailable(String),

    /// The authentication tag did not verify.
    #[error("authentication tag mismatch")]
    AuthenticationFailed,

    /// The ciphertext authenticated but could not be decrypted.
    #[error("decryption failed")]
    Decryption,
}

/// Result type for AEAD operations.
pub type Result<T> = std::result::Result<T, AeadError>;
