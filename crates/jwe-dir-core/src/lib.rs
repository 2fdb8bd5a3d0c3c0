//! AES-CBC + HMAC-SHA2 authenticated encryption (RFC 7518 §5.2) and direct-key JWE.
//!
//! The core is a stateless encrypt-then-MAC pipeline:
//!
//! ```text
//! secret ──split──▶ mac_key ─────────────────────────┐
//!        └────────▶ enc_key ─▶ AES-CBC(iv, plaintext) ─▶ ciphertext
//!                                                      ▼
//!            HMAC(mac_key, aad ‖ iv ‖ ciphertext ‖ AL)[..tag_len] ─▶ tag
//! ```
//!
//! [`coordinator`] wires the stages together; [`jwe`] wraps the result in the
//! JWE compact serialisation with `"alg": "dir"`.
//!
//! # Security invariants
//!
//! - Key length is validated against the suite before any primitive runs.
//! - Derived sub-keys and decrypted plaintext are zeroized on drop.
//! - Tags are compared in constant time and verified before decryption.
//! - No key material or plaintext is ever logged or put in an error.

pub mod cbc;
pub mod coordinator;
pub mod error;
pub mod iv;
pub mod jwe;
pub mod key;
pub mod mac;
pub mod suite;

pub use coordinator::{decrypt, encrypt, encrypt_with_os_iv, AeadCoordinator, EncryptionResult};
pub use error::AeadError;
pub use iv::{IvSource, OsIvSource};
pub use key::CompositeKey;
pub use suite::{AlgorithmSuite, HashFunction};
