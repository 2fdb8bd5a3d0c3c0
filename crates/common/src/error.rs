//! Common error types shared across crates.

use jwe_dir_core::jwe::JweError;
use jwe_dir_core::AeadError;
use thiserror::Error;

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::BadRequest`] → 400
/// - [`ServiceError::InvalidToken`] → 400
/// - [`ServiceError::EncryptionFailure`] → 500
/// - [`ServiceError::Unavailable`] → 503
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request was malformed: invalid JSON, non-UTF-8 payload, or an unparseable token.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The token did not authenticate under the service key.
    ///
    /// Deliberately carries no detail so that callers cannot tell tag, padding
    /// and key mismatches apart.
    #[error("invalid token")]
    InvalidToken,

    /// Encryption failed due to a crypto-layer error.
    #[error("encryption failure: {0}")]
    EncryptionFailure(String),

    /// The shared key is not loaded.
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) | ServiceError::InvalidToken => 400,
            ServiceError::EncryptionFailure(_) => 500,
            ServiceError::Unavailable(_) => 503,
        }
    }

    /// Short machine-readable error code for [`crate::protocol::ErrorResponse`].
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::BadRequest(_) => "bad_request",
            ServiceError::InvalidToken => "invalid_token",
            ServiceError::EncryptionFailure(_) => "encryption_failure",
            ServiceError::Unavailable(_) => "service_unavailable",
        }
    }
}

impl From<JweError> for ServiceError {
    /// Classify a token-layer failure.
    ///
    /// Authentication, key-length and decryption failures all become
    /// [`ServiceError::InvalidToken`]; only format problems echo a reason.
    fn from(err: JweError) -> Self {
        match err {
            JweError::InvalidFormat(msg) => ServiceError::BadRequest(msg),
            JweError::Header(_) => ServiceError::BadRequest("invalid JWE header".into()),
            JweError::UnsupportedCritical(names) => ServiceError::BadRequest(format!(
                "unsupported critical header parameters: {}",
                names.join(", ")
            )),
            JweError::Aead(AeadError::UnsupportedAlgorithm(msg)) => ServiceError::BadRequest(msg),
            JweError::Aead(
                AeadError::AuthenticationFailed
                | AeadError::Decryption
                | AeadError::KeyLength { .. }
                | AeadError::InvalidIv { .. },
            )
            | JweError::Compression(_) => ServiceError::InvalidToken,
            JweError::Aead(AeadError::RandomnessUnavailable(_)) => {
                ServiceError::Unavailable("randomness source unavailable".into())
            }
            other => ServiceError::EncryptionFailure(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_codes() {
        assert_eq!(ServiceError::BadRequest("x".into()).http_status(), 400);
        assert_eq!(ServiceError::InvalidToken.http_status(), 400);
        assert_eq!(
            ServiceError::EncryptionFailure("x".into()).http_status(),
            500
        );
        assert_eq!(ServiceError::Unavailable("x".into()).http_status(), 503);
    }

    #[test]
    fn display_includes_message() {
        let e = ServiceError::BadRequest("token must have 5 parts".into());
        assert!(e.to_string().contains("token must have 5 parts"));
    }

    #[test]
    fn authentication_failure_is_opaque() {
        let e = ServiceError::from(JweError::Aead(AeadError::AuthenticationFailed));
        assert!(matches!(e, ServiceError::InvalidToken));
        assert_eq!(e.code(), "invalid_token");

        let e = ServiceError::from(JweError::Aead(AeadError::KeyLength {
            expected_bits: 512,
            actual_bits: 256,
        }));
        assert_eq!(e.to_string(), "invalid token");
    }

    #[test]
    fn unsupported_algorithm_is_bad_request() {
        let e = ServiceError::from(JweError::Aead(AeadError::UnsupportedAlgorithm(
            "A256GCM".into(),
        )));
        assert_eq!(e.http_status(), 400);
    }

    #[test]
    fn critical_header_is_bad_request() {
        let e = ServiceError::from(JweError::UnsupportedCritical(vec!["exp".into()]));
        assert_eq!(e.http_status(), 400);
        assert!(e.to_string().contains("exp"));
    }

    #[test]
    fn randomness_failure_is_unavailable() {
        let e = ServiceError::from(JweError::Aead(AeadError::RandomnessUnavailable(
            "entropy".into(),
        )));
        assert_eq!(e.http_status(), 503);
    }
}
