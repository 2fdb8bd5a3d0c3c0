//! Request and response types exchanged with `jwe-service`.
//!
//! All bodies are JSON.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

// ---------------------------------------------------------------------------
// Encrypt endpoint
// ---------------------------------------------------------------------------

/// Request body for `POST /encrypt`. The payload is wiped on drop.
#[derive(Debug, Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct EncryptRequest {
    /// UTF-8 payload to encrypt.
    pub payload: String,
}

/// Successful response body for `POST /encrypt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptResponse {
    /// Compact-serialised JWE.
    pub token: String,
}

// ---------------------------------------------------------------------------
// Decrypt endpoint
// ---------------------------------------------------------------------------

/// Request body for `POST /decrypt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecryptRequest {
    /// Compact-serialised JWE issued with the service key.
    pub token: String,
}

/// Successful response body for `POST /decrypt`. The payload is wiped on drop.
#[derive(Debug, Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct DecryptResponse {
    /// Decrypted UTF-8 payload.
    pub payload: String,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"bad_request"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&crate::ServiceError> for ErrorResponse {
    fn from(err: &crate::ServiceError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status: `"ok"` or `"degraded"`.
    pub status: String,
    /// Whether the shared key is loaded.
    pub key_ready: bool,
    /// Content encryption method used for issued tokens.
    pub enc: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ServiceError;

    #[test]
    fn encrypt_request_round_trip() {
        let req = EncryptRequest {
            payload: "hello".into(),
        };
        let json = serde_json::to_string(&req).unwrap();
        let decoded: EncryptRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.payload, "hello");
    }

    #[test]
    fn decrypt_response_zeroize_clears_payload() {
        let mut resp = DecryptResponse {
            payload: "Live long and prosper.".into(),
        };
        resp.zeroize();
        assert!(resp.payload.is_empty());
    }

    #[test]
    fn decrypt_request_requires_token() {
        assert!(serde_json::from_str::<DecryptRequest>(r#"{"payload":"x"}"#).is_err());
    }

    #[test]
    fn error_response_from_service_error() {
        let e = ErrorResponse::from(&ServiceError::InvalidToken);
        assert_eq!(e.code, "invalid_token");
        assert_eq!(e.message, "invalid token");
    }

    #[test]
    fn health_response_serde() {
        let h = HealthResponse {
            status: "ok".into(),
            key_ready: true,
            enc: "A128CBC-HS256".into(),
        };
        let json = serde_json::to_string(&h).unwrap();
        let decoded: HealthResponse = serde_json::from_str(&json).unwrap();
        assert!(decoded.key_ready);
        assert_eq!(decoded.enc, "A128CBC-HS256");
    }
}
