//! JWE protected header.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};

use super::{JweError, Result, ALG_DIR, ZIP_DEFLATE};
use crate::error::AeadError;
use crate::suite::AlgorithmSuite;

/// JWE protected header.
///
/// `alg` and `enc` stay strings so that any registered value parses; support
/// is decided when the header is used, not when it is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JweHeader {
    /// Key management algorithm. Only `dir` is supported.
    pub alg: String,
    /// Content encryption method, e.g. `A128CBC-HS256`.
    pub enc: String,
    /// Compression applied before encryption (`DEF`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    /// Media type of the complete JWE.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
    /// Media type of the payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cty: Option<String>,
    /// Key identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    /// Extension parameters the recipient must understand. No extensions are
    /// supported, so a header carrying `crit` is never accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crit: Option<Vec<String>>,
}

impl JweHeader {
    /// A `dir` header for `suite` with no optional parameters.
    pub fn new(suite: AlgorithmSuite) -> Self {
        Self {
            alg: ALG_DIR.into(),
            enc: suite.name().into(),
            zip: None,
            typ: None,
            cty: None,
            kid: None,
            crit: None,
        }
    }

    /// Request DEFLATE compression of the payload.
    pub fn with_deflate(mut self) -> Self {
        self.zip = Some(ZIP_DEFLATE.into());
        self
    }

    /// Set the key identifier.
    pub fn with_kid(mut self, kid: impl Into<String>) -> Self {
        self.kid = Some(kid.into());
        self
    }

    /// Set the payload content type.
    pub fn with_content_type(mut self, cty: impl Into<String>) -> Self {
        self.cty = Some(cty.into());
        self
    }

    /// Resolve `enc` to a supported suite after checking `crit` and `alg`.
    ///
    /// # Errors
    ///
    /// Returns [`JweError::UnsupportedCritical`] if `crit` is present,
    /// [`AeadError::UnsupportedAlgorithm`] for any `alg` other than `dir` and
    /// any `enc` that is not a CBC-HMAC suite.
    pub fn suite(&self) -> Result<AlgorithmSuite> {
        if let Some(crit) = &self.crit {
            return Err(JweError::UnsupportedCritical(crit.clone()));
        }
        if self.alg != ALG_DIR {
            return Err(AeadError::UnsupportedAlgorithm(format!(
                "key management algorithm {} (supported: {ALG_DIR})",
                self.alg
            ))
            .into());
        }
        Ok(self.enc.parse::<AlgorithmSuite>()?)
    }

    /// Whether the payload is DEFLATE-compressed.
    ///
    /// # Errors
    ///
    /// Returns [`AeadError::UnsupportedAlgorithm`] for any `zip` other than `DEF`.
    pub fn deflate(&self) -> Result<bool> {
        match self.zip.as_deref() {
            None => Ok(false),
            Some(ZIP_DEFLATE) => Ok(true),
            Some(other) => Err(AeadError::UnsupportedAlgorithm(format!(
                "compression algorithm {other} (supported: {ZIP_DEFLATE})"
            ))
            .into()),
        }
    }

    /// base64url(JSON) encoding of the header; its ASCII bytes are the AAD.
    pub fn encode(&self) -> Result<String> {
        let json = serde_json::to_vec(self)?;
        Ok(URL_SAFE_NO_PAD.encode(json))
    }

    /// Decode a base64url(JSON) header.
    pub fn decode(encoded: &str) -> Result<Self> {
        let json = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|_| JweError::InvalidFormat("header is not base64url".into()))?;
        Ok(serde_json::from_slice(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_header_is_dir() {
        let h = JweHeader::new(AlgorithmSuite::A128CbcHs256);
        assert_eq!(h.alg, "dir");
        assert_eq!(h.suite().unwrap(), AlgorithmSuite::A128CbcHs256);
        assert!(!h.deflate().unwrap());
    }

    #[test]
    fn optional_fields_are_omitted() {
        let h = JweHeader::new(AlgorithmSuite::A128CbcHs256);
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, r#"{"alg":"dir","enc":"A128CBC-HS256"}"#);
    }

    #[test]
    fn encode_decode_keeps_fields() {
        let h = JweHeader::new(AlgorithmSuite::A256CbcHs512)
            .with_deflate()
            .with_kid("k1")
            .with_content_type("JWT");
        let decoded = JweHeader::decode(&h.encode().unwrap()).unwrap();
        assert_eq!(decoded, h);
    }

    #[test]
    fn rejects_non_dir_alg() {
        let mut h = JweHeader::new(AlgorithmSuite::A128CbcHs256);
        h.alg = "A128KW".into();
        assert!(matches!(
            h.suite(),
            Err(JweError::Aead(AeadError::UnsupportedAlgorithm(_)))
        ));
    }

    #[test]
    fn rejects_gcm_enc() {
        let mut h = JweHeader::new(AlgorithmSuite::A128CbcHs256);
        h.enc = "A256GCM".into();
        assert!(matches!(
            h.suite(),
            Err(JweError::Aead(AeadError::UnsupportedAlgorithm(_)))
        ));
    }

    #[test]
    fn rejects_unknown_zip() {
        let mut h = JweHeader::new(AlgorithmSuite::A128CbcHs256);
        h.zip = Some("GZIP".into());
        assert!(h.deflate().is_err());
    }

    #[test]
    fn critical_extensions_are_rejected() {
        let json = r#"{"alg":"dir","enc":"A128CBC-HS256","crit":["exp"],"exp":1}"#;
        let h = JweHeader::decode(&URL_SAFE_NO_PAD.encode(json)).unwrap();
        assert_eq!(h.crit.as_deref(), Some(&["exp".to_owned()][..]));
        assert!(matches!(
            h.suite(),
            Err(JweError::UnsupportedCritical(ref names)) if names == &["exp"]
        ));

        let mut empty = JweHeader::new(AlgorithmSuite::A128CbcHs256);
        empty.crit = Some(Vec::new());
        assert!(matches!(empty.suite(), Err(JweError::UnsupportedCritical(_))));
    }

    #[test]
    fn decode_rejects_bad_base64() {
        assert!(matches!(
            JweHeader::decode("!!!"),
            Err(JweError::InvalidFormat(_))
        ));
    }
}
