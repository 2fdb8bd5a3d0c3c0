//! Configuration loading and validation for the JWE service.
//!
//! All values are read from environment variables at startup. The process will
//! exit with a clear error message if any required variable is missing or invalid.

use std::fmt;

use anyhow::{Context, Result};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use jwe_dir_core::AlgorithmSuite;
use jwe_dir_core::jwe::direct::suite_for_key;
use serde::{Deserialize, Deserializer};
use zeroize::Zeroizing;

/// Validated service configuration.
///
/// The encoded secret is wiped when the configuration is dropped.
#[derive(Deserialize)]
pub struct Config {
    /// base64url (no padding) shared secret used directly as the content key.
    /// **Required.** Its length must match `encryption_method`.
    #[serde(deserialize_with = "deserialize_secret")]
    pub shared_secret: Zeroizing<String>,

    /// Content encryption method for issued tokens. Defaults to the method
    /// whose combined key length matches the secret.
    #[serde(default)]
    pub encryption_method: Option<String>,

    /// Whether issued tokens DEFLATE-compress the payload (`"zip": "DEF"`).
    #[serde(default)]
    pub compress: bool,

    /// Optional `kid` placed in issued token headers.
    #[serde(default)]
    pub key_id: Option<String>,

    /// Port the HTTP server listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn deserialize_secret<'de, D>(deserializer: D) -> std::result::Result<Zeroizing<String>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Zeroizing::new)
}

fn default_listen_port() -> u16 {
    8080
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// The configured encryption method, or the one implied by the key length.
    pub fn suite(&self) -> Result<AlgorithmSuite> {
        match self.encryption_method.as_deref() {
            Some(method) => method
                .parse::<AlgorithmSuite>()
                .with_context(|| format!("ENCRYPTION_METHOD {method} is not supported")),
            None => suite_for_key(&self.secret_bytes()?)
                .context("SHARED_SECRET length does not match any encryption method"),
        }
    }

    /// Decode the shared secret. The returned buffer is wiped on drop.
    pub fn secret_bytes(&self) -> Result<Zeroizing<Vec<u8>>> {
        URL_SAFE_NO_PAD
            .decode(self.shared_secret.trim())
            .map(Zeroizing::new)
            .context("SHARED_SECRET must be base64url without padding")
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        if self.shared_secret.trim().is_empty() {
            anyhow::bail!("SHARED_SECRET is required and must not be empty");
        }
        let suite = self.suite()?;
        let secret = self.secret_bytes()?;
        if secret.len() != suite.combined_key_len() {
            anyhow::bail!(
                "SHARED_SECRET must be {} bits for {suite}, got {} bits",
                suite.combined_key_bits(),
                secret.len() * 8
            );
        }
        if self.listen_port == 0 {
            anyhow::bail!("LISTEN_PORT must be > 0");
        }
        Ok(())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("shared_secret", &"[REDACTED]")
            .field("encryption_method", &self.encryption_method)
            .field("compress", &self.compress)
            .field("key_id", &self.key_id)
            .field("listen_port", &self.listen_port)
            .field("log_level", &self.log_level)
            .finish()
    }
}
