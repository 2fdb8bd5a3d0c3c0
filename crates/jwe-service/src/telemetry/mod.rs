//! Structured logging setup.
//!
//! # Telemetry invariants
//!
//! - **No key material or payloads** may appear in any span attribute or log field.
//!   Only the content encryption method, lengths and error classes are recorded.
//! - Log level is configurable via `LOG_LEVEL` (default: `info`); `RUST_LOG`
//!   takes precedence when set.

pub mod init;

pub use init::init_telemetry;
