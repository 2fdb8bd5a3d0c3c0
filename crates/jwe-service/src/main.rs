//! `jwe-service` binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise structured logging.
//! 3. Decode the shared secret and seed [`KeyStore`].
//! 4. Build the token header template.
//! 5. Drop the configuration, then build the Axum router and start the HTTP server.

mod config;
mod key;
mod server;
mod telemetry;

use anyhow::Result;
use jwe_dir_core::jwe::JweHeader;
use tracing::info;

use config::Config;
use key::KeyStore;
use server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(&cfg.log_level)?;
    let suite = cfg.suite()?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        listen_port = cfg.listen_port,
        enc = %suite,
        compress = cfg.compress,
        "jwe-service starting"
    );

    // -----------------------------------------------------------------------
    // 3. Shared key
    // -----------------------------------------------------------------------
    let key_store = KeyStore::new();
    key::load(&cfg, &key_store).await?;

    // -----------------------------------------------------------------------
    // 4. Token header
    // -----------------------------------------------------------------------
    let mut header = JweHeader::new(suite);
    if cfg.compress {
        header = header.with_deflate();
    }
    if let Some(kid) = &cfg.key_id {
        header = header.with_kid(kid.as_str());
    }

    // -----------------------------------------------------------------------
    // 5. HTTP server
    // -----------------------------------------------------------------------
    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.listen_port).into();
    // The key now lives only in the store; wipe the encoded copy.
    drop(cfg);

    let state = AppState::new(key_store, header);
    let router = server::router::build(state);

    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
