//! # Observability
//!
//! Structured logging via the tracing ecosystem. Log output goes to stderr so
//! piped secret output (if a sink ever targets stdout) stays clean. Secrets
//! themselves never appear in log records; the domain types redact their
//! content in `Debug` and `Display`.

use crate::errors::{Error, Result};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initializes the global tracing subscriber.
///
/// The filter honors `RUST_LOG` when set; otherwise `verbose` selects between
/// debug-level pipeline logging and warnings only.
pub fn init_tracing(verbose: bool) -> Result<()> {
    let default_directives = if verbose { "secretpipe=debug,info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::config(format!("failed to initialize logging: {}", e)))
}
