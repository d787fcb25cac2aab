//! # secretpipe
//!
//! A config-driven pipeline that pulls named secrets from pluggable backing
//! stores ("vaults"), optionally applies a declared sequence of
//! transformations, and writes the results to pluggable output destinations
//! ("sinks"). A single declarative YAML document drives the whole run.
//!
//! ## Architecture
//!
//! The crate follows a ports-and-adapters layout:
//!
//! ```text
//! Config (YAML) → Validator (gate) → Orchestrator
//!                                       ├─ VaultAccessor ──┐
//!                                       ├─ TransformationProcessor ─ Repository
//!                                       └─ SinkWriter ─────┘
//! ```
//!
//! - [`domain`]: plain entity definitions for vaults, secrets,
//!   transformations, sinks, and the opaque cross-cutting defaults.
//! - [`ports`]: the three capability traits the engine drives, plus the
//!   [`ports::CapabilityFactory`] registry mapping type tags to them.
//! - [`validation`]: proves a configuration is executable (structural and
//!   referential integrity) before any I/O occurs.
//! - [`repository`]: the run-scoped variable store threading resolved values
//!   between stages.
//! - [`engine`]: the orchestrator, running retrieve, transform, and write in
//!   declared order and failing fast on the first error.
//! - [`adapters`]: built-in port implementations and their registry.
//!
//! ## Example
//!
//! ```rust,no_run
//! use secretpipe::{validation, BuiltinFactory, Config, Orchestrator, Result};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::from_file("pipeline.yaml", false)?;
//!     let factory = BuiltinFactory::new();
//!     validation::validate(&config, &factory)?;
//!
//!     let cancel = CancellationToken::new();
//!     Orchestrator::new().process_config(&cancel, &factory, &config).await
//! }
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod observability;
pub mod ports;
pub mod repository;
pub mod validation;

// Re-export commonly used types and traits
pub use adapters::BuiltinFactory;
pub use config::Config;
pub use engine::Orchestrator;
pub use errors::{Error, PortKind, Result};
pub use ports::{CapabilityFactory, SinkWriter, TransformationProcessor, VaultAccessor};
pub use repository::SecretRepository;

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
