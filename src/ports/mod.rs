//! # Port Contracts
//!
//! The three pluggable capability interfaces the orchestrator drives (vault
//! accessors, transformation processors, and sink writers) plus the
//! [`CapabilityFactory`] registry that maps a configuration type tag to a
//! concrete implementation.
//!
//! A cancellation token is threaded through every port call so implementations
//! may observe shutdown or timeouts mid-invocation; the orchestrator itself
//! never checks it between items.

use crate::domain::{Defaults, Secret, Sink, Transformation, Vault};
use crate::errors::Result;
use crate::repository::SecretRepository;
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Pulls a single secret from a vault.
#[async_trait]
pub trait VaultAccessor: Send + Sync {
    /// Retrieves `secret` from `vault` and returns the resolved value.
    ///
    /// The returned secret may carry different content and content type than
    /// the declared one; the orchestrator stores it under the declared name
    /// regardless.
    async fn retrieve(
        &self,
        cancel: &CancellationToken,
        defaults: &Defaults,
        vault: &Vault,
        secret: &Secret,
    ) -> Result<Secret>;
}

/// Applies a single transformation to resolved input secrets.
#[async_trait]
pub trait TransformationProcessor: Send + Sync {
    /// Processes the ordered `inputs` and returns the derived secret,
    /// normally named after the transformation's declared output.
    async fn process(
        &self,
        cancel: &CancellationToken,
        defaults: &Defaults,
        inputs: &[Secret],
        transformation: &Transformation,
    ) -> Result<Secret>;
}

/// Writes a resolved secret into a sink.
#[async_trait]
pub trait SinkWriter: Send + Sync {
    /// Writes the raw content of `secret` to the destination declared by
    /// `sink`.
    async fn write(
        &self,
        cancel: &CancellationToken,
        defaults: &Defaults,
        secret: &Secret,
        sink: &Sink,
    ) -> Result<()>;
}

/// Registry mapping configuration type tags to port implementations.
///
/// The three tag enumerations feed the configuration validator; the
/// constructors feed the orchestrator. An unrecognized tag yields `None`,
/// never a silent default; the orchestrator reports it as a distinct
/// [`crate::errors::Error::UnhandledType`] condition.
pub trait CapabilityFactory: Send + Sync {
    /// The vault type tags this factory can produce accessors for.
    fn vault_accessor_types(&self) -> Vec<String>;

    /// Creates a vault accessor for the given type tag.
    fn new_vault_accessor(&self, kind: &str) -> Option<Arc<dyn VaultAccessor>>;

    /// The transformation type tags this factory can produce processors for.
    fn transformation_types(&self) -> Vec<String>;

    /// Creates a transformation processor for the given type tag.
    fn new_transformation(&self, kind: &str) -> Option<Arc<dyn TransformationProcessor>>;

    /// The sink type tags this factory can produce writers for.
    fn sink_types(&self) -> Vec<String>;

    /// Creates a sink writer for the given type tag.
    fn new_sink_writer(&self, kind: &str) -> Option<Arc<dyn SinkWriter>>;

    /// Creates a fresh, empty repository for one orchestration run.
    fn new_repository(&self) -> SecretRepository {
        SecretRepository::new()
    }
}
