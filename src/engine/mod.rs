//! # Orchestration Engine
//!
//! Drives one pipeline run through three ordered stages: retrieve every
//! declared secret from its vault, apply the declared transformations, and
//! write every sink. Stages never overlap or re-enter, items run strictly in
//! declared order, and the first failure anywhere aborts the whole run. There
//! is no retry, no rollback, and no partial-success reporting.
//!
//! The engine performs no I/O itself; all side effects happen inside the
//! ports obtained from the [`CapabilityFactory`], plus mutation of the
//! run-scoped [`SecretRepository`] threading values between stages.

use crate::config::Config;
use crate::domain::{find_vault, Defaults, Secret, Sink, Transformation, Vault};
use crate::errors::{Error, PortKind, Result};
use crate::ports::CapabilityFactory;
use crate::repository::SecretRepository;
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// The use-case engine executing a validated configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Orchestrator;

impl Orchestrator {
    /// Creates a new orchestrator.
    pub fn new() -> Self {
        Self
    }

    /// Pulls a single secret from a vault and puts it into the repository.
    ///
    /// The accessor may return different content and content type than
    /// declared; the result is stored under the *declared* secret name
    /// regardless.
    pub async fn retrieve_secret(
        &self,
        cancel: &CancellationToken,
        factory: &dyn CapabilityFactory,
        defaults: &Defaults,
        repository: &SecretRepository,
        vault: &Vault,
        secret: &Secret,
    ) -> Result<()> {
        let accessor = factory
            .new_vault_accessor(&vault.kind)
            .ok_or_else(|| Error::unhandled_type(PortKind::Vault, &vault.kind))?;

        debug!(secret = %secret.name, vault = %vault, "retrieving secret");
        let updated = accessor.retrieve(cancel, defaults, vault, secret).await?;

        repository.put(&secret.name, updated);
        Ok(())
    }

    /// Applies a single transformation and puts the result into the
    /// repository under the processor's returned name.
    ///
    /// Every configured secret is re-fetched from the repository first, so a
    /// missing upstream value for *any* declared secret aborts the run, even
    /// one this transformation does not consume.
    ///
    /// The processor is resolved before the inputs are matched: an unknown
    /// transformation type is reported as [`Error::UnhandledType`] even when
    /// an input variable would also have been missing.
    pub async fn transform(
        &self,
        cancel: &CancellationToken,
        factory: &dyn CapabilityFactory,
        defaults: &Defaults,
        repository: &SecretRepository,
        secrets: &[Secret],
        transformation: &Transformation,
    ) -> Result<()> {
        let mut by_name = HashMap::with_capacity(secrets.len());
        for secret in secrets {
            let resolved = repository.get(&secret.name)?;
            by_name.insert(secret.name.clone(), resolved);
        }

        let processor = factory
            .new_transformation(&transformation.kind)
            .ok_or_else(|| Error::unhandled_type(PortKind::Transformation, &transformation.kind))?;

        // Collect the inputs in declared order, matching only against the
        // fetched set of configured secrets.
        let mut inputs = Vec::with_capacity(transformation.input.len());
        for name in &transformation.input {
            let secret =
                by_name.get(name).cloned().ok_or_else(|| Error::variable_not_found(name))?;
            inputs.push(secret);
        }

        debug!(transformation = %transformation, inputs = inputs.len(), "invoking processor");
        let updated = processor.process(cancel, defaults, &inputs, transformation).await?;

        let output_name = updated.name.clone();
        repository.put(output_name, updated);
        Ok(())
    }

    /// Writes a single sink by pulling its variable from the repository.
    pub async fn write_to_sink(
        &self,
        cancel: &CancellationToken,
        factory: &dyn CapabilityFactory,
        defaults: &Defaults,
        repository: &SecretRepository,
        sink: &Sink,
    ) -> Result<()> {
        let secret = repository.get(&sink.var)?;

        let writer = factory
            .new_sink_writer(&sink.kind)
            .ok_or_else(|| Error::unhandled_type(PortKind::Sink, &sink.kind))?;

        debug!(sink = %sink, "writing secret to sink");
        writer.write(cancel, defaults, &secret, sink).await
    }

    /// Runs the full pipeline: pull all secrets, apply transformations,
    /// write all sinks.
    ///
    /// A run needs at least one secret sourced from at least one vault
    /// landing in at least one sink to do anything; otherwise this is a
    /// trivial success without touching any port.
    pub async fn process(
        &self,
        cancel: &CancellationToken,
        factory: &dyn CapabilityFactory,
        defaults: &Defaults,
        vaults: &[Vault],
        secrets: &[Secret],
        transformations: &[Transformation],
        sinks: &[Sink],
    ) -> Result<()> {
        if vaults.is_empty() || secrets.is_empty() || sinks.is_empty() {
            debug!("nothing to process: a run needs vaults, secrets, and sinks");
            return Ok(());
        }

        let repository = factory.new_repository();

        info!(count = secrets.len(), "pulling secrets from vaults");
        for secret in secrets {
            let vault = find_vault(vaults, &secret.vault_name)
                .ok_or_else(|| Error::vault_not_found(&secret.vault_name))?;
            self.retrieve_secret(cancel, factory, defaults, &repository, vault, secret).await?;
        }

        if !transformations.is_empty() {
            info!(count = transformations.len(), "applying transformations");
            for transformation in transformations {
                self.transform(cancel, factory, defaults, &repository, secrets, transformation)
                    .await?;
            }
        }

        info!(count = sinks.len(), "writing secrets to sinks");
        for sink in sinks {
            self.write_to_sink(cancel, factory, defaults, &repository, sink).await?;
        }

        Ok(())
    }

    /// Convenience wrapper running [`Orchestrator::process`] over a parsed
    /// configuration document.
    pub async fn process_config(
        &self,
        cancel: &CancellationToken,
        factory: &dyn CapabilityFactory,
        config: &Config,
    ) -> Result<()> {
        self.process(
            cancel,
            factory,
            &config.defaults,
            &config.vaults,
            &config.secrets,
            &config.transformations,
            &config.sinks,
        )
        .await
    }
}
