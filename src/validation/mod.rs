//! # Configuration Validation
//!
//! Proves that a parsed [`Config`] is executable against a given
//! [`CapabilityFactory`] before any I/O occurs: a structural pass over
//! required fields (via the `validator` derives on the domain entities) and a
//! referential pass over type tags and variable names.
//!
//! Validation fails fast on the first violation in document order; errors are
//! not aggregated. Definedness of a variable is a set-membership check over
//! the whole document, not a declaration-order check; see
//! [`Config::is_var_defined`].

use crate::config::Config;
use crate::errors::{Error, Result};
use crate::ports::CapabilityFactory;
use std::collections::HashSet;
use validator::Validate;

/// Validates `config` against the capabilities of `factory`.
///
/// Passes iff every entity is structurally complete, every type tag is one
/// the factory enumerates, every secret's vault resolves, and every
/// transformation input and sink variable is defined within the document.
pub fn validate(config: &Config, factory: &dyn CapabilityFactory) -> Result<()> {
    validate_vaults(config, factory)?;
    validate_secrets(config)?;
    validate_transformations(config, factory)?;
    validate_sinks(config, factory)?;
    Ok(())
}

fn validate_vaults(config: &Config, factory: &dyn CapabilityFactory) -> Result<()> {
    let known: HashSet<String> = factory.vault_accessor_types().into_iter().collect();

    for vault in &config.vaults {
        vault.validate()?;
        if !known.contains(&vault.kind) {
            return Err(Error::validation(format!(
                "unknown vault type: {} in vault: {}",
                vault.kind, vault.name
            )));
        }
    }
    Ok(())
}

fn validate_secrets(config: &Config) -> Result<()> {
    for secret in &config.secrets {
        secret.validate()?;
        if config.vault(&secret.vault_name).is_none() {
            return Err(Error::validation(format!(
                "invalid vault {} referenced in secret {}",
                secret.vault_name, secret.name
            )));
        }
    }
    Ok(())
}

fn validate_transformations(config: &Config, factory: &dyn CapabilityFactory) -> Result<()> {
    let known: HashSet<String> = factory.transformation_types().into_iter().collect();

    for transformation in &config.transformations {
        transformation.validate()?;
        if !known.contains(&transformation.kind) {
            return Err(Error::validation(format!(
                "unknown transformation type: {}",
                transformation.kind
            )));
        }
        for input in &transformation.input {
            if !config.is_var_defined(input) {
                return Err(Error::validation(format!("unknown input variable: {}", input)));
            }
        }
    }
    Ok(())
}

fn validate_sinks(config: &Config, factory: &dyn CapabilityFactory) -> Result<()> {
    let known: HashSet<String> = factory.sink_types().into_iter().collect();

    for sink in &config.sinks {
        sink.validate()?;
        if !known.contains(&sink.kind) {
            return Err(Error::validation(format!("unknown sink type: {}", sink.kind)));
        }
        if !config.is_var_defined(&sink.var) {
            return Err(Error::validation(format!(
                "invalid variable {} referenced in a sink",
                sink.var
            )));
        }
    }
    Ok(())
}
