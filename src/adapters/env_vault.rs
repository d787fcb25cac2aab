//! Environment variable vault accessor.
//!
//! Reads secrets from process environment variables. Intended for development
//! and testing; environment variables are visible in process listings and
//! offer no encryption at rest.

use crate::domain::{Defaults, Secret, Vault};
use crate::errors::{Error, PortKind, Result};
use crate::ports::VaultAccessor;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Type tag for the environment variable vault.
pub const ENV_VAULT_TYPE: &str = "env";

/// Vault accessor resolving a secret from an environment variable.
///
/// The variable name is the secret name uppercased with `-` replaced by `_`,
/// prefixed by the optional `prefix` spec key:
///
/// ```yaml
/// vaults:
///   - name: local
///     type: env
///     spec:
///       prefix: APP_SECRET_
/// ```
///
/// A secret named `db-password` then reads `APP_SECRET_DB_PASSWORD`.
#[derive(Debug, Clone, Default)]
pub struct EnvVault;

impl EnvVault {
    /// Creates a new environment variable vault accessor.
    pub fn new() -> Self {
        Self
    }

    fn env_var_name(prefix: &str, secret_name: &str) -> String {
        format!("{}{}", prefix, secret_name.to_uppercase().replace('-', "_"))
    }
}

#[async_trait]
impl VaultAccessor for EnvVault {
    async fn retrieve(
        &self,
        _cancel: &CancellationToken,
        _defaults: &Defaults,
        vault: &Vault,
        secret: &Secret,
    ) -> Result<Secret> {
        let prefix = vault.spec.get("prefix").and_then(|v| v.as_str()).unwrap_or_default();
        let var = Self::env_var_name(prefix, &secret.name);

        debug!(secret = %secret.name, env_var = %var, "reading secret from environment");
        let value = std::env::var(&var).map_err(|_| {
            Error::port(
                PortKind::Vault,
                format!("environment variable {} is not set or not unicode", var),
            )
        })?;

        let mut updated = secret.clone();
        updated.raw_content = value.into_bytes();
        updated.raw_content_type = "text/plain".to_string();
        Ok(updated)
    }
}
