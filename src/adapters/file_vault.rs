//! File-based vault accessor.
//!
//! Reads a key/value document (JSON or YAML) from disk and resolves secrets
//! by name. A file that parses as neither format is treated as the raw secret
//! content verbatim.

use crate::domain::{Defaults, Secret, Vault};
use crate::errors::{Error, PortKind, Result};
use crate::ports::VaultAccessor;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Type tag for the file vault.
pub const FILE_VAULT_TYPE: &str = "file";

/// Vault accessor pulling secrets from a key/value file.
///
/// Spec schema:
///
/// ```yaml
/// vaults:
///   - name: kv1
///     type: file
///     spec:
///       path: /run/secrets/store.json
/// ```
#[derive(Debug, Clone, Default)]
pub struct FileVault;

impl FileVault {
    /// Creates a new file vault accessor.
    pub fn new() -> Self {
        Self
    }

    fn path_from_spec(vault: &Vault) -> Result<&str> {
        vault.spec.get("path").and_then(|v| v.as_str()).ok_or_else(|| {
            Error::port(PortKind::Vault, "must provide a path element for a file vault spec")
        })
    }
}

#[async_trait]
impl VaultAccessor for FileVault {
    async fn retrieve(
        &self,
        cancel: &CancellationToken,
        _defaults: &Defaults,
        vault: &Vault,
        secret: &Secret,
    ) -> Result<Secret> {
        if cancel.is_cancelled() {
            return Err(Error::port(PortKind::Vault, "retrieve cancelled"));
        }

        let path = Self::path_from_spec(vault)?;
        debug!(secret = %secret.name, vault = %vault, path, "reading secret from file vault");
        let raw = tokio::fs::read(path).await?;

        let mut updated = secret.clone();
        updated.raw_content_type = String::new();

        // Prefer a JSON key/value document, then YAML; anything else is the
        // secret content as-is.
        let entries: Option<HashMap<String, String>> = serde_json::from_slice(&raw)
            .ok()
            .or_else(|| serde_yaml::from_slice(&raw).ok());

        match entries {
            Some(entries) => {
                let content = entries.get(&secret.name).ok_or_else(|| {
                    Error::port(
                        PortKind::Vault,
                        format!("unable to find secret {} in vault {}", secret.name, vault.name),
                    )
                })?;
                updated.raw_content = content.clone().into_bytes();
            }
            None => {
                updated.raw_content = raw;
            }
        }

        Ok(updated)
    }
}
