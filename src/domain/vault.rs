//! Vault entity: a named source configuration for secrets.

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// One source for secrets, identified by a backend type tag.
///
/// The `spec` blob is backend-specific; its shape is only known to the
/// concrete vault accessor, which validates it on use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Vault {
    /// Name of the vault, referenced by secrets
    #[validate(length(min = 1, message = "vault name must not be empty"))]
    pub name: String,

    /// Type tag selecting the vault accessor
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "vault type must not be empty"))]
    pub kind: String,

    /// Backend-specific connection details
    #[serde(default)]
    pub spec: serde_json::Value,
}

impl fmt::Display for Vault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vault[name={}, type={}]", self.name, self.kind)
    }
}

/// Searches for a single named vault in a declared list.
pub fn find_vault<'a>(vaults: &'a [Vault], name: &str) -> Option<&'a Vault> {
    vaults.iter().find(|v| v.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vault(name: &str) -> Vault {
        Vault { name: name.to_string(), kind: "file".to_string(), spec: serde_json::Value::Null }
    }

    #[test]
    fn test_find_vault() {
        let vaults = vec![vault("kv1"), vault("kv2")];
        assert_eq!(find_vault(&vaults, "kv2").map(|v| v.name.as_str()), Some("kv2"));
        assert!(find_vault(&vaults, "kv3").is_none());
    }

    #[test]
    fn test_vault_display() {
        assert_eq!(vault("kv1").to_string(), "Vault[name=kv1, type=file]");
    }

    #[test]
    fn test_vault_structural_validation() {
        assert!(vault("kv1").validate().is_ok());
        assert!(vault("").validate().is_err());
    }
}
