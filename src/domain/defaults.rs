//! Opaque cross-cutting defaults passed to every port call.

use serde::{Deserialize, Serialize};

/// Cross-cutting settings valid for some or all other configuration sections.
///
/// The core attaches no meaning to the contents; the bag is handed unchanged
/// to every vault accessor, transformation processor, and sink writer, which
/// interpret the keys they care about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Defaults(serde_json::Map<String, serde_json::Value>);

impl Defaults {
    /// Creates an empty defaults bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a single setting by key.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    /// Returns true if no settings are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_passthrough_lookup() {
        let defaults: Defaults =
            serde_yaml::from_str("base_dir: /var/run/secrets\nverbose: true").unwrap();
        assert_eq!(defaults.get("base_dir").and_then(|v| v.as_str()), Some("/var/run/secrets"));
        assert_eq!(defaults.get("verbose").and_then(|v| v.as_bool()), Some(true));
        assert!(defaults.get("missing").is_none());
    }

    #[test]
    fn test_defaults_empty() {
        assert!(Defaults::new().is_empty());
    }
}
