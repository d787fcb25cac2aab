//! Registry of the built-in port implementations.

use crate::adapters::{
    EnvVault, FileSink, FileVault, JsonQueryTransformation, TemplateTransformation,
    ENV_VAULT_TYPE, FILE_SINK_TYPE, FILE_VAULT_TYPE, JSON_TRANSFORMATION_TYPE,
    TEMPLATE_TRANSFORMATION_TYPE,
};
use crate::ports::{CapabilityFactory, SinkWriter, TransformationProcessor, VaultAccessor};
use std::sync::Arc;

/// Capability factory producing all adapters built into the binary.
///
/// Dispatch is an explicit match over the registered type tags; an unknown
/// tag yields `None` so the caller reports it instead of silently defaulting.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinFactory;

impl BuiltinFactory {
    /// Creates the built-in factory.
    pub fn new() -> Self {
        Self
    }
}

impl CapabilityFactory for BuiltinFactory {
    fn vault_accessor_types(&self) -> Vec<String> {
        vec![ENV_VAULT_TYPE.to_string(), FILE_VAULT_TYPE.to_string()]
    }

    fn new_vault_accessor(&self, kind: &str) -> Option<Arc<dyn VaultAccessor>> {
        match kind {
            ENV_VAULT_TYPE => Some(Arc::new(EnvVault::new())),
            FILE_VAULT_TYPE => Some(Arc::new(FileVault::new())),
            _ => None,
        }
    }

    fn transformation_types(&self) -> Vec<String> {
        vec![TEMPLATE_TRANSFORMATION_TYPE.to_string(), JSON_TRANSFORMATION_TYPE.to_string()]
    }

    fn new_transformation(&self, kind: &str) -> Option<Arc<dyn TransformationProcessor>> {
        match kind {
            TEMPLATE_TRANSFORMATION_TYPE => Some(Arc::new(TemplateTransformation::new())),
            JSON_TRANSFORMATION_TYPE => Some(Arc::new(JsonQueryTransformation::new())),
            _ => None,
        }
    }

    fn sink_types(&self) -> Vec<String> {
        vec![FILE_SINK_TYPE.to_string()]
    }

    fn new_sink_writer(&self, kind: &str) -> Option<Arc<dyn SinkWriter>> {
        match kind {
            FILE_SINK_TYPE => Some(Arc::new(FileSink::new())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_enumerated_type_constructs() {
        let factory = BuiltinFactory::new();

        for kind in factory.vault_accessor_types() {
            assert!(factory.new_vault_accessor(&kind).is_some(), "vault type {}", kind);
        }
        for kind in factory.transformation_types() {
            assert!(factory.new_transformation(&kind).is_some(), "transformation type {}", kind);
        }
        for kind in factory.sink_types() {
            assert!(factory.new_sink_writer(&kind).is_some(), "sink type {}", kind);
        }
    }

    #[test]
    fn test_unknown_tags_yield_none() {
        let factory = BuiltinFactory::new();
        assert!(factory.new_vault_accessor("s3").is_none());
        assert!(factory.new_transformation("rot13").is_none());
        assert!(factory.new_sink_writer("stdout").is_none());
    }

    #[test]
    fn test_fresh_repository_is_empty() {
        let factory = BuiltinFactory::new();
        assert!(factory.new_repository().is_empty());
    }
}
