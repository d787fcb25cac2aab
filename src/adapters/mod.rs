//! # Built-in Adapters
//!
//! Concrete port implementations shipped with the binary, plus the
//! [`BuiltinFactory`] registry that maps configuration type tags onto them.
//!
//! Each adapter owns the schema of its `spec` blob: required keys and type
//! coercion are checked here, on use, with descriptive errors. The core
//! validator only proves the tag is registered.

pub mod env_vault;
pub mod factory;
pub mod file_sink;
pub mod file_vault;
pub mod json_query;
pub mod template;

pub use env_vault::{EnvVault, ENV_VAULT_TYPE};
pub use factory::BuiltinFactory;
pub use file_sink::{FileSink, FILE_SINK_TYPE};
pub use file_vault::{FileVault, FILE_VAULT_TYPE};
pub use json_query::{JsonQueryTransformation, JSON_TRANSFORMATION_TYPE};
pub use template::{TemplateTransformation, TEMPLATE_TRANSFORMATION_TYPE};
