//! # Error Handling
//!
//! This module provides error handling for secretpipe. It defines one custom
//! error type using `thiserror`, covering configuration loading, validation,
//! repository lookups, and failures surfaced from port implementations.

use std::fmt;

/// Custom result type for secretpipe operations
pub type Result<T> = std::result::Result<T, Error>;

/// The category of port a type tag was dispatched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortKind {
    /// Vault accessors pulling secrets from backing stores
    Vault,
    /// Transformation processors producing derived variables
    Transformation,
    /// Sink writers emitting resolved variables
    Sink,
}

impl fmt::Display for PortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortKind::Vault => write!(f, "vault accessor"),
            PortKind::Transformation => write!(f, "transformation"),
            PortKind::Sink => write!(f, "sink writer"),
        }
    }
}

/// Main error type for secretpipe
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Configuration loading errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Structural or referential validation errors
    #[error("validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// A repository lookup missed; carries the requested variable name
    #[error("no such variable: {name}")]
    VariableNotFound { name: String },

    /// A secret referenced a vault name that is not declared
    #[error("no such vault: {name}")]
    VaultNotFound { name: String },

    /// The factory produced no port for a declared, validated type tag
    #[error("internal error: no {kind} registered for type '{tag}'")]
    UnhandledType { kind: PortKind, tag: String },

    /// Failures surfaced verbatim from a port implementation
    #[error("{kind} error: {message}")]
    Port {
        kind: PortKind,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation { message: message.into(), field: None }
    }

    /// Create a validation error with field information
    pub fn validation_field<S: Into<String>, F: Into<String>>(message: S, field: F) -> Self {
        Self::Validation { message: message.into(), field: Some(field.into()) }
    }

    /// Create a variable-not-found error
    pub fn variable_not_found<S: Into<String>>(name: S) -> Self {
        Self::VariableNotFound { name: name.into() }
    }

    /// Create a vault-not-found error
    pub fn vault_not_found<S: Into<String>>(name: S) -> Self {
        Self::VaultNotFound { name: name.into() }
    }

    /// Create an unhandled-type error for a factory miss
    pub fn unhandled_type<S: Into<String>>(kind: PortKind, tag: S) -> Self {
        Self::UnhandledType { kind, tag: tag.into() }
    }

    /// Create a port error
    pub fn port<S: Into<String>>(kind: PortKind, message: S) -> Self {
        Self::Port { kind, message: message.into(), source: None }
    }

    /// Create a port error wrapping an underlying cause
    pub fn port_with_source<S: Into<String>>(
        kind: PortKind,
        message: S,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Port { kind, message: message.into(), source: Some(source) }
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .iter()
            .map(|(field, field_errors)| {
                let reasons: Vec<String> = field_errors
                    .iter()
                    .map(|e| {
                        e.message.as_ref().map_or_else(|| e.code.to_string(), |m| m.to_string())
                    })
                    .collect();
                format!("{}: {}", field, reasons.join(", "))
            })
            .collect::<Vec<_>>()
            .join("; ");

        Self::validation(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = Error::variable_not_found("db-password");
        assert_eq!(error.to_string(), "no such variable: db-password");

        let error = Error::vault_not_found("kv1");
        assert_eq!(error.to_string(), "no such vault: kv1");

        let error = Error::unhandled_type(PortKind::Sink, "s3");
        assert_eq!(error.to_string(), "internal error: no sink writer registered for type 's3'");
    }

    #[test]
    fn test_validation_error_field() {
        let error = Error::validation_field("must not be empty", "name");
        assert!(matches!(error, Error::Validation { field: Some(ref f), .. } if f == "name"));
    }

    #[test]
    fn test_unhandled_type_distinct_from_port_error() {
        let unhandled = Error::unhandled_type(PortKind::Vault, "mock");
        let port = Error::port(PortKind::Vault, "connection refused");
        assert!(matches!(unhandled, Error::UnhandledType { .. }));
        assert!(matches!(port, Error::Port { .. }));
    }

    #[test]
    fn test_io_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: Error = io_error.into();
        assert!(matches!(error, Error::Io(_)));
    }
}
