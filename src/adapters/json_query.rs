//! JSON extraction transformation processor.
//!
//! Extracts a value from JSON-typed input via an RFC 6901 JSON pointer,
//! producing a new derived variable.

use crate::domain::{Defaults, Secret, Transformation};
use crate::errors::{Error, PortKind, Result};
use crate::ports::TransformationProcessor;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Type tag for the JSON extraction transformation.
pub const JSON_TRANSFORMATION_TYPE: &str = "json";

/// Transformation processor extracting a value from JSON input.
///
/// The raw contents of all inputs are concatenated and parsed as one JSON
/// document, then queried with the `pointer` spec key. With `raw: true` a
/// string result is emitted without quoting as `text/plain`; otherwise the
/// result is re-serialized as JSON.
///
/// Spec schema:
///
/// ```yaml
/// transformations:
///   - in: [service-account]
///     out: private-key
///     type: json
///     spec:
///       pointer: /credentials/private_key
///       raw: true
///       content_type: application/x-pem-file   # optional
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonQueryTransformation;

impl JsonQueryTransformation {
    /// Creates a new JSON extraction processor.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TransformationProcessor for JsonQueryTransformation {
    async fn process(
        &self,
        _cancel: &CancellationToken,
        _defaults: &Defaults,
        inputs: &[Secret],
        transformation: &Transformation,
    ) -> Result<Secret> {
        let pointer =
            transformation.spec.get("pointer").and_then(|v| v.as_str()).ok_or_else(|| {
                Error::port(
                    PortKind::Transformation,
                    "pointer element is required in spec of json transformation",
                )
            })?;
        let raw = transformation.spec.get("raw").and_then(|v| v.as_bool()).unwrap_or(false);

        let mut buffer = Vec::new();
        for input in inputs {
            buffer.extend_from_slice(&input.raw_content);
        }
        let document: serde_json::Value = serde_json::from_slice(&buffer)?;

        debug!(transformation = %transformation, pointer, raw, "extracting from json input");
        let value = document.pointer(pointer).ok_or_else(|| {
            Error::port(PortKind::Transformation, format!("no value at json pointer {}", pointer))
        })?;

        let (content, content_type) = if raw {
            let text = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (text.into_bytes(), "text/plain")
        } else {
            (serde_json::to_vec(value)?, "application/json")
        };

        let content_type = transformation
            .spec
            .get("content_type")
            .and_then(|v| v.as_str())
            .unwrap_or(content_type);

        Ok(Secret {
            name: transformation.output.clone(),
            vault_name: String::new(),
            kind: "transformed-by:json".to_string(),
            raw_content: content,
            raw_content_type: content_type.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(content: &str) -> Secret {
        let mut secret = Secret::declared("service-account", "kv1");
        secret.raw_content = content.as_bytes().to_vec();
        secret
    }

    fn transformation(spec: serde_json::Value) -> Transformation {
        Transformation {
            input: vec!["service-account".to_string()],
            output: "private-key".to_string(),
            kind: JSON_TRANSFORMATION_TYPE.to_string(),
            spec,
        }
    }

    async fn process(spec: serde_json::Value, content: &str) -> Result<Secret> {
        JsonQueryTransformation::new()
            .process(
                &CancellationToken::new(),
                &Defaults::new(),
                &[input(content)],
                &transformation(spec),
            )
            .await
    }

    #[tokio::test]
    async fn test_raw_string_extraction() {
        let result = process(
            serde_json::json!({ "pointer": "/credentials/key", "raw": true }),
            r#"{"credentials": {"key": "s3cr3t"}}"#,
        )
        .await
        .unwrap();

        assert_eq!(result.raw_content, b"s3cr3t");
        assert_eq!(result.raw_content_type, "text/plain");
        assert_eq!(result.name, "private-key");
    }

    #[tokio::test]
    async fn test_json_extraction_reserializes() {
        let result = process(
            serde_json::json!({ "pointer": "/credentials" }),
            r#"{"credentials": {"key": "s3cr3t"}}"#,
        )
        .await
        .unwrap();

        assert_eq!(result.raw_content, br#"{"key":"s3cr3t"}"#);
        assert_eq!(result.raw_content_type, "application/json");
    }

    #[tokio::test]
    async fn test_content_type_override() {
        let result = process(
            serde_json::json!({ "pointer": "/key", "raw": true, "content_type": "text/x-token" }),
            r#"{"key": "v"}"#,
        )
        .await
        .unwrap();
        assert_eq!(result.raw_content_type, "text/x-token");
    }

    #[tokio::test]
    async fn test_missing_pointer_target_fails() {
        let err = process(serde_json::json!({ "pointer": "/nope" }), r#"{"key": "v"}"#)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no value at json pointer /nope"));
    }

    #[tokio::test]
    async fn test_invalid_json_input_fails() {
        let err =
            process(serde_json::json!({ "pointer": "/key" }), "not json at all").await.unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[tokio::test]
    async fn test_missing_pointer_element_fails() {
        let err = process(serde_json::json!({}), r#"{}"#).await.unwrap_err();
        assert!(err.to_string().contains("pointer element is required"));
    }
}
