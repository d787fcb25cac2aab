//! Template transformation processor.
//!
//! Renders a declared template with the transformation's inputs bound by
//! variable name, producing a new derived variable.

use crate::domain::{Defaults, Secret, Transformation};
use crate::errors::{Error, PortKind, Result};
use crate::ports::TransformationProcessor;
use async_trait::async_trait;
use minijinja::Environment;
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Type tag for the template transformation.
pub const TEMPLATE_TRANSFORMATION_TYPE: &str = "template";

const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// Transformation processor rendering a template over its inputs.
///
/// Spec schema:
///
/// ```yaml
/// transformations:
///   - in: [password]
///     out: db-url
///     type: template
///     spec:
///       template: "postgres://app:{{ password }}@db/app"
///       content_type: text/plain   # optional
/// ```
///
/// Each input secret is exposed to the template as a string variable named
/// after it, so input names referenced inside a template should be
/// identifier-safe.
#[derive(Debug, Clone, Default)]
pub struct TemplateTransformation;

impl TemplateTransformation {
    /// Creates a new template transformation processor.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TransformationProcessor for TemplateTransformation {
    async fn process(
        &self,
        _cancel: &CancellationToken,
        _defaults: &Defaults,
        inputs: &[Secret],
        transformation: &Transformation,
    ) -> Result<Secret> {
        let source =
            transformation.spec.get("template").and_then(|v| v.as_str()).ok_or_else(|| {
                Error::port(
                    PortKind::Transformation,
                    "template element is required in spec of template transformation",
                )
            })?;
        let content_type = transformation
            .spec
            .get("content_type")
            .and_then(|v| v.as_str())
            .unwrap_or(DEFAULT_CONTENT_TYPE);

        let mut context: HashMap<&str, String> = HashMap::with_capacity(inputs.len());
        for input in inputs {
            context.insert(&input.name, String::from_utf8_lossy(&input.raw_content).into_owned());
        }

        debug!(transformation = %transformation, "rendering template");
        let env = Environment::new();
        let rendered = env.render_str(source, &context).map_err(|e| {
            Error::port_with_source(PortKind::Transformation, "template rendering failed", Box::new(e))
        })?;

        Ok(Secret {
            name: transformation.output.clone(),
            vault_name: String::new(),
            kind: "transformed-by:template".to_string(),
            raw_content: rendered.into_bytes(),
            raw_content_type: content_type.to_string(),
        })
    }
}
