//! Transformation entity: a processing step that consumes one or more
//! resolved variables and produces a new named variable.

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::{Validate, ValidationError};

fn validate_input_names(input: &[String]) -> Result<(), ValidationError> {
    if input.iter().any(|name| name.is_empty()) {
        let mut err = ValidationError::new("input_names");
        err.message = Some("input variable names must not be empty".into());
        return Err(err);
    }
    Ok(())
}

/// A single declared transformation.
///
/// Inputs must be *defined* somewhere in the same configuration, either as a
/// secret name or as another transformation's output. That is a set-membership
/// rule: the producer may be declared later in the document, but execution
/// always runs in declared order, so such a configuration fails at runtime
/// when the not-yet-produced input is fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Transformation {
    /// Ordered list of input variable names
    #[serde(rename = "in")]
    #[validate(length(min = 1, message = "transformation needs at least one input"))]
    #[validate(custom(function = "validate_input_names"))]
    pub input: Vec<String>,

    /// Name of the output variable the result is stored under
    #[serde(rename = "out")]
    #[validate(length(min = 1, message = "transformation output must not be empty"))]
    pub output: String,

    /// Type tag selecting the transformation processor
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "transformation type must not be empty"))]
    pub kind: String,

    /// Processor-specific settings
    #[serde(default)]
    pub spec: serde_json::Value,
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transformation[in={}, out={}, type={}]",
            self.input.join(","),
            self.output,
            self.kind
        )
    }
}
