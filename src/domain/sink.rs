//! Sink entity: a named output destination for a resolved variable.

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Declares where a resolved variable, indicated by `var`, is written to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Sink {
    /// Type tag selecting the sink writer; determines the shape of `spec`
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "sink type must not be empty"))]
    pub kind: String,

    /// The variable written into the sink
    #[validate(length(min = 1, message = "sink variable must not be empty"))]
    pub var: String,

    /// Writer-specific settings
    #[serde(default)]
    pub spec: serde_json::Value,
}

impl fmt::Display for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sink[var={}, type={}]", self.var, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_structural_validation() {
        let sink = Sink {
            kind: "file".to_string(),
            var: "db-password".to_string(),
            spec: serde_json::Value::Null,
        };
        assert!(sink.validate().is_ok());

        let no_var = Sink { var: String::new(), ..sink.clone() };
        assert!(no_var.validate().is_err());
    }

    #[test]
    fn test_sink_display() {
        let sink = Sink {
            kind: "file".to_string(),
            var: "db-password".to_string(),
            spec: serde_json::Value::Null,
        };
        assert_eq!(sink.to_string(), "Sink[var=db-password, type=file]");
    }
}
