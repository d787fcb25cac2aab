//! # Configuration Loading
//!
//! Deserializes the declarative YAML pipeline document into the domain model
//! and offers optional `${VAR}` environment substitution on the raw text
//! before parsing. Cross-referential checks live in [`crate::validation`];
//! loading only proves the document parses.

use crate::domain::{find_vault, Defaults, Secret, Sink, Transformation, Vault};
use crate::errors::Result;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The main configuration document.
///
/// Constructed once from an external YAML source and immutable thereafter.
/// Declared secrets carry no content; resolved values live only in the
/// run-scoped repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Settings valid for some or all other sections, passed through to ports
    #[serde(default)]
    pub defaults: Defaults,

    /// The vaults secrets are pulled from
    #[serde(default)]
    pub vaults: Vec<Vault>,

    /// Name and location of the secrets
    #[serde(default)]
    pub secrets: Vec<Secret>,

    /// Optional transformation steps applied between retrieval and writing
    #[serde(default)]
    pub transformations: Vec<Transformation>,

    /// Output sinks for the (transformed) secrets
    #[serde(default)]
    pub sinks: Vec<Sink>,
}

impl Config {
    /// Parses a configuration from a YAML document.
    pub fn from_yaml(input: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(input)?)
    }

    /// Parses a configuration from a YAML document after substituting
    /// `${VAR}` references from the process environment.
    pub fn from_yaml_with_env_subst(input: &str) -> Result<Self> {
        Self::from_yaml(&substitute_env(input))
    }

    /// Reads a configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>, env_subst: bool) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        if env_subst {
            Self::from_yaml_with_env_subst(&raw)
        } else {
            Self::from_yaml(&raw)
        }
    }

    /// Checks whether `name` is defined anywhere in the configuration, either
    /// as a secret or as the output of a transformation. Declaration order is
    /// irrelevant; this is a closure over the whole document.
    pub fn is_var_defined(&self, name: &str) -> bool {
        self.secrets.iter().any(|s| s.name == name)
            || self.transformations.iter().any(|t| t.output == name)
    }

    /// Looks up a declared vault by name.
    pub fn vault(&self, name: &str) -> Option<&Vault> {
        find_vault(&self.vaults, name)
    }
}

static ENV_VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("static env var pattern"));

/// Replaces `${VAR}` references with values from the process environment.
///
/// Unset variables substitute to the empty string; downstream structural
/// validation then reports the field that ended up blank.
pub fn substitute_env(input: &str) -> String {
    ENV_VAR_PATTERN
        .replace_all(input, |caps: &Captures<'_>| std::env::var(&caps[1]).unwrap_or_default())
        .into_owned()
}
