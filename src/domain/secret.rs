//! Secret entity: a named value resolved from a vault or produced by a
//! transformation, ultimately written to a sink.
//!
//! Secret material never leaks through `Debug`, `Display`, or serialization,
//! and the backing memory is zeroed when a value is dropped.

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::{Validate, ValidationError};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The default secret kind: a plain retrievable secret, e.g. a password.
pub const SECRET_KIND_SECRET: &str = "secret";

/// The closed set of secret kinds that can be declared in a configuration.
pub fn valid_secret_kinds() -> &'static [&'static str] {
    &[SECRET_KIND_SECRET]
}

fn validate_secret_kind(kind: &str) -> Result<(), ValidationError> {
    if valid_secret_kinds().contains(&kind) {
        Ok(())
    } else {
        let mut err = ValidationError::new("secret_kind");
        err.message = Some("not a recognized secret kind".into());
        Err(err)
    }
}

/// A named secret, referenced in a named vault.
///
/// As declared in a configuration, `raw_content` is empty; resolved values
/// exist only inside the run-scoped [`crate::repository::SecretRepository`].
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Validate, Zeroize, ZeroizeOnDrop)]
pub struct Secret {
    /// Name of the secret within the vault, and its variable name in the run
    #[validate(length(min = 1, message = "secret name must not be empty"))]
    pub name: String,

    /// Name of the vault the secret is stored in
    #[serde(rename = "vault")]
    #[validate(length(min = 1, message = "secret vault reference must not be empty"))]
    pub vault_name: String,

    /// Kind of secret; must be one of [`valid_secret_kinds`]
    #[serde(rename = "type")]
    #[validate(custom(function = "validate_secret_kind"))]
    pub kind: String,

    /// Resolved secret material; never serialized
    #[serde(skip)]
    pub raw_content: Vec<u8>,

    /// Content type of `raw_content`, e.g. `text/plain`
    #[serde(skip)]
    pub raw_content_type: String,
}

impl Secret {
    /// Creates a declared (unresolved) secret of the default kind.
    pub fn declared(name: impl Into<String>, vault_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vault_name: vault_name.into(),
            kind: SECRET_KIND_SECRET.to_string(),
            raw_content: Vec::new(),
            raw_content_type: String::new(),
        }
    }

    /// Returns true once the secret carries resolved content.
    pub fn is_set(&self) -> bool {
        !self.raw_content.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("name", &self.name)
            .field("vault_name", &self.vault_name)
            .field("kind", &self.kind)
            .field("raw_content", &"[REDACTED]")
            .field("raw_content_type", &self.raw_content_type)
            .finish()
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Secret[name={}, type={}, set={}, content-type={}]",
            self.name,
            self.kind,
            self.is_set(),
            self.raw_content_type
        )
    }
}
