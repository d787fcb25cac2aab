//! # Variable Repository
//!
//! The run-scoped store mapping variable names to resolved secrets, bridging
//! the retrieve, transform, and write stages of one orchestration run.
//!
//! The store is lock-protected so it is safe to share across concurrent
//! callers, even though the reference orchestrator drives it from a single
//! logical thread of control. Its lifetime is exactly one
//! [`crate::engine::Orchestrator::process`] invocation; nothing is persisted
//! across runs.

use crate::domain::Secret;
use crate::errors::{Error, Result};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory store of resolved secrets, keyed by variable name.
///
/// `put` is an unconditional overwrite (last write wins); `get` hands out a
/// clone of the stored value, so holders are unaffected by later overwrites.
#[derive(Debug, Default)]
pub struct SecretRepository {
    items: Mutex<HashMap<String, Secret>>,
}

impl SecretRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)places the variable `name` with the given secret.
    pub fn put(&self, name: impl Into<String>, secret: Secret) {
        let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        items.insert(name.into(), secret);
    }

    /// Retrieves the secret stored under `name`.
    ///
    /// Fails with [`Error::VariableNotFound`] carrying the requested name;
    /// never substitutes a default value.
    pub fn get(&self, name: &str) -> Result<Secret> {
        let items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        items.get(name).cloned().ok_or_else(|| Error::variable_not_found(name))
    }

    /// Number of variables currently stored.
    pub fn len(&self) -> usize {
        self.items.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Returns true if no variable has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
