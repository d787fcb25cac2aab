//! # Domain Model
//!
//! Plain data definitions for the entities a pipeline run is declared with:
//! [`Defaults`], [`Vault`], [`Secret`], [`Transformation`], and [`Sink`].
//! These carry no behavior beyond string formatting and lookup-by-name
//! helpers; all orchestration logic lives in [`crate::engine`] and all
//! cross-checks in [`crate::validation`].

pub mod defaults;
pub mod secret;
pub mod sink;
pub mod transformation;
pub mod vault;

pub use defaults::Defaults;
pub use secret::{valid_secret_kinds, Secret, SECRET_KIND_SECRET};
pub use sink::Sink;
pub use transformation::Transformation;
pub use vault::{find_vault, Vault};
