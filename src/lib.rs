//! Declarative attribute configuration.
//!
//! A type declares named attributes with defaults and per-scope visibility;
//! getters and setters are synthesized at the type level and the instance level
//! according to those flags, and values live in a type-level [`ConfigStore`]
//! that each instance snapshots on first use.

pub mod accessor;
pub mod attribute;
pub mod configurable;
mod error;
pub mod store;

pub use accessor::{AccessorKind, AccessorSet};
pub use attribute::{AttrOptions, AttributeDefinition, AttributeRegistry, Scopes};
pub use configurable::{ClassConfig, ConfigClass, ConfigInstance, Configurable};
pub use error::{Error, Result};
pub use store::ConfigStore;
pub use toml::Value;
