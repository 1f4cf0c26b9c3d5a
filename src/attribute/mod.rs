//! Attribute declarations and the per-type registry that holds them.

mod options;
mod registry;

pub use options::{AttrOptions, Scopes};
pub use registry::{AttributeDefinition, AttributeRegistry};
