use thiserror::Error;

use crate::accessor::AccessorKind;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the attr-config library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The named accessor was never synthesized, either because its
    /// visibility flag is `false` or because the attribute was never declared.
    #[error("accessor `{}` is not defined", .kind.signature(.class, .attribute))]
    UndeclaredAccessor {
        class: String,
        attribute: String,
        kind: AccessorKind,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("failed to deserialize configuration: {0}")]
    Deserialize(#[source] toml::de::Error),
}

impl Error {
    pub(crate) fn undeclared(class: &str, attribute: &str, kind: AccessorKind) -> Self {
        Self::UndeclaredAccessor {
            class: class.to_string(),
            attribute: attribute.to_string(),
            kind,
        }
    }

    /// Returns `true` if this error reports a missing accessor.
    pub fn is_undeclared_accessor(&self) -> bool {
        matches!(self, Self::UndeclaredAccessor { .. })
    }
}
