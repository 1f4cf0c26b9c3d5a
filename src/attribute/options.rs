use toml::Value;

/// Per-scope visibility flags for one operation (read or write).
///
/// Each flag is optional so that a redeclaration can update one scope while
/// leaving the other as previously declared. Unset flags resolve to `true`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scopes {
    pub instance: Option<bool>,
    pub class: Option<bool>,
}

impl Scopes {
    /// Leaves both scopes unspecified.
    pub const fn unset() -> Self {
        Self {
            instance: None,
            class: None,
        }
    }

    /// Sets both scopes explicitly.
    pub const fn new(instance: bool, class: bool) -> Self {
        Self {
            instance: Some(instance),
            class: Some(class),
        }
    }

    /// Disables the operation at both scopes.
    pub const fn hidden() -> Self {
        Self::new(false, false)
    }

    /// Disables the operation at type scope only.
    pub const fn instance_only() -> Self {
        Self {
            instance: None,
            class: Some(false),
        }
    }

    /// Disables the operation at instance scope only.
    pub const fn class_only() -> Self {
        Self {
            instance: Some(false),
            class: None,
        }
    }

    #[must_use]
    pub const fn with_instance(mut self, enabled: bool) -> Self {
        self.instance = Some(enabled);
        self
    }

    #[must_use]
    pub const fn with_class(mut self, enabled: bool) -> Self {
        self.class = Some(enabled);
        self
    }

    pub fn instance_enabled(&self) -> bool {
        self.instance.unwrap_or(true)
    }

    pub fn class_enabled(&self) -> bool {
        self.class.unwrap_or(true)
    }

    /// Overlays the flags present in `other`, keeping the rest.
    pub(crate) fn merge(&mut self, other: Scopes) {
        if other.instance.is_some() {
            self.instance = other.instance;
        }
        if other.class.is_some() {
            self.class = other.class;
        }
    }
}

/// Options accepted by an attribute declaration.
///
/// ```
/// use attr_config::{AttrOptions, Scopes};
///
/// let options = AttrOptions::new()
///     .with_default("localhost")
///     .writable(Scopes::instance_only());
///
/// assert_eq!(options.default_value().and_then(|v| v.as_str()), Some("localhost"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use = "options do nothing until passed to a declaration"]
pub struct AttrOptions {
    pub(crate) default: Option<Option<Value>>,
    pub(crate) readable: Scopes,
    pub(crate) writable: Scopes,
}

impl AttrOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default value. On redeclaration it replaces the previous default.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(Some(value.into()));
        self
    }

    /// Clears the default. On redeclaration this removes a previous default,
    /// including one inherited from a parent type.
    pub fn without_default(mut self) -> Self {
        self.default = Some(None);
        self
    }

    /// Sets read visibility. On redeclaration only the flags present are applied.
    pub fn readable(mut self, scopes: Scopes) -> Self {
        self.readable = scopes;
        self
    }

    /// Sets write visibility. On redeclaration only the flags present are applied.
    pub fn writable(mut self, scopes: Scopes) -> Self {
        self.writable = scopes;
        self
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref().and_then(Option::as_ref)
    }
}
