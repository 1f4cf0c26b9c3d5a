use log::debug;
use toml::Value;

use super::{AttrOptions, Scopes};

/// A declared attribute: its default value and read/write visibility.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDefinition {
    name: String,
    default: Option<Value>,
    readable: Scopes,
    writable: Scopes,
}

impl AttributeDefinition {
    fn new(name: String) -> Self {
        Self {
            name,
            default: None,
            readable: Scopes::unset(),
            writable: Scopes::unset(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn readable_at_instance(&self) -> bool {
        self.readable.instance_enabled()
    }

    pub fn readable_at_class(&self) -> bool {
        self.readable.class_enabled()
    }

    pub fn writable_at_instance(&self) -> bool {
        self.writable.instance_enabled()
    }

    pub fn writable_at_class(&self) -> bool {
        self.writable.class_enabled()
    }

    /// Applies a redeclaration. The default is replaced only when supplied,
    /// and may be replaced with nothing; visibility flags are merged key by key.
    fn merge(&mut self, options: AttrOptions) {
        if let Some(default) = options.default {
            self.default = default;
        }
        self.readable.merge(options.readable);
        self.writable.merge(options.writable);
    }
}

/// Ordered set of attribute definitions owned by one configurable type.
///
/// Definitions are kept in declaration order. A redeclared name keeps its
/// original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeRegistry {
    definitions: Vec<AttributeDefinition>,
}

impl AttributeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a subtype registry from its parent's definitions.
    ///
    /// The copy is independent: declarations on either registry afterwards
    /// are not visible to the other.
    pub fn inherit_from(parent: &AttributeRegistry) -> Self {
        debug!(
            "inheriting {} attribute definition(s)",
            parent.definitions.len()
        );
        parent.clone()
    }

    /// Registers `name`, or merges `options` into its existing definition.
    ///
    /// Returns the definition as it stands after the merge.
    pub fn declare(&mut self, name: impl Into<String>, options: AttrOptions) -> &AttributeDefinition {
        let name = name.into();
        let index = match self.position(&name) {
            Some(index) => {
                debug!("redeclaring attribute '{name}'");
                index
            }
            None => {
                debug!("declaring attribute '{name}'");
                self.definitions.push(AttributeDefinition::new(name));
                self.definitions.len() - 1
            }
        };

        let definition = &mut self.definitions[index];
        definition.merge(options);
        definition
    }

    /// Returns the current definitions in declaration order.
    pub fn definitions(&self) -> Vec<AttributeDefinition> {
        self.definitions.clone()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AttributeDefinition> {
        self.definitions.iter()
    }

    pub fn get(&self, name: &str) -> Option<&AttributeDefinition> {
        self.definitions.iter().find(|d| d.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn names(&self) -> Vec<&str> {
        self.definitions.iter().map(AttributeDefinition::name).collect()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.definitions.iter().position(|d| d.name == name)
    }
}

impl<'a> IntoIterator for &'a AttributeRegistry {
    type Item = &'a AttributeDefinition;
    type IntoIter = std::slice::Iter<'a, AttributeDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
