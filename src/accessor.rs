//! Accessor synthesis.
//!
//! Each declared attribute gets up to four named entry points. Which ones exist
//! is decided when the attribute is declared; dispatch to one that was not
//! synthesized fails with [`Error::UndeclaredAccessor`](crate::Error).

use std::collections::HashMap;
use std::fmt;

use crate::attribute::AttributeDefinition;

/// One of the four accessor entry points an attribute can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    InstanceGetter,
    ClassGetter,
    InstanceSetter,
    ClassSetter,
}

impl AccessorKind {
    pub const ALL: [AccessorKind; 4] = [
        Self::InstanceGetter,
        Self::ClassGetter,
        Self::InstanceSetter,
        Self::ClassSetter,
    ];

    /// Renders the entry point as `Type#attr`, `Type.attr`, `Type#attr=` or `Type.attr=`.
    pub fn signature(&self, class: &str, attribute: &str) -> String {
        match self {
            Self::InstanceGetter => format!("{class}#{attribute}"),
            Self::ClassGetter => format!("{class}.{attribute}"),
            Self::InstanceSetter => format!("{class}#{attribute}="),
            Self::ClassSetter => format!("{class}.{attribute}="),
        }
    }
}

impl fmt::Display for AccessorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InstanceGetter => write!(f, "instance getter"),
            Self::ClassGetter => write!(f, "class getter"),
            Self::InstanceSetter => write!(f, "instance setter"),
            Self::ClassSetter => write!(f, "class setter"),
        }
    }
}

/// The entry points synthesized for a single attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessorSet {
    instance_getter: bool,
    class_getter: bool,
    instance_setter: bool,
    class_setter: bool,
}

impl AccessorSet {
    /// Computes the entry points from the definition's flags as they are now.
    pub fn synthesize(definition: &AttributeDefinition) -> Self {
        Self {
            instance_getter: definition.readable_at_instance(),
            class_getter: definition.readable_at_class(),
            instance_setter: definition.writable_at_instance(),
            class_setter: definition.writable_at_class(),
        }
    }

    pub fn contains(&self, kind: AccessorKind) -> bool {
        match kind {
            AccessorKind::InstanceGetter => self.instance_getter,
            AccessorKind::ClassGetter => self.class_getter,
            AccessorKind::InstanceSetter => self.instance_setter,
            AccessorKind::ClassSetter => self.class_setter,
        }
    }

    /// The synthesized entry points, in [`AccessorKind::ALL`] order.
    pub fn kinds(&self) -> Vec<AccessorKind> {
        AccessorKind::ALL
            .into_iter()
            .filter(|kind| self.contains(*kind))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds().is_empty()
    }
}

/// Accessor sets keyed by attribute name.
#[derive(Debug, Clone, Default)]
pub(crate) struct AccessorTable {
    sets: HashMap<String, AccessorSet>,
}

impl AccessorTable {
    /// Replaces whatever was synthesized for this attribute before.
    pub(crate) fn synthesize(&mut self, definition: &AttributeDefinition) -> AccessorSet {
        let set = AccessorSet::synthesize(definition);
        self.sets.insert(definition.name().to_string(), set);
        set
    }

    pub(crate) fn get(&self, attribute: &str) -> Option<AccessorSet> {
        self.sets.get(attribute).copied()
    }

    pub(crate) fn responds_to(&self, attribute: &str, kind: AccessorKind) -> bool {
        self.get(attribute).is_some_and(|set| set.contains(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::{AttrOptions, AttributeRegistry, Scopes};

    fn synthesize(options: AttrOptions) -> AccessorSet {
        let mut registry = AttributeRegistry::new();
        AccessorSet::synthesize(registry.declare("attr", options))
    }

    #[test]
    fn test_all_accessors_by_default() {
        let set = synthesize(AttrOptions::new());
        assert_eq!(set.kinds(), AccessorKind::ALL.to_vec());
    }

    #[test]
    fn test_each_flag_removes_one_accessor() {
        let cases = [
            (
                AttrOptions::new().readable(Scopes::unset().with_instance(false)),
                AccessorKind::InstanceGetter,
            ),
            (
                AttrOptions::new().readable(Scopes::instance_only()),
                AccessorKind::ClassGetter,
            ),
            (
                AttrOptions::new().writable(Scopes::class_only()),
                AccessorKind::InstanceSetter,
            ),
            (
                AttrOptions::new().writable(Scopes::unset().with_class(false)),
                AccessorKind::ClassSetter,
            ),
        ];

        for (options, missing) in cases {
            let set = synthesize(options);
            assert!(!set.contains(missing), "{missing} should be absent");
            assert_eq!(set.kinds().len(), 3);
        }
    }

    #[test]
    fn test_hidden_attribute_has_no_accessors() {
        let set = synthesize(
            AttrOptions::new()
                .readable(Scopes::hidden())
                .writable(Scopes::hidden()),
        );
        assert!(set.is_empty());
    }

    #[test]
    fn test_resynthesis_replaces_previous_set() {
        let mut registry = AttributeRegistry::new();
        let mut table = AccessorTable::default();

        table.synthesize(registry.declare("a", AttrOptions::new()));
        assert!(table.responds_to("a", AccessorKind::ClassGetter));

        table.synthesize(registry.declare("a", AttrOptions::new().readable(Scopes::instance_only())));
        assert!(!table.responds_to("a", AccessorKind::ClassGetter));
        assert!(table.responds_to("a", AccessorKind::InstanceGetter));
        assert!(!table.responds_to("missing", AccessorKind::InstanceGetter));
    }

    #[test]
    fn test_signature_rendering() {
        assert_eq!(AccessorKind::InstanceGetter.signature("Base", "bar"), "Base#bar");
        assert_eq!(AccessorKind::ClassSetter.signature("Base", "bar"), "Base.bar=");
    }
}
