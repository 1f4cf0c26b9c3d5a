use std::cell::{OnceCell, Ref, RefCell, RefMut};
use std::rc::Rc;

use log::{debug, trace};
use toml::{Table, Value};

use super::ConfigInstance;
use crate::accessor::{AccessorKind, AccessorSet, AccessorTable};
use crate::attribute::{AttrOptions, AttributeDefinition, AttributeRegistry};
use crate::store::ConfigStore;
use crate::{Error, Result};

/// Per-type state. The type-level store sits in its own cell so that reading
/// it never conflicts with accessor dispatch or declarations.
#[derive(Debug)]
struct ClassState {
    name: String,
    registry: RefCell<AttributeRegistry>,
    accessors: RefCell<AccessorTable>,
    config: OnceCell<RefCell<ConfigStore>>,
}

/// A configurable type: its attribute registry, synthesized accessors and
/// type-level store.
///
/// `ConfigClass` is a shared handle. Clones refer to the same type, so a
/// declaration or type-level write through one clone is seen by all of them
/// and by every [`ConfigInstance`] created from it. The handle is neither
/// `Send` nor `Sync`.
///
/// ## Example
///
/// ```
/// use attr_config::{AttrOptions, ConfigClass, Scopes};
///
/// let base = ConfigClass::new("Base");
/// base.attr_config("bar", AttrOptions::new().with_default("Base#bar"));
/// base.attr_config("secret", AttrOptions::new().readable(Scopes::hidden()));
///
/// let sample = base.subclass("Sample");
/// sample.attr_config("bar", AttrOptions::new().with_default("Sample#bar"));
///
/// assert_eq!(base.read("bar")?.unwrap().as_str(), Some("Base#bar"));
/// assert_eq!(sample.read("bar")?.unwrap().as_str(), Some("Sample#bar"));
/// assert!(base.read("secret").is_err());
/// # Ok::<(), attr_config::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigClass {
    state: Rc<ClassState>,
}

impl ConfigClass {
    /// Opts a new type into the capability with an empty registry.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_registry(name.into(), AttributeRegistry::new())
    }

    /// Creates a subtype of `parent`.
    ///
    /// The parent's definitions are copied at this point. Later declarations on
    /// either type are not seen by the other, and the subtype derives its own
    /// type-level store from its own registry.
    pub fn inherit(name: impl Into<String>, parent: &ConfigClass) -> Self {
        let name = name.into();
        debug!("{name} inherits attribute configs from {}", parent.state.name);
        let registry = AttributeRegistry::inherit_from(&parent.state.registry.borrow());
        Self::with_registry(name, registry)
    }

    /// Shorthand for [`ConfigClass::inherit`] with `self` as the parent.
    pub fn subclass(&self, name: impl Into<String>) -> Self {
        Self::inherit(name, self)
    }

    fn with_registry(name: String, registry: AttributeRegistry) -> Self {
        let mut accessors = AccessorTable::default();
        for definition in &registry {
            accessors.synthesize(definition);
        }
        Self {
            state: Rc::new(ClassState {
                name,
                registry: RefCell::new(registry),
                accessors: RefCell::new(accessors),
                config: OnceCell::new(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.state.name
    }

    /// Returns `true` if both handles refer to the same type.
    pub fn same_class(&self, other: &ConfigClass) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }

    /// Declares an attribute, or merges `options` into an existing one, and
    /// resynthesizes its accessors from the resulting flags.
    ///
    /// Once the type-level store exists, a new default is not written into it.
    pub fn attr_config(&self, name: impl Into<String>, options: AttrOptions) -> AccessorSet {
        let mut registry = self.state.registry.borrow_mut();
        let definition = registry.declare(name, options);
        let set = self.state.accessors.borrow_mut().synthesize(definition);
        debug!(
            "{}: synthesized {:?} for '{}'",
            self.state.name,
            set.kinds(),
            definition.name()
        );
        set
    }

    /// The declared attributes, in declaration order.
    pub fn attr_configs(&self) -> Vec<AttributeDefinition> {
        self.state.registry.borrow().definitions()
    }

    pub fn attr(&self, name: &str) -> Option<AttributeDefinition> {
        self.state.registry.borrow().get(name).cloned()
    }

    /// The accessors synthesized for `name`, or `None` if it was never declared.
    pub fn accessors(&self, name: &str) -> Option<AccessorSet> {
        self.state.accessors.borrow().get(name)
    }

    pub fn responds_to(&self, name: &str, kind: AccessorKind) -> bool {
        self.state.accessors.borrow().responds_to(name, kind)
    }

    /// The type-level store, derived from the registry's defaults on first use.
    fn store(&self) -> &RefCell<ConfigStore> {
        self.state.config.get_or_init(|| {
            debug!("{}: deriving type-level config", self.state.name);
            RefCell::new(ConfigStore::derive(&self.state.registry.borrow()))
        })
    }

    /// Reads the type-level store directly, ignoring accessor visibility.
    pub fn config(&self) -> Ref<'_, ConfigStore> {
        self.store().borrow()
    }

    /// Writes the type-level store directly, ignoring accessor visibility.
    ///
    /// # Panics
    ///
    /// Panics if the store is borrowed elsewhere while the guard is held.
    pub fn config_mut(&self) -> RefMut<'_, ConfigStore> {
        self.store().borrow_mut()
    }

    /// Runs `handler` once with the type-level store.
    ///
    /// The handle borrows the store only for the duration of each call, so the
    /// handler may use this type's accessors and create instances.
    pub fn configure<R>(&self, handler: impl FnOnce(&ClassConfig<'_>) -> R) -> R {
        handler(&ClassConfig { store: self.store() })
    }

    /// Parses a TOML document and sets each of its top-level keys on the
    /// type-level store.
    pub fn configure_from_toml(&self, source: &str) -> Result<()> {
        let table: Table = toml::from_str(source).map_err(Error::Parse)?;
        self.configure(|config| config.merge_table(table));
        Ok(())
    }

    /// Reads `name` through the type-level getter.
    pub fn read(&self, name: &str) -> Result<Option<Value>> {
        self.check(name, AccessorKind::ClassGetter)?;
        Ok(self.config().get(name).cloned())
    }

    /// Writes `name` through the type-level setter.
    pub fn write(&self, name: &str, value: impl Into<Value>) -> Result<()> {
        self.check(name, AccessorKind::ClassSetter)?;
        self.config_mut().set(name, value);
        Ok(())
    }

    /// Creates an instance. Its store is snapshotted from the type-level store
    /// on first access, not here.
    pub fn instantiate(&self) -> ConfigInstance {
        ConfigInstance::new(self.clone())
    }

    pub(crate) fn check(&self, name: &str, kind: AccessorKind) -> Result<()> {
        trace!("{} -> {}", kind.signature(&self.state.name, name), kind);
        if self.responds_to(name, kind) {
            Ok(())
        } else {
            Err(Error::undeclared(&self.state.name, name, kind))
        }
    }

    /// A fresh copy of the current type-level store.
    pub(crate) fn snapshot_config(&self) -> ConfigStore {
        self.config().snapshot()
    }
}

/// The type-level store as seen from a [`ConfigClass::configure`] handler.
#[derive(Debug)]
pub struct ClassConfig<'a> {
    store: &'a RefCell<ConfigStore>,
}

impl ClassConfig<'_> {
    pub fn get(&self, name: &str) -> Option<Value> {
        self.store.borrow().get(name).cloned()
    }

    /// Stores `value` under `name`, returning the previous value.
    pub fn set(&self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.store.borrow_mut().set(name, value)
    }

    pub fn unset(&self, name: &str) -> Option<Value> {
        self.store.borrow_mut().unset(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.store.borrow().contains(name)
    }

    pub fn merge_table(&self, table: Table) {
        self.store.borrow_mut().merge_table(table);
    }

    /// A copy of the store's current values.
    pub fn snapshot(&self) -> ConfigStore {
        self.store.borrow().snapshot()
    }
}
