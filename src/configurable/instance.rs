use std::cell::OnceCell;

use log::debug;
use toml::Value;

use super::ConfigClass;
use crate::accessor::AccessorKind;
use crate::store::ConfigStore;
use crate::Result;

/// An object of a configurable type, with its own instance-level store.
///
/// The store is created lazily as a snapshot of the type-level store at first
/// access. After that, type-level writes and writes on sibling instances are
/// not visible here, and writes here stay here.
#[derive(Debug, Clone)]
pub struct ConfigInstance {
    class: ConfigClass,
    config: OnceCell<ConfigStore>,
}

impl ConfigInstance {
    pub(crate) fn new(class: ConfigClass) -> Self {
        Self {
            class,
            config: OnceCell::new(),
        }
    }

    /// The instance-level store. Access through the store ignores accessor
    /// visibility.
    pub fn config(&self) -> &ConfigStore {
        self.config.get_or_init(|| self.class.snapshot_config())
    }

    pub fn config_mut(&mut self) -> &mut ConfigStore {
        if self.config.get().is_none() {
            self.config = OnceCell::from(self.class.snapshot_config());
        }
        let Some(config) = self.config.get_mut() else {
            unreachable!("instance config is set above");
        };
        config
    }

    /// Replaces the instance-level store with a fresh snapshot of the
    /// type-level store.
    pub fn reset_config(&mut self) -> &mut ConfigStore {
        debug!("{}: resetting instance config", self.class.name());
        self.config = OnceCell::from(self.class.snapshot_config());
        self.config_mut()
    }

    /// Reads `name` through the instance getter.
    pub fn read(&self, name: &str) -> Result<Option<Value>> {
        self.class.check(name, AccessorKind::InstanceGetter)?;
        Ok(self.config().get(name).cloned())
    }

    /// Writes `name` through the instance setter.
    pub fn write(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        self.class.check(name, AccessorKind::InstanceSetter)?;
        self.config_mut().set(name, value);
        Ok(())
    }

    pub fn responds_to(&self, name: &str, kind: AccessorKind) -> bool {
        self.class.responds_to(name, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::{AttrOptions, Scopes};
    use crate::Error;

    fn base() -> ConfigClass {
        let base = ConfigClass::new("Base");
        base.attr_config("bar", AttrOptions::new().with_default("Base#bar"));
        base.attr_config(
            "only_instance_readable",
            AttrOptions::new()
                .with_default("Base#only_instance_readable")
                .readable(Scopes::instance_only()),
        );
        base
    }

    #[test]
    fn test_instance_reads_type_default() {
        let instance = base().instantiate();
        assert_eq!(instance.read("bar").unwrap(), Some(Value::from("Base#bar")));
        assert_eq!(
            instance.read("only_instance_readable").unwrap(),
            Some(Value::from("Base#only_instance_readable"))
        );
    }

    #[test]
    fn test_snapshot_taken_at_first_access() {
        let base = base();
        let mut early = base.instantiate();
        let late = base.instantiate();
        early.config();

        base.write("bar", "updated").unwrap();

        assert_eq!(early.read("bar").unwrap(), Some(Value::from("Base#bar")));
        assert_eq!(late.read("bar").unwrap(), Some(Value::from("updated")));

        early.reset_config();
        assert_eq!(early.read("bar").unwrap(), Some(Value::from("updated")));
    }

    #[test]
    fn test_config_mut_snapshots_on_first_access() {
        let base = base();
        let mut instance = base.instantiate();
        base.write("bar", "before first access").unwrap();

        instance.config_mut().set("extra", true);
        base.write("bar", "after first access").unwrap();

        assert_eq!(
            instance.config().get("bar").and_then(Value::as_str),
            Some("before first access")
        );
        assert_eq!(instance.config().get("extra"), Some(&Value::Boolean(true)));
        assert!(!base.config().contains("extra"));
    }

    #[test]
    fn test_reset_discards_instance_writes() {
        let mut instance = base().instantiate();
        instance.write("bar", "mine").unwrap();
        assert_eq!(instance.read("bar").unwrap(), Some(Value::from("mine")));

        instance.reset_config();
        assert_eq!(instance.read("bar").unwrap(), Some(Value::from("Base#bar")));
    }

    #[test]
    fn test_instance_write_does_not_touch_type() {
        let base = base();
        let mut instance = base.instantiate();
        instance.write("bar", "mine").unwrap();

        assert_eq!(base.read("bar").unwrap(), Some(Value::from("Base#bar")));
    }

    #[test]
    fn test_missing_instance_accessor() {
        let mut instance = base().instantiate();
        let err = instance.write("undeclared", 1).unwrap_err();

        assert!(err.is_undeclared_accessor());
        assert!(matches!(
            err,
            Error::UndeclaredAccessor { kind: AccessorKind::InstanceSetter, .. }
        ));
        assert_eq!(err.to_string(), "accessor `Base#undeclared=` is not defined");
    }
}
