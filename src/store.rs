//! Live attribute values, addressable by name.

use log::debug;
use serde::de::DeserializeOwned;
use toml::{Table, Value};

use crate::attribute::AttributeRegistry;
use crate::Error;

/// Ordered name → value container backing one scope's configuration.
///
/// The store does not know which names are declared attributes: unknown names
/// read as `None` and can be written like any other. Attributes declared without
/// a default hold no value until set.
///
/// Cloning a store produces an independent snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigStore {
    values: Table,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a store from the registry's defaults, in declaration order.
    pub fn derive(registry: &AttributeRegistry) -> Self {
        let values: Table = registry
            .iter()
            .filter_map(|def| {
                def.default_value()
                    .map(|value| (def.name().to_string(), value.clone()))
            })
            .collect();
        debug!(
            "derived store with {} default(s) from {} attribute(s)",
            values.len(),
            registry.len()
        );
        Self { values }
    }

    /// Returns an independent copy of this store.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Stores `value` under `name`, returning the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(name.into(), value.into())
    }

    /// Clears the value under `name`, returning it.
    pub fn unset(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.values.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sets every top-level key of `table`, replacing existing values wholesale.
    pub fn merge_table(&mut self, table: Table) {
        for (name, value) in table {
            self.values.insert(name, value);
        }
    }

    pub fn to_table(&self) -> Table {
        self.values.clone()
    }

    /// Deserializes the current values into `T`.
    ///
    /// ```
    /// use attr_config::ConfigStore;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Server {
    ///     host: String,
    ///     port: u16,
    /// }
    ///
    /// let mut store = ConfigStore::new();
    /// store.set("host", "localhost");
    /// store.set("port", 8080);
    ///
    /// let server: Server = store.deserialize()?;
    /// assert_eq!(server.port, 8080);
    /// # Ok::<(), attr_config::Error>(())
    /// ```
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, Error> {
        Value::Table(self.values.clone())
            .try_into()
            .map_err(Error::Deserialize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::AttrOptions;

    fn registry() -> AttributeRegistry {
        let mut registry = AttributeRegistry::new();
        registry.declare("bar", AttrOptions::new().with_default("Base#bar"));
        registry.declare("foo", AttrOptions::new());
        registry.declare("port", AttrOptions::new().with_default(8080));
        registry
    }

    #[test]
    fn test_derive_seeds_defaults_in_order() {
        let store = ConfigStore::derive(&registry());

        assert_eq!(store.names(), vec!["bar", "port"]);
        assert_eq!(store.get("bar").and_then(Value::as_str), Some("Base#bar"));
        assert_eq!(store.get("port").and_then(Value::as_integer), Some(8080));
        assert!(store.get("foo").is_none());
    }

    #[test]
    fn test_unknown_names_are_accepted() {
        let mut store = ConfigStore::derive(&registry());

        assert!(store.get("nope").is_none());
        assert!(store.set("nope", true).is_none());
        assert_eq!(store.get("nope"), Some(&Value::Boolean(true)));
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut original = ConfigStore::derive(&registry());
        original.set("list", Value::Array(vec![Value::from(1)]));

        let mut copy = original.snapshot();
        copy.set("bar", "changed");
        if let Some(Value::Array(items)) = copy.values.get_mut("list") {
            items.push(Value::from(2));
        }
        original.set("port", 9090);

        assert_eq!(original.get("bar").and_then(Value::as_str), Some("Base#bar"));
        assert_eq!(original.get("list").and_then(Value::as_array).map(Vec::len), Some(1));
        assert_eq!(copy.get("port").and_then(Value::as_integer), Some(8080));
    }

    #[test]
    fn test_unset_keeps_order_of_remaining_keys() {
        let mut store = ConfigStore::derive(&registry());
        store.set("extra", "x");

        assert_eq!(store.unset("bar"), Some(Value::from("Base#bar")));
        assert_eq!(store.names(), vec!["port", "extra"]);
        assert!(store.unset("bar").is_none());
    }

    #[test]
    fn test_merge_table_replaces_values() {
        let mut store = ConfigStore::derive(&registry());
        let table: Table = toml::from_str(
            r#"
            port = 3000
            foo = { nested = true }
            "#,
        )
        .unwrap();
        store.merge_table(table);

        assert_eq!(store.get("port").and_then(Value::as_integer), Some(3000));
        assert_eq!(store.names(), vec!["bar", "port", "foo"]);
        assert_eq!(store.to_table()["foo"]["nested"].as_bool(), Some(true));
    }

    #[test]
    fn test_deserialize_type_mismatch() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Typed {
            port: String,
        }

        let store = ConfigStore::derive(&registry());
        let result = store.deserialize::<Typed>();
        assert!(matches!(result, Err(Error::Deserialize(_))));
    }
}
