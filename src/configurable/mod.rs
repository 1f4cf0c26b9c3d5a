//! The composition point: configurable types and their instances.

mod class;
mod instance;

pub use class::{ClassConfig, ConfigClass};
pub use instance::ConfigInstance;

use toml::Value;

use crate::store::ConfigStore;
use crate::Result;

/// Opts a Rust type into attribute configuration.
///
/// An implementor supplies the handle of its [`ConfigClass`] and the
/// [`ConfigInstance`] it embeds; the accessor methods at both scopes are
/// provided. Handles are `!Sync`, so the usual way to give a type its class is
/// a `thread_local!`:
///
/// ```
/// use attr_config::{AttrOptions, ConfigClass, ConfigInstance, Configurable};
///
/// thread_local! {
///     static SERVER: ConfigClass = {
///         let class = ConfigClass::new("Server");
///         class.attr_config("host", AttrOptions::new().with_default("localhost"));
///         class
///     };
/// }
///
/// struct Server {
///     attrs: ConfigInstance,
/// }
///
/// impl Server {
///     fn new() -> Self {
///         Self { attrs: Self::config_class().instantiate() }
///     }
/// }
///
/// impl Configurable for Server {
///     fn config_class() -> ConfigClass {
///         SERVER.with(ConfigClass::clone)
///     }
///
///     fn attrs(&self) -> &ConfigInstance {
///         &self.attrs
///     }
///
///     fn attrs_mut(&mut self) -> &mut ConfigInstance {
///         &mut self.attrs
///     }
/// }
///
/// let mut server = Server::new();
/// server.write("host", "example.com")?;
/// assert_eq!(server.read("host")?.unwrap().as_str(), Some("example.com"));
/// assert_eq!(Server::class_read("host")?.unwrap().as_str(), Some("localhost"));
/// # Ok::<(), attr_config::Error>(())
/// ```
pub trait Configurable {
    /// The type-level descriptor shared by every value of this type.
    fn config_class() -> ConfigClass;

    fn attrs(&self) -> &ConfigInstance;

    fn attrs_mut(&mut self) -> &mut ConfigInstance;

    fn class_read(name: &str) -> Result<Option<Value>>
    where
        Self: Sized,
    {
        Self::config_class().read(name)
    }

    fn class_write(name: &str, value: impl Into<Value>) -> Result<()>
    where
        Self: Sized,
    {
        Self::config_class().write(name, value)
    }

    /// Runs `handler` once with the type-level store.
    fn configure<R>(handler: impl FnOnce(&ClassConfig<'_>) -> R) -> R
    where
        Self: Sized,
    {
        Self::config_class().configure(handler)
    }

    fn read(&self, name: &str) -> Result<Option<Value>> {
        self.attrs().read(name)
    }

    fn write(&mut self, name: &str, value: impl Into<Value>) -> Result<()>
    where
        Self: Sized,
    {
        self.attrs_mut().write(name, value)
    }

    fn config(&self) -> &ConfigStore {
        self.attrs().config()
    }

    fn config_mut(&mut self) -> &mut ConfigStore {
        self.attrs_mut().config_mut()
    }

    fn reset_config(&mut self) -> &mut ConfigStore {
        self.attrs_mut().reset_config()
    }
}
