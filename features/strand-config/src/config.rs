use std::{ops::Deref, sync::Arc};

use strand_di::{InjectError, Injectable, Injector};

/// A wrapper type to allow for config injections
///
/// This provides a simple way to read configs published by a [ConfigProvider](crate::provider::ConfigProvider)
/// back out of an injector.
///
/// # Example
/// ```rust
/// use strand_config::{config::Config, provider::ConfigProvider};
/// use strand_di::{create_injector, ModuleRegistry};
///
/// #[derive(Clone)]
/// pub struct MyModuleConfig {
///     enabled: bool,
/// }
///
/// let mut config_provider = ConfigProvider::new();
/// config_provider
///     .add_config("myModuleConfig", MyModuleConfig { enabled: true })
///     .unwrap();
///
/// let mut registry = ModuleRegistry::new();
/// config_provider.register_into(registry.define_module("config", &[]));
/// let injector = create_injector(&registry, &["config"], true).unwrap();
///
/// let config = Config::<MyModuleConfig>::resolve(&injector, "myModuleConfig").unwrap();
/// assert!(config.enabled);
/// ```
pub struct Config<T> {
    inner: Arc<T>,
}
impl<T> Deref for Config<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
impl<T> Config<T> {
    pub fn inner(&self) -> Arc<T> {
        self.inner.clone()
    }

    pub fn into_inner(self) -> Arc<T> {
        self.inner
    }
}

impl<T: Injectable> Config<T> {
    /// Reads the config published under `token`
    pub fn resolve(injector: &Injector, token: &str) -> Result<Self, InjectError> {
        let inner = injector.get_as::<T>(token)?;
        Ok(Config { inner })
    }
}
