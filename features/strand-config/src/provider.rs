use std::{
    any::{type_name, TypeId},
    collections::HashMap,
    sync::Arc,
};

use strand_di::{Injectable, Instance, ModuleHandle};

use crate::errors::{GetConfigError, RegisterConfigError};

struct ConfigEntry {
    token: String,
    config: Instance,
}

/// A provider to register all configs.
///
/// Configs are registered under a token and can be retrieved based on type.
/// Once filled, the provider publishes every config as a constant of a module.
#[derive(Default)]
pub struct ConfigProvider {
    configs: HashMap<TypeId, ConfigEntry>,
    /// Registration order, so configs are published deterministically
    order: Vec<TypeId>,
}

impl ConfigProvider {
    /// Initializes an empty Config Provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieve a config with specified type.
    ///
    /// If the config type is not available, it will return a [`GetConfigError`]
    pub fn get_config<T: Injectable>(&self) -> Result<Arc<T>, GetConfigError> {
        self.configs
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.config.downcast().ok())
            .ok_or(GetConfigError::Missing(type_name::<T>()))
    }

    /// The token a config type is published under
    pub fn token_of<T: Injectable>(&self) -> Option<&str> {
        self.configs
            .get(&TypeId::of::<T>())
            .map(|entry| entry.token.as_str())
    }

    /// Add a config to the registry.
    ///
    /// If the config type or token is already registered, it will return a [`RegisterConfigError`]
    pub fn add_config<T: Injectable>(
        &mut self,
        token: impl Into<String>,
        config: T,
    ) -> Result<&mut Self, RegisterConfigError> {
        let type_id = TypeId::of::<T>();
        let token = token.into();

        if self.configs.contains_key(&type_id) {
            return Err(RegisterConfigError::AlreadyRegistered(type_name::<T>()));
        }
        if self.configs.values().any(|entry| entry.token == token) {
            return Err(RegisterConfigError::TokenTaken(token));
        }

        tracing::debug!("Adding config '{}' as '{token}'", type_name::<T>());
        self.configs.insert(
            type_id,
            ConfigEntry {
                token,
                config: Instance::new(config),
            },
        );
        self.order.push(type_id);
        Ok(self)
    }

    /// Can optionally add a config to the registry.
    ///
    /// If the config provided is `Some(T)`, it will be the same as calling [`ConfigProvider::add_config`]
    /// If the config provided is `None`, then the function just returns `Ok(self)` for chaining
    pub fn maybe_add_config<T: Injectable>(
        &mut self,
        token: impl Into<String>,
        config: Option<T>,
    ) -> Result<&mut Self, RegisterConfigError> {
        match config {
            Some(c) => self.add_config(token, c),
            None => Ok(self),
        }
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Queues every config as a constant on `module`, in registration order
    pub fn register_into<'a>(&self, module: ModuleHandle<'a>) -> ModuleHandle<'a> {
        self.order
            .iter()
            .filter_map(|type_id| self.configs.get(type_id))
            .fold(module, |module, entry| {
                module.constant_instance(entry.token.clone(), entry.config.clone())
            })
    }
}
