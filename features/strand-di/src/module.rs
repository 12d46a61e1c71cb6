use std::collections::{hash_map::Entry, HashMap};

use crate::{
    errors::LoadError,
    factories::{Callable, Provider},
    types::{Injectable, Instance},
};

/// A queued registration, applied to every injector the module is loaded into
#[derive(Debug, Clone)]
pub enum Registration {
    Constant { token: String, value: Instance },
    Provider { token: String, provider: Provider },
}
impl Registration {
    pub fn token(&self) -> &str {
        match self {
            Registration::Constant { token, .. } | Registration::Provider { token, .. } => token,
        }
    }
}

/// A named queue of registrations plus the modules it requires
#[derive(Debug, Clone)]
pub struct ModuleDefinition {
    name: String,
    requires: Vec<String>,
    invoke_queue: Vec<Registration>,
}
impl ModuleDefinition {
    fn new(name: String, requires: Vec<String>) -> Self {
        ModuleDefinition {
            name,
            requires,
            invoke_queue: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn requires(&self) -> &[String] {
        &self.requires
    }

    pub fn invoke_queue(&self) -> &[Registration] {
        &self.invoke_queue
    }
}

/// All known module definitions
///
/// Create one registry per independent run and pass it to [create_injector](crate::create_injector).
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: HashMap<String, ModuleDefinition>,
}
impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a module, replacing any previous definition of the same name
    ///
    /// # Example
    /// ```
    /// # use strand_di::{ModuleRegistry, create_injector};
    /// let mut registry = ModuleRegistry::new();
    /// registry.define_module("myModule", &["myOtherModule"]).constant("aConstant", 42);
    /// registry.define_module("myOtherModule", &[]).constant("anotherConstant", 43);
    ///
    /// let injector = create_injector(&registry, &["myModule"], false).unwrap();
    /// assert!(injector.has("anotherConstant"));
    /// ```
    pub fn define_module(&mut self, name: impl Into<String>, requires: &[&str]) -> ModuleHandle<'_> {
        let name = name.into();
        let requires = requires.iter().map(|required| required.to_string()).collect();

        let definition = ModuleDefinition::new(name.clone(), requires);
        let definition = match self.modules.entry(name) {
            Entry::Occupied(mut entry) => {
                tracing::debug!("Replacing definition of module '{}'", entry.key());
                entry.insert(definition);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(definition),
        };
        ModuleHandle { definition }
    }

    /// Looks up a module definition
    pub fn module(&self, name: &str) -> Result<&ModuleDefinition, LoadError> {
        self.modules
            .get(name)
            .ok_or_else(|| LoadError::UnknownModule(name.to_string()))
    }

    /// Returns a handle to queue more registrations on an existing module
    pub fn module_mut(&mut self, name: &str) -> Result<ModuleHandle<'_>, LoadError> {
        match self.modules.get_mut(name) {
            Some(definition) => Ok(ModuleHandle { definition }),
            None => Err(LoadError::UnknownModule(name.to_string())),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Drops every definition
    pub fn reset(&mut self) {
        self.modules.clear();
    }
}

/// Queues registrations on a module
///
/// All methods are chainable and only append to the queue, nothing is checked until the module is loaded.
pub struct ModuleHandle<'a> {
    definition: &'a mut ModuleDefinition,
}
impl ModuleHandle<'_> {
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Registers an already computed value
    pub fn constant<T: Injectable>(self, token: impl Into<String>, value: T) -> Self {
        self.constant_instance(token, Instance::new(value))
    }

    pub fn constant_instance(self, token: impl Into<String>, value: Instance) -> Self {
        self.push(Registration::Constant {
            token: token.into(),
            value,
        })
    }

    /// Registers a provider whose `$get` is called on first request
    pub fn provider(self, token: impl Into<String>, provider: Provider) -> Self {
        self.push(Registration::Provider {
            token: token.into(),
            provider,
        })
    }

    /// Registers `callable` as the `$get` of a provider
    pub fn factory(self, token: impl Into<String>, callable: Callable) -> Self {
        self.provider(token, Provider::new(callable))
    }

    /// Registers a value which is published on first request
    pub fn value<T: Injectable>(self, token: impl Into<String>, value: T) -> Self {
        self.provider(token, Provider::value(value))
    }

    fn push(self, registration: Registration) -> Self {
        self.definition.invoke_queue.push(registration);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queues_registrations_in_order() {
        let mut registry = ModuleRegistry::new();
        registry
            .define_module("myModule", &["dep"])
            .constant("a", 1_i32)
            .value("b", 2_i32)
            .factory("c", Callable::new(|_, _, _| Ok(Instance::new(3_i32))));

        let module = registry.module("myModule").unwrap();
        assert_eq!(module.name(), "myModule");
        assert_eq!(module.requires(), ["dep"]);
        let tokens: Vec<_> = module.invoke_queue().iter().map(Registration::token).collect();
        assert_eq!(tokens, ["a", "b", "c"]);
    }

    #[test]
    fn redefining_replaces_the_module() {
        let mut registry = ModuleRegistry::new();
        registry.define_module("myModule", &["dep"]).constant("a", 1_i32);
        registry.define_module("myModule", &[]);

        let module = registry.module("myModule").unwrap();
        assert!(module.requires().is_empty());
        assert!(module.invoke_queue().is_empty());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn module_mut_appends_to_existing_definition() {
        let mut registry = ModuleRegistry::new();
        registry.define_module("myModule", &[]).constant("a", 1_i32);
        registry.module_mut("myModule").unwrap().constant("b", 2_i32);

        assert_eq!(registry.module("myModule").unwrap().invoke_queue().len(), 2);
        assert!(matches!(
            registry.module_mut("missing"),
            Err(LoadError::UnknownModule(name)) if name == "missing"
        ));
    }

    #[test]
    fn reset_drops_all_modules() {
        let mut registry = ModuleRegistry::new();
        registry.define_module("a", &[]);
        registry.define_module("b", &["a"]);
        registry.reset();

        assert!(registry.is_empty());
        assert!(!registry.contains("a"));
        assert_eq!(
            registry.module("a").unwrap_err(),
            LoadError::UnknownModule("a".into())
        );
    }
}
