use std::collections::HashSet;

use crate::{
    errors::LoadError,
    injector::Injector,
    module::{ModuleRegistry, Registration},
};

/// Creates an injector holding everything registered by `roots` and the modules they require
///
/// Every module's queue runs once, after the queues of the modules it requires.
/// With `strict` set, callables must declare their tokens explicitly.
pub fn create_injector(
    registry: &ModuleRegistry,
    roots: &[&str],
    strict: bool,
) -> Result<Injector, LoadError> {
    let mut loader = ModuleLoader::new(registry, Injector::new(strict));
    for root in roots {
        loader.load(root)?;
    }

    tracing::debug!(
        "Created injector from {} modules (strict: {strict})",
        loader.loaded.len()
    );
    Ok(loader.injector)
}

/// Walks the `requires` edges of a registry, applying each module's queue to one injector
struct ModuleLoader<'a> {
    registry: &'a ModuleRegistry,
    injector: Injector,
    /// Modules already reached, marked before their requirements are walked so cycles terminate
    loaded: HashSet<String>,
}
impl<'a> ModuleLoader<'a> {
    fn new(registry: &'a ModuleRegistry, injector: Injector) -> Self {
        ModuleLoader {
            registry,
            injector,
            loaded: HashSet::new(),
        }
    }

    fn load(&mut self, name: &str) -> Result<(), LoadError> {
        if self.loaded.contains(name) {
            return Ok(());
        }

        let registry = self.registry;
        let module = registry.module(name).inspect_err(|_| {
            tracing::error!("Tried to load an undefined module: '{name}'");
        })?;
        self.loaded.insert(name.to_string());

        for required in module.requires() {
            self.load(required)?;
        }

        tracing::debug!(
            "Loading module '{name}' with {} registrations",
            module.invoke_queue().len()
        );
        for registration in module.invoke_queue() {
            self.apply(registration)?;
        }

        Ok(())
    }

    fn apply(&self, registration: &Registration) -> Result<(), LoadError> {
        match registration {
            Registration::Constant { token, value } => {
                self.injector.constant(token, value.clone())
            }
            Registration::Provider { token, provider } => {
                self.injector.provider(token, provider.clone())
            }
        }
    }
}
