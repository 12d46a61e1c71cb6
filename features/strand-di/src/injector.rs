use std::{any::type_name, cell::RefCell, collections::HashMap, fmt::Debug, sync::Arc};

use crate::{
    annotator::{self, Annotated},
    errors::{AnnotateError, InjectError, LoadError, RequireError},
    factories::{Callable, Provider},
    object::Constructor,
    types::{Args, Injectable, InjectToken, Instance, Locals},
};

/// Token names the instance cache cannot hold
pub const RESERVED_TOKENS: &[&str] = &["hasOwnProperty"];

/// State of a token in the instance cache
#[derive(Debug, Clone)]
pub enum CacheSlot {
    /// Not requested yet, or the last attempt failed
    Empty,
    /// Resolution has started and not yet finished
    InProgress,
    Ready(Instance),
}

/// One resolution session
///
/// Owns the registered providers and every value they produced.
/// Values are created lazily on first request and cached for the lifetime of the injector.
pub struct Injector {
    strict: bool,
    providers: RefCell<HashMap<String, Provider>>,
    instances: RefCell<HashMap<String, CacheSlot>>,
    /// Tokens currently in progress, in resolution order
    path: RefCell<Vec<String>>,
}
impl Debug for Injector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_struct("Injector");
        map.field("strict", &self.strict);
        for (token, slot) in self.instances.borrow().iter() {
            let val = match slot {
                CacheSlot::Empty => "empty",
                CacheSlot::InProgress => "in progress",
                CacheSlot::Ready(_) => "ready",
            };
            map.field(token, &val);
        }
        for token in self.providers.borrow().keys() {
            if !self.instances.borrow().contains_key(token) {
                map.field(token, &"provided");
            }
        }
        map.finish()
    }
}

// Registration interface, only used while loading modules
impl Injector {
    pub(crate) fn new(strict: bool) -> Self {
        Injector {
            strict,
            providers: RefCell::new(HashMap::new()),
            instances: RefCell::new(HashMap::new()),
            path: RefCell::new(Vec::new()),
        }
    }

    /// Stores an already computed value, no provider is involved
    pub(crate) fn constant(&self, token: &str, value: Instance) -> Result<(), LoadError> {
        check_token(token)?;
        tracing::trace!("Registering constant '{token}' ({})", value.type_name);
        self.instances
            .borrow_mut()
            .insert(token.to_string(), CacheSlot::Ready(value));
        Ok(())
    }

    /// Stores a provider, nothing is instantiated until the token is requested
    pub(crate) fn provider(&self, token: &str, provider: Provider) -> Result<(), LoadError> {
        check_token(token)?;
        tracing::trace!("Registering provider for '{token}'");
        self.providers
            .borrow_mut()
            .insert(token.to_string(), provider);
        Ok(())
    }
}

fn check_token(token: &str) -> Result<(), LoadError> {
    if RESERVED_TOKENS.contains(&token) {
        tracing::error!("Tried to register the reserved token '{token}'");
        return Err(LoadError::ReservedToken(token.to_string()));
    }
    Ok(())
}

impl Injector {
    /// True if implicit token inference is disabled
    pub fn strict(&self) -> bool {
        self.strict
    }

    /// True if the token has a value, is being resolved, or has a provider
    pub fn has(&self, token: &str) -> bool {
        matches!(
            self.slot(token),
            CacheSlot::Ready(_) | CacheSlot::InProgress
        ) || self.providers.borrow().contains_key(token)
    }

    /// Returns the value of a token, instantiating it through its provider on first request
    pub fn get(&self, token: &str) -> Result<Instance, InjectError> {
        tracing::trace!("Requiring '{token}'");
        match self.slot(token) {
            CacheSlot::Ready(instance) => return Ok(instance),
            CacheSlot::InProgress => {
                let chain: Vec<String> = std::iter::once(token.to_string())
                    .chain(self.path.borrow().iter().rev().cloned())
                    .collect();
                tracing::error!("Circular dependency while requiring '{token}'");
                return Err(RequireError::CircularDependency { chain }.into());
            }
            CacheSlot::Empty => {}
        }

        // Clone the provider out, so no borrow is held while it runs
        let Some(provider) = self.providers.borrow().get(token).cloned() else {
            tracing::error!("Tried to require an unregistered token: '{token}'");
            return Err(RequireError::UnknownToken(token.to_string()).into());
        };

        self.set_slot(token, CacheSlot::InProgress);
        self.path.borrow_mut().push(token.to_string());

        let result = self.invoke(provider.getter(), None, None);

        self.path.borrow_mut().pop();
        match result {
            Ok(instance) => {
                tracing::debug!("Constructed '{token}' ({})", instance.type_name);
                self.set_slot(token, CacheSlot::Ready(instance.clone()));
                Ok(instance)
            }
            Err(err) => {
                // Failures are not cached, the next request retries the provider
                self.set_slot(token, CacheSlot::Empty);
                Err(err)
            }
        }
    }

    /// Returns the value of a token as `T`
    pub fn get_as<T: Injectable>(&self, token: &str) -> Result<Arc<T>, InjectError> {
        self.get(token)?.downcast().map_err(|actual_type| {
            RequireError::DowncastFailed {
                required_type: type_name::<T>(),
                actual_type,
            }
            .into()
        })
    }

    /// Calls `callable` with its tokens resolved
    ///
    /// Entries in `locals` take precedence over registered tokens.
    pub fn invoke(
        &self,
        callable: &Callable,
        this: Option<&Instance>,
        locals: Option<&Locals>,
    ) -> Result<Instance, InjectError> {
        let args = self.resolve_args(callable, locals)?;
        callable
            .call(self, this, args)
            .map_err(InjectError::from_callable)
    }

    /// Builds a new object through `constructor` with its tokens resolved
    ///
    /// The object carries the constructor's capabilities, unless the constructor returns its own value.
    pub fn instantiate(
        &self,
        constructor: &Constructor,
        locals: Option<&Locals>,
    ) -> Result<Instance, InjectError> {
        let args = self.resolve_args(constructor, locals)?;
        constructor
            .construct(self, args)
            .map_err(InjectError::from_callable)
    }

    /// Returns the ordered tokens of `target`
    pub fn annotate(&self, target: &impl Annotated) -> Result<Vec<InjectToken>, AnnotateError> {
        annotator::annotate(target, self.strict)
    }

    fn resolve_args(
        &self,
        target: &impl Annotated,
        locals: Option<&Locals>,
    ) -> Result<Args, InjectError> {
        let tokens = self.annotate(target)?;

        // Every token must be a name before anything is resolved
        let names = tokens
            .into_iter()
            .map(|token| match token {
                InjectToken::Name(name) => Ok(name),
                InjectToken::Invalid(repr) => Err(InjectError::NonStringToken(repr)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        names
            .iter()
            .map(|name| match locals.and_then(|locals| locals.get(name)) {
                Some(local) => Ok(local.clone()),
                None => self.get(name),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Args::new)
    }

    fn slot(&self, token: &str) -> CacheSlot {
        self.instances
            .borrow()
            .get(token)
            .cloned()
            .unwrap_or(CacheSlot::Empty)
    }

    fn set_slot(&self, token: &str, slot: CacheSlot) {
        let mut instances = self.instances.borrow_mut();
        match slot {
            CacheSlot::Empty => {
                instances.remove(token);
            }
            slot => {
                instances.insert(token.to_string(), slot);
            }
        }
    }
}
