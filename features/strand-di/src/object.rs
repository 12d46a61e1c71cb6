use std::{
    any::type_name,
    collections::HashMap,
    fmt::Debug,
    sync::Arc,
};

use crate::{
    annotator::{Annotated, Annotation},
    injector::Injector,
    types::{Args, DynError, Injectable, InjectToken, Instance},
};

/// A method shared by every object built from the same [Capabilities]
pub type MethodFn = dyn Fn(&DynObject) -> Result<Instance, DynError> + Send + Sync + 'static;

/// Initializes a freshly allocated object, given the injector which instantiates it
///
/// Returning `Some` replaces the allocated object as the result of the construction.
pub type InitFn = dyn Fn(&Injector, &mut DynObject, Args) -> Result<Option<Instance>, DynError>
    + Send
    + Sync
    + 'static;

/// Set of methods every object built by a [Constructor] can call
#[derive(Default)]
pub struct Capabilities {
    methods: HashMap<String, Arc<MethodFn>>,
    parent: Option<Arc<Capabilities>>,
}
impl Debug for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut methods: Vec<_> = self.methods.keys().collect();
        methods.sort();
        f.debug_struct("Capabilities")
            .field("methods", &methods)
            .field("parent", &self.parent)
            .finish()
    }
}
impl Capabilities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capabilities which fall back to `parent` for unknown methods
    pub fn extending(parent: Arc<Capabilities>) -> Self {
        Capabilities {
            methods: HashMap::new(),
            parent: Some(parent),
        }
    }

    pub fn method<F>(mut self, name: impl Into<String>, method: F) -> Self
    where
        F: Fn(&DynObject) -> Result<Instance, DynError> + Send + Sync + 'static,
    {
        self.methods.insert(name.into(), Arc::new(method));
        self
    }

    /// Looks up a method, walking up the parents
    pub fn lookup(&self, name: &str) -> Option<&Arc<MethodFn>> {
        match self.methods.get(name) {
            Some(method) => Some(method),
            None => self.parent.as_ref().and_then(|parent| parent.lookup(name)),
        }
    }
}

/// Errors when calling a method of a [DynObject]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MethodError {
    #[error("Object has no method '{0}'")]
    NoSuchMethod(String),
    #[error("Method '{method}' returned a '{actual}', expected '{expected}'")]
    Downcast {
        method: String,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Object allocated by `instantiate`
pub struct DynObject {
    capabilities: Arc<Capabilities>,
    fields: HashMap<String, Instance>,
}
impl Debug for DynObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynObject")
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}
impl DynObject {
    pub fn new(capabilities: Arc<Capabilities>) -> Self {
        DynObject {
            capabilities,
            fields: HashMap::new(),
        }
    }

    pub fn capabilities(&self) -> &Arc<Capabilities> {
        &self.capabilities
    }

    pub fn set<T: Injectable>(&mut self, name: impl Into<String>, value: T) {
        self.fields.insert(name.into(), Instance::new(value));
    }

    pub fn set_instance(&mut self, name: impl Into<String>, value: Instance) {
        self.fields.insert(name.into(), value);
    }

    pub fn field(&self, name: &str) -> Option<&Instance> {
        self.fields.get(name)
    }

    pub fn field_as<T: Injectable>(&self, name: &str) -> Option<Arc<T>> {
        self.field(name)?.downcast().ok()
    }

    pub fn responds_to(&self, method: &str) -> bool {
        self.capabilities.lookup(method).is_some()
    }

    /// Calls a method of the object's capabilities
    pub fn call(&self, method: &str) -> Result<Instance, DynError> {
        let Some(method_fn) = self.capabilities.lookup(method) else {
            return Err(MethodError::NoSuchMethod(method.to_string()).into());
        };
        method_fn(self)
    }

    /// Calls a method and downcasts its result
    pub fn call_as<T: Injectable>(&self, method: &str) -> Result<Arc<T>, DynError> {
        self.call(method)?.downcast().map_err(|actual| {
            MethodError::Downcast {
                method: method.to_string(),
                expected: type_name::<T>(),
                actual,
            }
            .into()
        })
    }
}

/// A constructor whose arguments are resolved by an injector
#[derive(Clone)]
pub struct Constructor {
    annotation: Annotation,
    name: Option<String>,
    capabilities: Arc<Capabilities>,
    init: Arc<InitFn>,
}
impl Debug for Constructor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Constructor")
            .field("name", &self.name)
            .field("annotation", &self.annotation)
            .field("capabilities", &self.capabilities)
            .finish()
    }
}
impl Constructor {
    /// A constructor without declared parameters and no capabilities
    pub fn new<F>(init: F) -> Self
    where
        F: Fn(&Injector, &mut DynObject, Args) -> Result<Option<Instance>, DynError>
            + Send
            + Sync
            + 'static,
    {
        Self::from_params("", init)
    }

    /// A constructor whose tokens are parsed from its declared parameter list
    pub fn from_params<F>(params: impl Into<String>, init: F) -> Self
    where
        F: Fn(&Injector, &mut DynObject, Args) -> Result<Option<Instance>, DynError>
            + Send
            + Sync
            + 'static,
    {
        Constructor {
            annotation: Annotation::from_params(params),
            name: None,
            capabilities: Arc::new(Capabilities::new()),
            init: Arc::new(init),
        }
    }

    pub fn array<T: Into<InjectToken>>(
        tokens: impl IntoIterator<Item = T>,
        constructor: Constructor,
    ) -> Self {
        let mut constructor = constructor;
        constructor.annotation.array = Some(tokens.into_iter().map(Into::into).collect());
        constructor
    }

    pub fn with_inject<T: Into<InjectToken>>(mut self, tokens: impl IntoIterator<Item = T>) -> Self {
        self.annotation.inject = Some(tokens.into_iter().map(Into::into).collect());
        self
    }

    /// Every constructed object can call the methods of `capabilities`
    pub fn with_capabilities(mut self, capabilities: Arc<Capabilities>) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn capabilities(&self) -> &Arc<Capabilities> {
        &self.capabilities
    }

    /// Allocates an object carrying the capabilities, then runs the initializer on it
    pub fn construct(&self, injector: &Injector, args: Args) -> Result<Instance, DynError> {
        let mut object = DynObject::new(self.capabilities.clone());
        match (self.init)(injector, &mut object, args)? {
            Some(replacement) => Ok(replacement),
            None => Ok(Instance::new(object)),
        }
    }
}
impl Annotated for Constructor {
    fn annotation(&self) -> &Annotation {
        &self.annotation
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
