use std::{fmt::Debug, sync::Arc};

use crate::{
    annotator::{Annotated, Annotation},
    injector::Injector,
    types::{Args, DynError, Injectable, InjectToken, Instance},
};

/// Body of a [Callable]
///
/// Receives the injector running it, the optional `this` value and the resolved arguments.
/// Errors of nested injector calls can be returned with `?` and surface unchanged.
pub type CallableFn = dyn Fn(&Injector, Option<&Instance>, Args) -> Result<Instance, DynError>
    + Send
    + Sync
    + 'static;

/// A function whose arguments are resolved by an injector
#[derive(Clone)]
pub struct Callable {
    annotation: Annotation,
    name: Option<String>,
    body: Arc<CallableFn>,
}
impl Debug for Callable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callable")
            .field("name", &self.name)
            .field("annotation", &self.annotation)
            .finish()
    }
}

impl Callable {
    /// A callable without declared parameters
    pub fn new<F>(body: F) -> Self
    where
        F: Fn(&Injector, Option<&Instance>, Args) -> Result<Instance, DynError> + Send + Sync + 'static,
    {
        Self::from_params("", body)
    }

    /// A callable whose tokens are parsed from its declared parameter list
    ///
    /// ```
    /// # use strand_di::{Callable, Instance};
    /// let add = Callable::from_params("a, /* unused, */ b", |_, _, args| {
    ///     Ok(Instance::new(args.value::<i32>(0)? + args.value::<i32>(1)?))
    /// });
    /// ```
    pub fn from_params<F>(params: impl Into<String>, body: F) -> Self
    where
        F: Fn(&Injector, Option<&Instance>, Args) -> Result<Instance, DynError> + Send + Sync + 'static,
    {
        Callable {
            annotation: Annotation::from_params(params),
            name: None,
            body: Arc::new(body),
        }
    }

    /// Array form: the tokens listed ahead of the function take precedence over anything else
    pub fn array<T: Into<InjectToken>>(
        tokens: impl IntoIterator<Item = T>,
        callable: Callable,
    ) -> Self {
        let mut callable = callable;
        callable.annotation.array = Some(tokens.into_iter().map(Into::into).collect());
        callable
    }

    /// Attaches explicit tokens to the callable
    pub fn with_inject<T: Into<InjectToken>>(mut self, tokens: impl IntoIterator<Item = T>) -> Self {
        self.annotation.inject = Some(tokens.into_iter().map(Into::into).collect());
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Calls the body with already resolved arguments
    pub fn call(
        &self,
        injector: &Injector,
        this: Option<&Instance>,
        args: Args,
    ) -> Result<Instance, DynError> {
        (self.body)(injector, this, args)
    }
}
impl Annotated for Callable {
    fn annotation(&self) -> &Annotation {
        &self.annotation
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Lazily produces the value of a token through its `$get` callable
#[derive(Debug, Clone)]
pub struct Provider {
    get: Callable,
}
impl Provider {
    pub fn new(get: Callable) -> Self {
        Provider { get }
    }

    /// A provider which hands out an existing value on first request
    pub fn value<T: Injectable>(value: T) -> Self {
        let instance = Instance::new(value);
        Provider::new(Callable::new(move |_, _, _| Ok(instance.clone())).with_inject(
            Vec::<InjectToken>::new(),
        ))
    }

    /// The `$get` callable
    pub fn getter(&self) -> &Callable {
        &self.get
    }
}
