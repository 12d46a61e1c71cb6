use thiserror::Error;

use crate::types::DynError;

/// Errors while loading modules into a new injector
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// A root or required module has no definition
    #[error("Module '{0}' is not available, did you define it?")]
    UnknownModule(String),
    /// A registration used a name the instance cache reserves
    #[error("'{0}' is not a valid token name")]
    ReservedToken(String),
}

/// Errors when trying to require a certain token
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequireError {
    /// Neither a value nor a provider is registered for the token
    #[error("Unknown provider: '{0}'")]
    UnknownToken(String),
    /// The token is already being resolved further up the chain
    ///
    /// The chain starts with the requested token, followed by all tokens in progress, most recent first.
    /// Read `<-` as "required by": `a <- c <- b <- a` means `a` was required by `c`,
    /// which was required by `b`, which was required by the first request for `a`.
    #[error("Circular dependency found: {}", .chain.join(" <- "))]
    CircularDependency { chain: Vec<String> },

    #[error("Failed to downcast, required: '{required_type}' actual: '{actual_type}'")]
    DowncastFailed {
        required_type: &'static str,
        actual_type: &'static str,
    },
}

/// Errors while extracting the tokens of a callable
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnnotateError {
    #[error("'{0}' is not using explicit annotation and cannot be invoked in strict mode")]
    MissingAnnotation(String),
}

#[derive(Error, Debug)]
pub enum InjectError {
    /// Could not require a token
    #[error(transparent)]
    Require(#[from] RequireError),
    /// Could not extract the tokens of the callable
    #[error(transparent)]
    Annotate(#[from] AnnotateError),
    /// An annotation entry is not a token name
    #[error("Incorrect injection token! Expected a string, got {0}")]
    NonStringToken(String),
    /// The callable itself failed, its error is kept as is
    #[error("{0}")]
    Factory(DynError),
}
impl InjectError {
    /// Lifts an error returned by a callable
    ///
    /// Injection errors raised inside a callable are unboxed so they surface unchanged.
    pub(crate) fn from_callable(error: DynError) -> Self {
        match error.downcast::<InjectError>() {
            Ok(inner) => *inner,
            Err(error) => InjectError::Factory(error),
        }
    }

    /// The error returned by the callable, if this is a pass-through failure
    pub fn factory_error(&self) -> Option<&DynError> {
        match self {
            InjectError::Factory(error) => Some(error),
            _ => None,
        }
    }
}

/// Errors when reading resolved arguments inside a callable
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("No argument at position {0}")]
    Missing(usize),
    #[error("Argument {index} is a '{actual}', expected '{expected}'")]
    Downcast {
        index: usize,
        expected: &'static str,
        actual: &'static str,
    },
}
