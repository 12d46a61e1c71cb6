use std::{
    any::{type_name, Any},
    collections::HashMap,
    fmt::Debug,
    sync::Arc,
};

use crate::errors::ArgumentError;

/// Boxed error returned by user supplied callables
pub type DynError = Box<dyn std::error::Error + Send + Sync>;

/// Values handed out by an injector may be shared freely,
/// so anything injectable needs to be Send + Sync + 'static
pub trait Injectable: Send + Sync + 'static {}
impl<T: Send + Sync + 'static> Injectable for T {}

/// Values which override token resolution for a single `invoke`/`instantiate` call
pub type Locals = HashMap<String, Instance>;

/// A type erased, reference counted value
#[derive(Clone)]
pub struct Instance {
    pub type_name: &'static str,
    pub instance: Arc<dyn Any + Send + Sync + 'static>,
}
impl Debug for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Instance").field(&self.type_name).finish()
    }
}

impl Instance {
    pub fn new<ExistingInstance: Injectable>(instance: ExistingInstance) -> Self {
        Instance {
            type_name: type_name::<ExistingInstance>(),
            instance: Arc::new(instance),
        }
    }

    /// Wraps an already shared value without cloning it
    pub fn from_arc<T: Injectable>(instance: Arc<T>) -> Self {
        Instance {
            type_name: type_name::<T>(),
            instance,
        }
    }

    pub fn downcast<T: Injectable>(&self) -> Result<Arc<T>, &'static str> {
        match Arc::downcast::<T>(self.instance.clone()) {
            Ok(downcasted) => Ok(downcasted),
            Err(_) => Err(self.type_name),
        }
    }

    pub fn is<T: Injectable>(&self) -> bool {
        self.instance.is::<T>()
    }

    /// True if both instances point at the same allocation
    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.instance, &other.instance)
    }
}

/// One entry of an annotation list
///
/// Annotation lists are built by callers, so they may contain things which are not token names.
/// Those are kept (by their debug rendering) and rejected when the callable is invoked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InjectToken {
    Name(String),
    Invalid(String),
}
impl InjectToken {
    pub fn as_name(&self) -> Option<&str> {
        match self {
            InjectToken::Name(name) => Some(name),
            InjectToken::Invalid(_) => None,
        }
    }
}
impl std::fmt::Display for InjectToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InjectToken::Name(name) => f.write_str(name),
            InjectToken::Invalid(repr) => f.write_str(repr),
        }
    }
}
impl PartialEq<&str> for InjectToken {
    fn eq(&self, other: &&str) -> bool {
        self.as_name() == Some(*other)
    }
}
impl From<&str> for InjectToken {
    fn from(value: &str) -> Self {
        InjectToken::Name(value.to_string())
    }
}
impl From<String> for InjectToken {
    fn from(value: String) -> Self {
        InjectToken::Name(value)
    }
}
impl From<&String> for InjectToken {
    fn from(value: &String) -> Self {
        InjectToken::Name(value.clone())
    }
}
macro_rules! invalid_token_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for InjectToken {
                fn from(value: $ty) -> Self {
                    InjectToken::Invalid(format!("{value:?}"))
                }
            }
        )*
    };
}
invalid_token_from!(i32, i64, u32, u64, usize, f32, f64, bool);

/// Resolved arguments of a callable, in declared order
#[derive(Debug, Clone, Default)]
pub struct Args(Vec<Instance>);
impl Args {
    pub(crate) fn new(args: Vec<Instance>) -> Self {
        Args(args)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn instance(&self, index: usize) -> Result<&Instance, ArgumentError> {
        self.0.get(index).ok_or(ArgumentError::Missing(index))
    }

    /// Downcasts the argument at `index`
    pub fn get<T: Injectable>(&self, index: usize) -> Result<Arc<T>, ArgumentError> {
        self.instance(index)?
            .downcast()
            .map_err(|actual| ArgumentError::Downcast {
                index,
                expected: type_name::<T>(),
                actual,
            })
    }

    /// Downcasts and clones the argument at `index`
    pub fn value<T: Injectable + Clone>(&self, index: usize) -> Result<T, ArgumentError> {
        self.get::<T>(index).map(|value| (*value).clone())
    }

    pub fn into_vec(self) -> Vec<Instance> {
        self.0
    }
}
impl IntoIterator for Args {
    type Item = Instance;
    type IntoIter = std::vec::IntoIter<Instance>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
