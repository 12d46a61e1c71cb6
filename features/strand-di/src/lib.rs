//! Strand DI resolves named dependencies between modules.
//!
//! The DI consists of three parts:
//! 1. The [ModuleRegistry] where modules queue constants and providers, and name the modules they require
//! 2. [create_injector] which loads a set of root modules, and everything they require, into a new [Injector]
//! 3. The [Injector] which lazily resolves tokens, invokes callables and instantiates constructors
//!
//! # Example
//! ```
//! use strand_di::{create_injector, Callable, Instance, ModuleRegistry, Provider};
//!
//! let mut registry = ModuleRegistry::new();
//! registry
//!     .define_module("myModule", &[])
//!     .constant("a", 1_i32)
//!     .provider(
//!         "b",
//!         Provider::new(
//!             Callable::new(|_, _, args| Ok(Instance::new(args.value::<i32>(0)? + 2)))
//!                 .with_inject(["a"]),
//!         ),
//!     );
//!
//! let injector = create_injector(&registry, &["myModule"], true).unwrap();
//! assert_eq!(*injector.get_as::<i32>("b").unwrap(), 3);
//! ```

pub mod annotator;
pub mod errors;
pub mod factories;
pub mod injector;
pub mod loader;
pub mod module;
pub mod object;
pub mod types;

pub use annotator::{Annotated, Annotation};
pub use errors::{AnnotateError, ArgumentError, InjectError, LoadError, RequireError};
pub use factories::{Callable, Provider};
pub use injector::{CacheSlot, Injector};
pub use loader::create_injector;
pub use module::{ModuleDefinition, ModuleHandle, ModuleRegistry, Registration};
pub use object::{Capabilities, Constructor, DynObject, MethodError};
pub use types::{Args, DynError, InjectToken, Injectable, Instance, Locals};
