//! Strand Config provides a registry of typed configs that are published as constants of a module,
//! and read back out of an injector.
//!
//! Strand Config is split into two major parts:
//! 1. ConfigProvider: Used to create the registry of all configs and publish them into a module
//! 2. Config<T>: A wrapper type to resolve and retrieve configs from an injector
//!
//! # Examples
//!
//! ```rust
//! use strand_config::provider::ConfigProvider;
//!
//! #[derive(Clone)]
//! struct AppConfig {
//!     host: String,
//!     port: u16,
//!     app_name: String,
//! }
//!
//! let app_config = AppConfig {
//!     host: "localhost".to_string(),
//!     port: 8080_u16,
//!     app_name: "My Awesome App".to_string(),
//! };
//!
//! let mut config_provider = ConfigProvider::new();
//! if let Err(e) = config_provider.add_config("appConfig", app_config.clone()) {
//!     eprintln!("{e}");
//!     return;
//! }
//!
//! let retrieved_config = match config_provider.get_config::<AppConfig>() {
//!     Ok(c) => c,
//!     Err(e) => {
//!         eprintln!("{e}");
//!         return;
//!     }
//! };
//!
//! assert_eq!(app_config.host, retrieved_config.host);
//! assert_eq!(app_config.port, retrieved_config.port);
//! assert_eq!(app_config.app_name, retrieved_config.app_name);
//! ```
//!
//! Strand Config consists of the following components:
//!
//! 1. Config - for resolving a published config from an injector
//! 2. Provider - for creating a registry of configs, adding, retrieving and publishing configs
//! 3. Errors - for config errors

pub mod config;
pub mod errors;
pub mod provider;

pub use config::Config;
pub use errors::{GetConfigError, RegisterConfigError};
pub use provider::ConfigProvider;
