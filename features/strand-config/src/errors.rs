/// Errors when trying to acquire a config
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GetConfigError {
    /// The required Config is not known
    #[error("The required Config type '{0}' is not known")]
    Missing(&'static str),
}

/// Errors when trying to register a config
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RegisterConfigError {
    /// A config of the same type is already registered
    #[error("The Config type '{0}' is already registered")]
    AlreadyRegistered(&'static str),
    /// Another config is already published under the token
    #[error("The token '{0}' is already used by another Config")]
    TokenTaken(String),
}
