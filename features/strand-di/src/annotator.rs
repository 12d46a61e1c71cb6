//! Extraction of the dependency tokens of a callable.
//!
//! A callable declares its tokens in one of three ways, checked in this order:
//! 1. Array form - tokens listed ahead of the function
//! 2. Attached metadata - tokens attached to the function itself
//! 3. Implicit - tokens parsed from the declared parameter list source
//!
//! Implicit mode is disabled in strict mode.

use std::sync::LazyLock;

use regex::Regex;

use crate::{errors::AnnotateError, types::InjectToken};

// `//` comments run to the end of the line, `/* */` comments may span lines
static STRIP_COMMENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"//[^\n]*|(?s:/\*.*?\*/)").expect("STRIP_COMMENTS: invalid regex pattern")
});

/// Everything a callable declares about its dependencies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    /// Array form tokens
    pub array: Option<Vec<InjectToken>>,
    /// Tokens attached as metadata
    pub inject: Option<Vec<InjectToken>>,
    /// Declared parameter list, e.g. `"a, /*b,*/ c"`
    pub params: String,
}
impl Annotation {
    pub fn from_params(params: impl Into<String>) -> Self {
        Annotation {
            params: params.into(),
            ..Default::default()
        }
    }

    /// True if the tokens do not have to be parsed from the parameter list
    pub fn is_explicit(&self) -> bool {
        self.array.is_some() || self.inject.is_some()
    }
}

/// Anything that declares dependency tokens
pub trait Annotated {
    fn annotation(&self) -> &Annotation;

    /// Name used in error messages
    fn name(&self) -> Option<&str> {
        None
    }
}

/// Returns the ordered tokens of `target`
pub fn annotate(target: &impl Annotated, strict: bool) -> Result<Vec<InjectToken>, AnnotateError> {
    let annotation = target.annotation();

    if let Some(tokens) = &annotation.array {
        return Ok(tokens.clone());
    }
    if let Some(tokens) = &annotation.inject {
        return Ok(tokens.clone());
    }

    if strict {
        let name = target.name().unwrap_or("anonymous").to_string();
        tracing::error!("Refusing to infer the tokens of '{name}' in strict mode");
        return Err(AnnotateError::MissingAnnotation(name));
    }

    Ok(parse_params(&annotation.params)
        .into_iter()
        .map(InjectToken::Name)
        .collect())
}

/// Parses token names out of a parameter list
pub fn parse_params(params: &str) -> Vec<String> {
    let stripped = STRIP_COMMENTS.replace_all(params, "");

    stripped
        .split(',')
        .map(str::trim)
        .filter(|param| !param.is_empty())
        .map(strip_surrounding_underscores)
        .map(str::to_string)
        .collect()
}

/// `_name_` becomes `name`, a single sided underscore is kept
fn strip_surrounding_underscores(param: &str) -> &str {
    match param
        .strip_prefix('_')
        .and_then(|rest| rest.strip_suffix('_'))
    {
        Some(inner) if !inner.is_empty() => inner,
        _ => param,
    }
}
