//! Errors raised while compiling or rendering templates.

use crate::scope::ScopeError;
use crate::syntax::error::ParseError;
use thiserror::Error;

/// A runtime exception.
#[derive(Debug, Error)]
pub enum Exception {
    /// The template source could not be parsed.
    #[error("error parsing: {0}")]
    Parse(#[from] ParseError),

    /// A scope was used in a way it does not support.
    #[error(transparent)]
    Scope(#[from] ScopeError),

    /// A value that is not a function was called.
    #[error("cannot invoke '{type_name}' as a function")]
    NotCallable {
        type_name: &'static str,
    },

    /// A general error raised by a native function.
    #[error("{0}")]
    Message(String),
}

impl Exception {
    /// Get the scope error behind this exception, if that is what caused it.
    pub fn as_scope_error(&self) -> Option<&ScopeError> {
        match self {
            Exception::Scope(e) => Some(e),
            _ => None,
        }
    }
}

impl From<String> for Exception {
    fn from(message: String) -> Self {
        Exception::Message(message)
    }
}

impl<'s> From<&'s str> for Exception {
    fn from(message: &str) -> Self {
        Exception::Message(message.to_owned())
    }
}
