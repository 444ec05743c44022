use thiserror::Error;

/// Errors raised while reading a schema from SDL source text.
///
/// Syntax errors are raised where the parser stopped and are reported with the source location.
/// Validation errors are raised once the whole source was read and refer to definitions instead.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum SchemaError {
    #[error("{0}")]
    SyntaxError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

macro_rules! syntax_err {
    ($($arg:tt)*) => {
        Err(crate::schema::sdl::error::SchemaError::SyntaxError(format!($($arg)*)))
    };
}

macro_rules! validation {
    ($($arg:tt)*) => {
        crate::schema::sdl::error::SchemaError::ValidationError(format!($($arg)*))
    };
}

pub(crate) use syntax_err;
pub(crate) use validation;
