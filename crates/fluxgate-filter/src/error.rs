//! Build-time error types.
//!
//! All malformations are reported while a filter spec is being compiled;
//! nothing in this module is reachable from the evaluation hot path, which
//! by contract never fails (see [`crate::filter`]).

use thiserror::Error;

/// Errors that can occur while compiling a filter spec.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The operator symbol is not in the registry.
    #[error("unknown filter operator '{0}'")]
    UnknownOperator(String),

    /// The spec document does not have the one-entry `{field: "+op/..."}`
    /// shape.
    #[error("malformed filter spec: {0}")]
    Shape(String),

    /// The operator spec carries the wrong number of `/`-separated tokens.
    #[error("operator '{op}' expects {expected} token(s), got {got}")]
    Arity {
        op: &'static str,
        expected: usize,
        got: usize,
    },

    /// A token failed validation or pre-compilation (regex, integer, CIDR).
    /// Always carries the offending token text.
    #[error("operator '{op}': invalid token '{token}': {cause}")]
    Value {
        op: &'static str,
        token: String,
        cause: String,
    },
}

impl BuildError {
    pub(crate) fn shape(detail: impl Into<String>) -> Self {
        BuildError::Shape(detail.into())
    }

    pub(crate) fn value(op: &'static str, token: &str, cause: impl Into<String>) -> Self {
        BuildError::Value {
            op,
            token: token.to_string(),
            cause: cause.into(),
        }
    }
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, BuildError>;
