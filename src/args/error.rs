use thiserror::Error;

/// Errors raised while building or resolving arguments.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArgError {
    /// Argument declared without an option key.
    #[error("Argument option key must not be empty")]
    EmptyOption,

    /// Explicit flag given but blank.
    #[error("Argument '{option}' has an empty flag")]
    EmptyFlag { option: String },

    /// Default or resolved value cannot be coerced to the argument's kind.
    #[error("Argument '{option}' expects {expected}, got {found}")]
    InvalidValue {
        option: String,
        expected: &'static str,
        found: String,
    },

    /// Host option provider failed to produce effective options.
    #[error("Option provider failed: {message}")]
    Provider { message: String },
}
