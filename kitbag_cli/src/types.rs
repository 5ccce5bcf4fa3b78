//! Shared vocabulary of the argument parser.

use thiserror::Error;

pub use kitbag_core::Token;

/// Recoverable parsing and lookup failures.
///
/// Misusing a token — asking for a flag as a value or the reverse, or using
/// a token from another application — is a contract violation and aborts
/// instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    /// A positional value appeared where an option name was expected.
    #[error("unexpected positional value")]
    UnexpectedValue,
    /// The named option is not part of the application schema.
    #[error("unknown option name")]
    InvalidName,
    /// The same option was captured twice.
    #[error("option assigned more than once")]
    DuplicatedAssign,
    /// A value-carrying option was not followed by its value.
    #[error("option lost its associated value")]
    LostValue,
    /// The requested option was not captured.
    #[error("option was not captured")]
    NotCaptured,
    /// The captured raw text failed validation.
    #[error("captured value failed validation")]
    BadCast,
}

/// Shorthand for results of this crate.
pub type CliResult<T> = Result<T, CliError>;
