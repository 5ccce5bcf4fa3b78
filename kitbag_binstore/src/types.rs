//! Shared vocabulary of the settings store.

use std::io;

use thiserror::Error;

pub use kitbag_core::Token;

/// Raw persisted payload of a single setting.
pub type ByteArray = Vec<u8>;

/// Schema version of a configuration; larger means newer.
pub type VersionIdentifier = u64;

/// Recoverable storage failures.
///
/// Contract violations — an invalid token, a codec default that cannot round
/// trip — are not represented here; those abort.
#[derive(Debug, Error)]
pub enum BinstoreError {
    /// The named setting is not part of the bound configuration.
    #[error("no such setting")]
    NoSuchSetting,
    /// A persisted stream assigned the same setting twice.
    #[error("setting {0:?} is assigned more than once")]
    DuplicatedAssign(String),
    /// The persisted version is not acceptable under the chosen strategy.
    #[error("stored version {found} is not loadable into version {current}")]
    BadVersion {
        current: VersionIdentifier,
        found: VersionIdentifier,
    },
    /// The stream could not be read or written, or a record is malformed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Shorthand for results of this crate.
pub type BinstoreResult<T> = Result<T, BinstoreError>;
