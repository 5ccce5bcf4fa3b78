//! A versioned schema: one setting registry plus its version identifier.

use crate::setting::SettingCollection;
use crate::types::VersionIdentifier;

/// Immutable pairing of a schema version and its settings.
///
/// Callers evolving their schema bump the version and decide through
/// [`LoadStrategy`](crate::storage::LoadStrategy) how older files load.
#[derive(Debug, Clone)]
pub struct Configuration {
    version: VersionIdentifier,
    settings: SettingCollection,
}

impl Configuration {
    pub fn new(version: VersionIdentifier, settings: SettingCollection) -> Self {
        Self { version, settings }
    }

    pub fn version(&self) -> VersionIdentifier {
        self.version
    }

    pub fn settings(&self) -> &SettingCollection {
        &self.settings
    }
}
