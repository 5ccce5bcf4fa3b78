//! Setting registration and the dense-token registry.

use std::collections::HashMap;

use kitbag_core::bug;

use crate::types::Token;

/// A named setting. The name is a non-empty UTF-8 label and is the identity
/// used by the persisted format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting {
    name: String,
}

impl Setting {
    /// Creates a setting; an empty name is a caller bug.
    pub fn new(name: &str) -> Self {
        if name.is_empty() {
            bug!("the name of a setting must not be empty");
        }
        Self {
            name: name.to_owned(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Insertion-ordered registry of settings.
///
/// The token of a setting is its insertion index, so tokens are dense,
/// stable and valid exactly when smaller than [`len`](Self::len).
#[derive(Debug, Clone, Default)]
pub struct SettingCollection {
    settings: Vec<Setting>,
    names: HashMap<String, Token>,
}

impl SettingCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `setting` and returns its token. A duplicate name is a
    /// caller bug.
    pub fn add(&mut self, setting: Setting) -> Token {
        let token = self.settings.len();
        if self.names.contains_key(setting.name()) {
            bug!("duplicated setting name {:?}", setting.name());
        }
        self.names.insert(setting.name().to_owned(), token);
        self.settings.push(setting);
        token
    }

    /// Looks a setting up by name.
    pub fn find_name(&self, name: &str) -> Option<Token> {
        self.names.get(name).copied()
    }

    /// Whether `token` refers to a registered setting.
    pub fn has(&self, token: Token) -> bool {
        token < self.settings.len()
    }

    /// The setting behind `token`; holding a valid token is the caller's
    /// job, so an out-of-range token aborts.
    pub fn get(&self, token: Token) -> &Setting {
        if !self.has(token) {
            bug!("setting token {token} is out of range");
        }
        &self.settings[token]
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    /// Tokens paired with their settings, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Token, &Setting)> {
        self.settings.iter().enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_dense_insertion_indices() {
        let mut settings = SettingCollection::new();
        assert_eq!(settings.add(Setting::new("alpha")), 0);
        assert_eq!(settings.add(Setting::new("beta")), 1);
        assert_eq!(settings.len(), 2);

        assert_eq!(settings.find_name("alpha"), Some(0));
        assert_eq!(settings.find_name("beta"), Some(1));
        assert_eq!(settings.find_name("gamma"), None);

        assert!(settings.has(1));
        assert!(!settings.has(2));
        assert_eq!(settings.get(0).name(), "alpha");
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut settings = SettingCollection::new();
        settings.add(Setting::new("one"));
        settings.add(Setting::new("two"));
        let collected: Vec<(usize, &str)> =
            settings.iter().map(|(token, s)| (token, s.name())).collect();
        assert_eq!(collected, [(0, "one"), (1, "two")]);
    }
}
