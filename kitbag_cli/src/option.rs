//! Option records and the dual-keyed option registry.

use std::collections::HashMap;

use kitbag_core::bug;

use crate::types::Token;

/// Short-name marker of the command-line grammar.
pub(crate) const DASH: &str = "-";
/// Long-name marker of the command-line grammar.
pub(crate) const DOUBLE_DASH: &str = "--";

/// One registered command-line option.
///
/// At least one of the short and the long name must be present. An option
/// with a value hint expects an associated value; without one it is a flag.
#[derive(Debug, Clone)]
pub struct CliOption {
    short_name: Option<String>,
    long_name: Option<String>,
    value_hint: Option<String>,
    description: String,
}

impl CliOption {
    /// Creates an option. A missing pair of names, an empty name or a short
    /// name starting with `-` is a caller bug.
    pub fn new(
        short_name: Option<&str>,
        long_name: Option<&str>,
        value_hint: Option<&str>,
        description: &str,
    ) -> Self {
        if short_name.is_none() && long_name.is_none() {
            bug!("an option needs a short or a long name");
        }
        if let Some(short) = short_name {
            if short.is_empty() || short.starts_with(DASH) {
                bug!("invalid short name {short:?}");
            }
        }
        if let Some(long) = long_name {
            if long.is_empty() {
                bug!("invalid long name {long:?}");
            }
        }
        Self {
            short_name: short_name.map(str::to_owned),
            long_name: long_name.map(str::to_owned),
            value_hint: value_hint.map(str::to_owned),
            description: description.to_owned(),
        }
    }

    /// Whether this option expects an associated value.
    pub fn has_value(&self) -> bool {
        self.value_hint.is_some()
    }

    pub fn short_name(&self) -> Option<&str> {
        self.short_name.as_deref()
    }

    pub fn long_name(&self) -> Option<&str> {
        self.long_name.as_deref()
    }

    pub fn value_hint(&self) -> Option<&str> {
        self.value_hint.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Display form of the names, like `-i --int`.
    pub fn showcase_name(&self) -> String {
        match (self.short_name(), self.long_name()) {
            (Some(short), Some(long)) => format!("{DASH}{short} {DOUBLE_DASH}{long}"),
            (Some(short), None) => format!("{DASH}{short}"),
            (None, Some(long)) => format!("{DOUBLE_DASH}{long}"),
            (None, None) => unreachable!("checked at construction"),
        }
    }

    /// Display form of the value hint, like `<N>`, or empty for flags.
    pub fn showcase_value(&self) -> String {
        match self.value_hint() {
            Some(hint) => format!("<{hint}>"),
            None => String::new(),
        }
    }
}

/// Insertion-ordered option registry with separate short and long lookup
/// maps.
///
/// The two name spaces are distinct sets, but uniqueness is checked across
/// their union: no short name may equal any registered long name and vice
/// versa, so a captured name is never ambiguous.
#[derive(Debug, Clone, Default)]
pub struct OptionCollection {
    options: Vec<CliOption>,
    short_names: HashMap<String, Token>,
    long_names: HashMap<String, Token>,
}

impl OptionCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `option` and returns its token. Any name collision is a
    /// caller bug.
    pub fn add(&mut self, option: CliOption) -> Token {
        let token = self.options.len();
        if let Some(short) = option.short_name() {
            if self.long_names.contains_key(short) {
                bug!("short name {short:?} collides with a registered long name");
            }
            if self.short_names.insert(short.to_owned(), token).is_some() {
                bug!("duplicated short name {short:?}");
            }
        }
        if let Some(long) = option.long_name() {
            if self.short_names.contains_key(long) {
                bug!("long name {long:?} collides with a registered short name");
            }
            if self.long_names.insert(long.to_owned(), token).is_some() {
                bug!("duplicated long name {long:?}");
            }
        }
        self.options.push(option);
        token
    }

    pub fn find_short_name(&self, name: &str) -> Option<Token> {
        self.short_names.get(name).copied()
    }

    pub fn find_long_name(&self, name: &str) -> Option<Token> {
        self.long_names.get(name).copied()
    }

    /// Whether `token` refers to a registered option.
    pub fn has(&self, token: Token) -> bool {
        token < self.options.len()
    }

    /// The option behind `token`; an out-of-range token aborts.
    pub fn get(&self, token: Token) -> &CliOption {
        if !self.has(token) {
            bug!("option token {token} is out of range");
        }
        &self.options[token]
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Tokens paired with their options, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Token, &CliOption)> {
        self.options.iter().enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_dense_and_both_names_resolve() {
        let mut options = OptionCollection::new();
        let int = options.add(CliOption::new(Some("i"), Some("int"), Some("N"), "an int"));
        let verbose = options.add(CliOption::new(None, Some("verbose"), None, "chatty"));

        assert_eq!((int, verbose), (0, 1));
        assert_eq!(options.find_short_name("i"), Some(int));
        assert_eq!(options.find_long_name("int"), Some(int));
        assert_eq!(options.find_long_name("verbose"), Some(verbose));
        assert_eq!(options.find_short_name("verbose"), None);
        assert!(options.get(int).has_value());
        assert!(!options.get(verbose).has_value());
    }

    #[test]
    fn showcase_forms() {
        let both = CliOption::new(Some("i"), Some("int"), Some("N"), "");
        assert_eq!(both.showcase_name(), "-i --int");
        assert_eq!(both.showcase_value(), "<N>");

        let flag = CliOption::new(None, Some("verbose"), None, "");
        assert_eq!(flag.showcase_name(), "--verbose");
        assert_eq!(flag.showcase_value(), "");
    }
}
