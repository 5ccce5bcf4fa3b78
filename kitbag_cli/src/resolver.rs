//! Environment-variable capture mirroring the option parser.
//!
//! Variables have no short/long distinction: lookup is by name only. A
//! registered variable present with an empty value is captured as a flag; a
//! non-empty value is captured as a value and read through the same
//! [`Validator`] trait the option parser uses.

use std::collections::HashMap;

use kitbag_core::bug;
use log::trace;

use crate::application::Application;
use crate::types::{CliError, CliResult, Token};
use crate::validator::Validator;

/// Captured environment variables for an application's registered set.
#[derive(Debug, Clone)]
pub struct Resolver {
    values: HashMap<Token, Option<String>>,
}

impl Resolver {
    /// Captures from caller-provided `(name, value)` pairs, used verbatim.
    /// Later pairs override earlier ones with the same name.
    pub fn from_pairs<'a, I>(app: &Application, pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let variables = app.variables();
        let mut values = HashMap::new();
        for (name, value) in pairs {
            let Some(token) = variables.find_name(name) else {
                continue;
            };
            let capture = if value.is_empty() {
                None
            } else {
                Some(value.to_owned())
            };
            values.insert(token, capture);
        }
        Self { values }
    }

    /// Captures from the process environment.
    ///
    /// Entries that are not valid UTF-8 cannot match a registered variable
    /// name and are skipped.
    pub fn from_env(app: &Application) -> Self {
        let pairs: Vec<(String, String)> = std::env::vars_os()
            .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
            .collect();
        trace!("resolving {} registered variables against the environment", app.variables().len());
        Self::from_pairs(app, pairs.iter().map(|(name, value)| (name.as_str(), value.as_str())))
    }

    /// Raw membership check; does not distinguish flag and value variables.
    pub fn has(&self, token: Token) -> bool {
        self.values.contains_key(&token)
    }

    /// Whether the flag variable `token` was present.
    ///
    /// Asking for a captured value variable this way is a caller bug.
    pub fn get_flag(&self, token: Token) -> bool {
        match self.values.get(&token) {
            None => false,
            Some(None) => true,
            Some(Some(_)) => bug!("variable {token} carries a value, use get_value()"),
        }
    }

    /// Validated value of the value variable `token`.
    ///
    /// Asking for a captured flag variable this way is a caller bug.
    pub fn get_value<V: Validator>(&self, token: Token, validator: &V) -> CliResult<V::Output> {
        let raw = match self.values.get(&token) {
            None => return Err(CliError::NotCaptured),
            Some(None) => bug!("variable {token} is a flag, use get_flag()"),
            Some(Some(raw)) => raw,
        };
        validator.validate(raw).ok_or(CliError::BadCast)
    }
}
