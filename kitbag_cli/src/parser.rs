//! The argument-capture state machine and its typed accessors.

use std::collections::HashMap;

use kitbag_core::bug;

use crate::application::Application;
use crate::option::{DASH, DOUBLE_DASH};
use crate::types::{CliError, CliResult, Token};
use crate::validator::Validator;

/// A command-line argument classified by its leading dashes.
enum Argument<'a> {
    /// `--name`, with the body after the double dash.
    LongName(&'a str),
    /// `-x`, with the body after the dash.
    ShortName(&'a str),
    /// Anything else.
    Value(&'a str),
}

impl<'a> Argument<'a> {
    fn classify(raw: &'a str) -> Self {
        if let Some(body) = raw.strip_prefix(DOUBLE_DASH) {
            Argument::LongName(body)
        } else if let Some(body) = raw.strip_prefix(DASH) {
            Argument::ShortName(body)
        } else {
            Argument::Value(raw)
        }
    }
}

/// Capture machine state: expecting an option name, or holding the token of
/// a value option whose value is still owed.
#[derive(Clone, Copy)]
enum State {
    Normal,
    WaitingValue(Token),
}

/// Captured command-line options.
///
/// Built by running the capture machine over an argument sequence. Flag
/// options capture as `None`, value options as `Some(text)`; the machine
/// guarantees at-most-once assignment and that every captured name is part
/// of the schema.
#[derive(Debug, Clone)]
pub struct Parser {
    values: HashMap<Token, Option<String>>,
}

impl Parser {
    /// Captures from an explicit argument sequence. The first element is
    /// the program path and is skipped.
    pub fn from_args<I, S>(app: &Application, args: I) -> CliResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let options = app.options();
        let mut state = State::Normal;
        let mut values: HashMap<Token, Option<String>> = HashMap::new();

        for arg in args.into_iter().skip(1) {
            let arg = arg.as_ref();
            match state {
                State::Normal => {
                    let token = match Argument::classify(arg) {
                        Argument::Value(_) => return Err(CliError::UnexpectedValue),
                        Argument::LongName(body) => {
                            options.find_long_name(body).ok_or(CliError::InvalidName)?
                        }
                        Argument::ShortName(body) => {
                            options.find_short_name(body).ok_or(CliError::InvalidName)?
                        }
                    };
                    if values.contains_key(&token) {
                        return Err(CliError::DuplicatedAssign);
                    }
                    if options.get(token).has_value() {
                        state = State::WaitingValue(token);
                    } else {
                        values.insert(token, None);
                    }
                }
                State::WaitingValue(token) => match Argument::classify(arg) {
                    // Another option name means the previous option lost
                    // its value.
                    Argument::LongName(_) | Argument::ShortName(_) => {
                        return Err(CliError::LostValue);
                    }
                    Argument::Value(text) => {
                        values.insert(token, Some(text.to_owned()));
                        state = State::Normal;
                    }
                },
            }
        }

        if matches!(state, State::WaitingValue(_)) {
            return Err(CliError::LostValue);
        }
        Ok(Self { values })
    }

    /// Captures from the process arguments.
    pub fn from_env(app: &Application) -> CliResult<Self> {
        Self::from_args(app, std::env::args())
    }

    /// Raw membership check. Makes no distinction between flag and value
    /// options; prefer [`get_flag`](Self::get_flag) and
    /// [`get_value`](Self::get_value) for ordinary access.
    pub fn has(&self, token: Token) -> bool {
        self.values.contains_key(&token)
    }

    /// Whether the flag option `token` was given.
    ///
    /// Asking for a captured value option this way is a caller bug.
    pub fn get_flag(&self, token: Token) -> bool {
        match self.values.get(&token) {
            None => false,
            Some(None) => true,
            Some(Some(_)) => bug!("option {token} carries a value, use get_value()"),
        }
    }

    /// Validated value of the value option `token`.
    ///
    /// Asking for a captured flag option this way is a caller bug.
    pub fn get_value<V: Validator>(&self, token: Token, validator: &V) -> CliResult<V::Output> {
        let raw = match self.values.get(&token) {
            None => return Err(CliError::NotCaptured),
            Some(None) => bug!("option {token} is a flag, use get_flag()"),
            Some(Some(raw)) => raw,
        };
        validator.validate(raw).ok_or(CliError::BadCast)
    }
}
