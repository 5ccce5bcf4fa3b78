//! Environment variable records and their registry.

use std::collections::HashMap;

use kitbag_core::bug;

use crate::types::Token;

/// One registered environment variable.
#[derive(Debug, Clone)]
pub struct Variable {
    name: String,
    description: String,
}

impl Variable {
    /// Creates a variable; an empty name is a caller bug.
    pub fn new(name: &str, description: &str) -> Self {
        if name.is_empty() {
            bug!("the name of a variable must not be empty");
        }
        Self {
            name: name.to_owned(),
            description: description.to_owned(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Insertion-ordered variable registry with a single name lookup map.
#[derive(Debug, Clone, Default)]
pub struct VariableCollection {
    variables: Vec<Variable>,
    names: HashMap<String, Token>,
}

impl VariableCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `variable` and returns its token. A duplicate name is a
    /// caller bug.
    pub fn add(&mut self, variable: Variable) -> Token {
        let token = self.variables.len();
        if self.names.contains_key(variable.name()) {
            bug!("duplicated variable name {:?}", variable.name());
        }
        self.names.insert(variable.name().to_owned(), token);
        self.variables.push(variable);
        token
    }

    pub fn find_name(&self, name: &str) -> Option<Token> {
        self.names.get(name).copied()
    }

    /// Whether `token` refers to a registered variable.
    pub fn has(&self, token: Token) -> bool {
        token < self.variables.len()
    }

    /// The variable behind `token`; an out-of-range token aborts.
    pub fn get(&self, token: Token) -> &Variable {
        if !self.has(token) {
            bug!("variable token {token} is out of range");
        }
        &self.variables[token]
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Tokens paired with their variables, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Token, &Variable)> {
        self.variables.iter().enumerate()
    }
}
