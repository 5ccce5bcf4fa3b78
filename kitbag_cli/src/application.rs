//! The application: metadata plus its option and variable registries.

use crate::option::{CliOption, OptionCollection};
use crate::summary::Summary;
use crate::types::Token;
use crate::variable::{Variable, VariableCollection};

/// A command-line application schema.
///
/// Registration happens up front; the returned tokens are the handles used
/// with [`Parser`](crate::Parser) and [`Resolver`](crate::Resolver)
/// afterwards.
#[derive(Debug, Clone, Default)]
pub struct Application {
    summary: Summary,
    options: OptionCollection,
    variables: VariableCollection,
}

impl Application {
    pub fn new(summary: Summary) -> Self {
        Self {
            summary,
            options: OptionCollection::new(),
            variables: VariableCollection::new(),
        }
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn options(&self) -> &OptionCollection {
        &self.options
    }

    pub fn variables(&self) -> &VariableCollection {
        &self.variables
    }

    /// Registers a command-line option.
    pub fn add_option(&mut self, option: CliOption) -> Token {
        self.options.add(option)
    }

    /// Registers an environment variable.
    pub fn add_variable(&mut self, variable: Variable) -> Token {
        self.variables.add(variable)
    }
}
