#![warn(
    trivial_casts,
    trivial_numeric_casts,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

//! Command-line argument handling without the framework: an explicit option
//! registry, a small capture state machine over classified arguments, typed
//! validators shared with an environment-variable resolver, and a shell-like
//! lexer for splitting whole command lines.

pub mod application;
pub mod lexer;
pub mod option;
pub mod parser;
pub mod resolver;
pub mod summary;
pub mod types;
pub mod validator;
pub mod variable;

pub use application::Application;
pub use option::{CliOption, OptionCollection};
pub use parser::Parser;
pub use resolver::Resolver;
pub use summary::Summary;
pub use types::{CliError, CliResult, Token};
pub use validator::{BoolValidator, FloatValidator, IntValidator, StringValidator, Validator};
pub use variable::{Variable, VariableCollection};
