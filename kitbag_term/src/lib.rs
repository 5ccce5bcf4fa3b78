#![warn(
    trivial_casts,
    trivial_numeric_casts,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

//! Terminal rendering helpers: display-cell width measurement aware of wide
//! East-Asian text and ANSI escapes, SGR color sequence production, and a
//! fixed-column table renderer built on both.

mod tables;

pub mod tabulate;
pub mod termcolor;
pub mod wcwidth;

pub use tabulate::Tabulate;
pub use termcolor::{Attribute, Color};
