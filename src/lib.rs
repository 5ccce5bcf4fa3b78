#![warn(
    trivial_casts,
    trivial_numeric_casts,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

//! Reusable building blocks for command-line tools.
//!
//! This crate is a façade over the kitbag workspace:
//!
//! * [`encoding`] — UTF conversions, legacy code-page backends and the
//!   Python-codec-style name resolver.
//! * [`term`] — display width measurement, ANSI color sequences and a
//!   fixed-column table renderer.
//! * [`binstore`] — versioned binary settings storage with per-value codecs.
//! * [`cli`] — argument registry, capture state machine, typed validators,
//!   environment resolution and command-line lexing.
//! * [`panic`] and [`bug!`] — the abort-with-context primitive every crate
//!   uses on broken contracts.
//!
//! Each subsystem is also published as its own crate for callers that want
//! a single piece.

pub use kitbag_binstore as binstore;
pub use kitbag_cli as cli;
pub use kitbag_core::{bug, panic, Token};
pub use kitbag_encoding as encoding;
pub use kitbag_term as term;
