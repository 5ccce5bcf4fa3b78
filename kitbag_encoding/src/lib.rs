#![warn(
    trivial_casts,
    trivial_numeric_casts,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

//! Character encoding conversion for text that crosses a non-UTF-8 boundary.
//!
//! Three layers, lowest first:
//!
//! * [`utf`] converts between the UTF encoding forms using only the standard
//!   library.
//! * [`iconv`] (unix) and [`codepage`] (windows) convert between legacy byte
//!   encodings and Unicode through the platform backend.
//! * [`pycodec`] resolves Python-codec-style encoding names onto whichever
//!   backend the target has, behind one uniform error type.

pub mod utf;

#[cfg(unix)]
pub mod iconv;

#[cfg(windows)]
pub mod codepage;

pub mod pycodec;
