#![warn(
    trivial_casts,
    trivial_numeric_casts,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

//! Foundation pieces shared by every kitbag crate: the abort-with-context
//! primitive used on broken contracts, and the dense-token vocabulary of the
//! registry collections.

pub mod panic;

/// Dense index identifying a registered entry inside its owning collection.
///
/// Tokens are handed out in insertion order and are exactly the index into
/// the collection's backing vector, so a token is valid precisely when it is
/// smaller than the collection length. Tokens stay stable for the lifetime
/// of the collection that issued them.
pub type Token = usize;
