#![warn(
    trivial_casts,
    trivial_numeric_casts,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

//! Versioned binary settings storage.
//!
//! Settings are registered by name into a [`SettingCollection`], which hands
//! out dense tokens; a [`Configuration`] pairs the collection with a schema
//! version; a [`Storage`] keeps the raw bytes of every populated setting and
//! moves them to and from streams. Typed access goes through the pluggable
//! [`SerDes`] codecs.
//!
//! The persisted format is host-endian and host-width on purpose: this store
//! is for a machine's own settings, not for cross-architecture interchange.

pub mod configuration;
pub mod serdes;
pub mod setting;
pub mod storage;
pub mod types;

pub use configuration::Configuration;
pub use serdes::{BoolSerDes, EnumSerDes, ScalarSerDes, SerDes, StringSerDes};
pub use setting::{Setting, SettingCollection};
pub use storage::{LoadStrategy, Storage};
pub use types::{BinstoreError, BinstoreResult, ByteArray, Token, VersionIdentifier};
