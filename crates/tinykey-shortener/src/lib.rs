//! URL shortener service implementation.
//!
//! This crate wires a key [`Generator`](tinykey_generator::Generator) and a
//! [`UrlStore`](tinykey_core::UrlStore) together behind the
//! [`Shortener`](tinykey_core::Shortener) contract. Core types are
//! re-exported from `tinykey_core`.

pub mod config;
pub mod service;

pub use config::ShortenerConfig;
pub use service::ShortenerService;
pub use tinykey_core::{ErrorKind, ShortKey, Shortener, ShortenerError};
