//! Core types and traits for the tinykey URL shortener.
//!
//! This crate provides the domain types shared by the key generators,
//! the store backends and the shortener service.

pub mod error;
pub mod key;
pub mod shortener;
pub mod store;

pub use error::{ErrorKind, ShortenerError, StoreError};
pub use key::{ShortKey, MAX_KEY_LENGTH};
pub use shortener::{validate_url, Shortener, MAX_URL_LENGTH};
pub use store::{UrlRecord, UrlStore};
