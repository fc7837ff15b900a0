//! Store backends for the tinykey shortener.

pub mod error;
pub mod memory;
pub mod mysql;
pub mod sqlite;

pub use memory::InMemoryStore;
pub use mysql::MySqlStore;
pub use sqlite::SqliteStore;
pub use tinykey_core::store::Result;
pub use tinykey_core::{StoreError, UrlRecord, UrlStore};
