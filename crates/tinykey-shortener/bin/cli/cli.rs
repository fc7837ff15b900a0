use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::{Display, Formatter};
use tinykey_shortener::config::{DEFAULT_KEY_LENGTH, DEFAULT_MAX_ATTEMPTS};

pub const STORAGE_BACKEND_ENV: &str = "TINYKEY_STORAGE_BACKEND";
pub const DATABASE_URL_ENV: &str = "TINYKEY_DATABASE_URL";
pub const KEY_LENGTH_ENV: &str = "TINYKEY_KEY_LENGTH";
pub const MAX_ATTEMPTS_ENV: &str = "TINYKEY_MAX_ATTEMPTS";
pub const BASE_URL_ENV: &str = "TINYKEY_BASE_URL";
pub const LOG_FORMAT_ENV: &str = "TINYKEY_LOG_FORMAT";

pub const DEFAULT_SQLITE_URL: &str = "sqlite://tinykey.db";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "sqlite")]
    Sqlite,
    #[value(name = "mysql")]
    Mysql,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Sqlite => write!(f, "sqlite"),
            StorageBackendArg::Mysql => write!(f, "mysql"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "tinykey", version, about = "Map long URLs to short alphanumeric keys")]
pub struct CLI {
    #[arg(
        long,
        global = true,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::Sqlite
    )]
    pub storage: StorageBackendArg,

    /// Defaults to `sqlite://tinykey.db` for the sqlite backend.
    #[arg(long, global = true, env = DATABASE_URL_ENV, required_if_eq("storage", "mysql"))]
    pub database_url: Option<String>,

    #[arg(long, global = true, env = KEY_LENGTH_ENV, default_value_t = DEFAULT_KEY_LENGTH)]
    pub key_length: usize,

    #[arg(long, global = true, env = MAX_ATTEMPTS_ENV, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,

    /// Print full short URLs under this base instead of bare keys.
    #[arg(long, global = true, env = BASE_URL_ENV)]
    pub base_url: Option<String>,

    #[arg(
        long,
        global = true,
        env = LOG_FORMAT_ENV,
        value_enum,
        default_value_t = LogFormatArg::Text
    )]
    pub log_format: LogFormatArg,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create the storage schema if it does not exist yet.
    Init,
    /// Shorten a URL and print its key.
    Shorten { url: String },
    /// Print the URL stored under a key.
    Resolve { key: String },
    /// Print the full record stored under a key.
    Info { key: String },
    /// Read `shorten <url>` / `resolve <key>` commands from stdin.
    Session,
}
