mod cli;

use crate::cli::{Command, LogFormatArg, StorageBackendArg, CLI, DEFAULT_SQLITE_URL};
use anyhow::Context;
use clap::Parser;
use std::io::Write;
use std::process::ExitCode;
use tinykey_generator::RandomGenerator;
use tinykey_shortener::{ErrorKind, Shortener, ShortenerConfig, ShortenerError, ShortenerService};
use tinykey_storage::{InMemoryStore, MySqlStore, SqliteStore, UrlStore};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let config = CLI::parse();
    init_tracing(config.log_format);

    match run(config).await {
        Ok(code) => code,
        Err(err) => {
            error!(error = %format!("{err:#}"), "tinykey failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(format: LogFormatArg) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormatArg::Text => builder.init(),
        LogFormatArg::Json => builder.json().init(),
    }
}

async fn run(config: CLI) -> anyhow::Result<ExitCode> {
    info!(storage_backend = %config.storage, "starting tinykey");

    match config.storage {
        StorageBackendArg::InMemory => run_with_store(InMemoryStore::new(), config).await,
        StorageBackendArg::Sqlite => {
            let url = config.database_url.as_deref().unwrap_or(DEFAULT_SQLITE_URL);
            let store = SqliteStore::connect(url)
                .await
                .with_context(|| format!("opening sqlite database {url}"))?;
            run_with_store(store, config).await
        }
        StorageBackendArg::Mysql => {
            let url = config
                .database_url
                .as_deref()
                .context("a database url is required when the storage backend is mysql")?;
            let store = MySqlStore::connect(url)
                .await
                .context("connecting to mysql")?;
            run_with_store(store, config).await
        }
    }
}

async fn run_with_store<S: UrlStore>(store: S, config: CLI) -> anyhow::Result<ExitCode> {
    store.initialize().await.context("initializing schema")?;

    let shortener_config = ShortenerConfig::builder()
        .key_length(config.key_length)
        .max_attempts(config.max_attempts)
        .build();
    let service = ShortenerService::with_config(store, RandomGenerator::new(), shortener_config)?;
    let base_url = config.base_url.as_deref();

    let outcome = match config.command {
        Command::Init => {
            println!("schema ready");
            Ok(())
        }
        Command::Shorten { url } => shorten(&service, url.trim(), base_url).await,
        Command::Resolve { key } => resolve(&service, key.trim()).await,
        Command::Info { key } => service.inspect(key.trim()).await.map(|record| {
            println!("key:        {}", record.short_key);
            println!("url:        {}", record.long_url);
            println!("created at: {}", record.created_at);
        }),
        Command::Session => {
            session(&service, base_url).await?;
            Ok(())
        }
    };

    Ok(match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err),
    })
}

async fn shorten(
    service: &impl Shortener,
    url: &str,
    base_url: Option<&str>,
) -> Result<(), ShortenerError> {
    let key = service.shorten(url).await?;
    match base_url {
        Some(base) => println!("{}", key.to_url(base)),
        None => println!("{key}"),
    }
    Ok(())
}

async fn resolve(service: &impl Shortener, key: &str) -> Result<(), ShortenerError> {
    let url = service.resolve(key).await?;
    println!("{url}");
    Ok(())
}

/// Prints a message matching what the user can do about `err` and picks
/// the exit code: 2 for bad input, 3 for an unknown key, 1 otherwise.
fn report(err: &ShortenerError) -> ExitCode {
    match err.kind() {
        ErrorKind::InvalidInput => {
            eprintln!("{err}");
            ExitCode::from(2)
        }
        ErrorKind::NotFound => {
            eprintln!("{err}; shorten a URL first");
            ExitCode::from(3)
        }
        ErrorKind::Unavailable => {
            eprintln!("{err}; try again later");
            ExitCode::FAILURE
        }
    }
}

const SESSION_HELP: &str = "commands: shorten <url> | resolve <key> | help | quit";

async fn session(service: &impl Shortener, base_url: Option<&str>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{SESSION_HELP}");

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        let (command, argument) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let argument = argument.trim();

        let outcome = match command {
            "" => continue,
            "shorten" => shorten(service, argument, base_url).await,
            "resolve" => resolve(service, argument).await,
            "help" => {
                println!("{SESSION_HELP}");
                continue;
            }
            "quit" | "exit" => break,
            other => {
                println!("unknown command '{other}'; {SESSION_HELP}");
                continue;
            }
        };

        if let Err(err) = outcome {
            report(&err);
        }
    }

    Ok(())
}
