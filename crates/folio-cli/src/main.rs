use std::fs::{self, OpenOptions};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use folio_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about = "Terminal preview of a long-scroll portfolio page")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the terminal page (default)
    Run {
        /// Initial location hash, e.g. `skills` or `articles/intro`
        #[arg(long)]
        hash: Option<String>,
    },
    /// List the page sections in document order
    Sections {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show which section and sub-path a location resolves to
    Decode {
        /// Full href or bare fragment (`#about/team`)
        href: String,
    },
    /// Print the config path and effective configuration
    Config {
        /// Write the effective configuration to the config path
        #[arg(long)]
        init: bool,
    },
}

fn env_filter(config: &AppConfig) -> EnvFilter {
    EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()))
}

/// Log to stderr for one-shot commands
fn init_stderr_logging(config: &AppConfig) {
    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Log to a file under the data dir so the terminal UI stays clean
fn init_file_logging(config: &AppConfig) -> Result<()> {
    let log_path = config.log_path();
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&log_path)?;

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    match cli.command {
        Some(Commands::Run { hash }) => {
            init_file_logging(&config)?;
            commands::run::run(config, hash).await
        }
        None => {
            init_file_logging(&config)?;
            commands::run::run(config, None).await
        }
        Some(Commands::Sections { json }) => {
            init_stderr_logging(&config);
            commands::sections::run(&config, json)
        }
        Some(Commands::Decode { href }) => {
            init_stderr_logging(&config);
            commands::decode::run(&config, &href)
        }
        Some(Commands::Config { init }) => {
            init_stderr_logging(&config);
            commands::config::run(&config, init)
        }
    }
}
