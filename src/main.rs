//! # Book Assistant CLI (`bookbot`)
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `bookbot serve` | Load the book and start the HTTP API |
//! | `bookbot ask "<question>"` | Print the answer to one question |
//! | `bookbot sources` | List the documents the corpus is built from |
//!
//! ## Examples
//!
//! ```bash
//! bookbot --config ./config/bookbot.toml serve --bind 0.0.0.0:5001
//! bookbot ask "How does Gazebo simulate sensors?"
//! bookbot ask "what is this about?" --selected-text "Isaac Sim renders scenes."
//! RUST_LOG=debug bookbot ask "topics"
//! ```

use anyhow::Result;
use book_assistant::{assistant::Assistant, config, server, sources};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Book Assistant: keyword-overlap answers from a textbook's source text.
#[derive(Parser)]
#[command(name = "bookbot", version, about)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// If the default path does not exist, built-in defaults are used.
    #[arg(long, global = true, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Log level used when `RUST_LOG` is not set.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the book and serve the chat API.
    Serve {
        /// Override `[server].bind`.
        #[arg(long)]
        bind: Option<String>,
    },

    /// Answer a single question and print the result.
    Ask {
        question: String,

        /// Answer from this passage instead of the whole book.
        #[arg(long)]
        selected_text: Option<String>,
    },

    /// List the documents that make up the corpus.
    Sources,
}

fn setup_logging(log_level: &str) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    let mut cfg = config::load_or_default(&cli.config)?;

    match cli.command {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                cfg.server.bind = bind;
            }
            server::run_server(&cfg).await?;
        }
        Commands::Ask {
            question,
            selected_text,
        } => {
            let assistant = Assistant::from_config(&cfg).await?;
            let answer = match selected_text {
                Some(selected) => assistant.answer_within(&question, &selected).text,
                None => assistant.answer(&question),
            };
            println!("{}", answer);
        }
        Commands::Sources => {
            sources::list_sources(&cfg).await?;
        }
    }

    Ok(())
}
