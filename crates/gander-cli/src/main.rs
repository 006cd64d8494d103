//! Gander - terminal chat client with typewriter-style replies

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use gander_core::chat::ChatClient;
use gander_core::format::{
    debug_text_parsing, describe_segments, plain_text, Segment, SAMPLE_CASES,
};
use gander_core::Config;
use tracing::info;

mod logging;
mod tui;

#[derive(Parser, Debug)]
#[command(name = "gander", version, about)]
struct Cli {
    /// Config file (defaults to <config_dir>/gander/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the segments a reply parses into
    Parse {
        #[command(flatten)]
        input: InputArgs,
        /// Emit the segment tree as JSON
        #[arg(long)]
        json: bool,
        /// Emit the text with markup stripped
        #[arg(long, conflicts_with = "json")]
        plain: bool,
        /// Parse the built-in probe strings instead of input
        #[arg(long, conflicts_with_all = ["text", "file"])]
        samples: bool,
    },
    /// Reveal a reply full-screen
    Reveal {
        #[command(flatten)]
        input: InputArgs,
        /// Base delay per character
        #[arg(long)]
        delay_ms: Option<u64>,
        /// Extra delay per revealed character
        #[arg(long)]
        increment_us: Option<u64>,
    },
    /// Chat with the proxy backend (default)
    Chat {
        /// Backend base URL
        #[arg(long)]
        url: Option<String>,
        /// Model name forwarded to the backend
        #[arg(long)]
        model: Option<String>,
    },
}

/// How `parse` prints its result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Listing,
    Json,
    Plain,
}

impl Output {
    fn from_flags(json: bool, plain: bool) -> Self {
        match (json, plain) {
            (true, _) => Output::Json,
            (_, true) => Output::Plain,
            _ => Output::Listing,
        }
    }
}

/// Text from an argument, a file, or stdin
#[derive(Args, Debug)]
struct InputArgs {
    text: Option<String>,
    #[arg(long, conflicts_with = "text")]
    file: Option<PathBuf>,
}

impl InputArgs {
    fn read(&self) -> Result<String> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }
        if let Some(path) = &self.file {
            return std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()));
        }
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        Ok(text)
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => {
            let mut config = Config::load_from(path)?;
            config.apply_env();
            config
        }
        None => Config::load()?,
    };
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref())?;

    match cli.command.unwrap_or(Command::Chat {
        url: None,
        model: None,
    }) {
        Command::Parse {
            input,
            json,
            plain,
            samples,
        } => {
            logging::init_stderr();
            let output = Output::from_flags(json, plain);
            if samples {
                for (index, case) in SAMPLE_CASES.iter().enumerate() {
                    println!("--- Test Case {} ---", index + 1);
                    println!("Input text: {case}");
                    print_segments(case, output)?;
                }
            } else {
                print_segments(&input.read()?, output)?;
            }
        }
        Command::Reveal {
            input,
            delay_ms,
            increment_us,
        } => {
            let text = input.read()?;
            if let Some(delay_ms) = delay_ms {
                config.reveal.base_delay_ms = delay_ms;
            }
            if let Some(increment_us) = increment_us {
                config.reveal.increment_us = increment_us;
            }
            let log_path = logging::init_file()?;
            info!(log = %log_path.display(), chars = text.chars().count(), "Starting reveal");

            let app = tui::App::reveal(text, config.reveal.pacing(), config.formatter);
            tui::run(app).await?;
        }
        Command::Chat { url, model } => {
            if let Some(url) = url {
                config.backend.url = url;
            }
            if let Some(model) = model {
                config.backend.model = model;
            }
            let log_path = logging::init_file()?;
            let client = ChatClient::new(&config.backend)?;
            info!(log = %log_path.display(), endpoint = client.endpoint(), "Starting chat");

            let app = tui::App::chat(client, config.reveal.pacing(), config.formatter);
            tui::run(app).await?;
        }
    }

    Ok(())
}

fn print_segments(text: &str, output: Output) -> Result<()> {
    let segments = debug_text_parsing(text);
    println!("{}", format_segments(&segments, output)?);
    Ok(())
}

fn format_segments(segments: &[Segment], output: Output) -> Result<String> {
    Ok(match output {
        Output::Listing => describe_segments(segments).join("\n"),
        Output::Json => serde_json::to_string_pretty(segments)?,
        Output::Plain => plain_text(segments),
    })
}
