//! `golib-config` CLI: inspect configuration documents from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Print a YAML file as pretty JSON
//! golib-config get -i configs/config.yaml
//!
//! # Print one sub-tree, compact
//! golib-config get -i configs/config.yaml --key profile.children --compact
//!
//! # Parse TOML from stdin and report the top-level key count
//! cat app.toml | golib-config check -f toml
//!
//! # Load whatever CONFIG_ENCODER / CONFIG_FILE point at
//! CONFIG_ENCODER=toml CONFIG_FILE=app.toml golib-config env --key server
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use golib_config::{Config, EnvLoader, Format, Value};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "golib-config",
    version,
    about = "Load, validate and query JSON/YAML/TOML configuration"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the document, or the sub-tree at --key, as JSON
    Get {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Input format: json, yaml or toml (guessed from the file extension)
        #[arg(short, long)]
        format: Option<Format>,
        /// Dot-separated key path, e.g. "profile.children"
        #[arg(short, long, default_value = "")]
        key: String,
        /// Print JSON on a single line
        #[arg(long)]
        compact: bool,
    },
    /// Parse the document and report whether it is valid
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Input format: json, yaml or toml (guessed from the file extension)
        #[arg(short, long)]
        format: Option<Format>,
    },
    /// Load the configuration selected by the CONFIG_* environment variables
    Env {
        /// Dot-separated key path, e.g. "profile.children"
        #[arg(short, long, default_value = "")]
        key: String,
        /// Print JSON on a single line
        #[arg(long)]
        compact: bool,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Get {
            input,
            format,
            key,
            compact,
        } => {
            let cfg = load_input(input.as_deref(), format)?;
            print_value(cfg.raw_by_key(&key).with_context(|| key_context(&key))?, compact)?;
        }
        Commands::Check { input, format } => {
            let cfg = load_input(input.as_deref(), format)?;
            println!("ok: {} top-level keys", cfg.mapping().len());
        }
        Commands::Env { key, compact } => {
            let loader = EnvLoader::from_env();
            let location = loader
                .location()
                .context("Failed to resolve configuration source")?;
            let cfg = loader
                .load()
                .with_context(|| format!("Failed to load configuration from {location}"))?;
            print_value(cfg.raw_by_key(&key).with_context(|| key_context(&key))?, compact)?;
        }
    }

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Pick the format from the flag, then the file extension, then fall back to JSON.
fn resolve_format(input: Option<&str>, format: Option<Format>) -> Format {
    format
        .or_else(|| input.and_then(|path| Format::from_path(path)))
        .unwrap_or(Format::Json)
}

fn load_input(input: Option<&str>, format: Option<Format>) -> Result<Config> {
    let format = resolve_format(input, format);
    let text = read_input(input)?;
    tracing::debug!(%format, bytes = text.len(), "parsing input");
    Config::from_bytes(text.as_bytes(), format.encoder())
        .with_context(|| format!("Failed to parse input as {format}"))
}

fn key_context(key: &str) -> String {
    format!("Failed to look up key '{key}'")
}

fn print_value(value: &Value, compact: bool) -> Result<()> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{json}");
    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
