//! Drape CLI - inspect, validate and export design-token themes
//!
//! ```text
//! drape list
//! drape check --tokens ./tokens
//! drape resolve holo --mode dark --format toml
//! drape css classicMetal
//! drape text-styles holo
//! ```

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use config::DrapeConfig;
use drape_theme::Mode;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Inspect, validate and export design-token themes
#[derive(Parser, Debug)]
#[command(name = "drape")]
#[command(about = "Inspect, validate and export design-token themes")]
#[command(version)]
struct Cli {
    /// Directory of token tables to install (repeatable)
    #[arg(long = "tokens", value_name = "DIR", global = true)]
    tokens: Vec<PathBuf>,

    /// Do not install the built-in presets
    #[arg(long, global = true)]
    no_builtin: bool,

    /// Configuration file (defaults to ./drape.toml when present)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List installed design languages
    List,

    /// Validate every installed design language
    Check,

    /// Resolve a theme and print it
    Resolve {
        /// Design language (defaults to the configured one)
        language: Option<String>,

        /// Light or dark
        #[arg(short, long)]
        mode: Option<Mode>,

        /// TOML file with `[semantic]` / `[components.<name>]` overrides
        #[arg(long, value_name = "FILE")]
        overrides: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },

    /// Print a theme as CSS custom properties
    Css {
        language: Option<String>,

        #[arg(short, long)]
        mode: Option<Mode>,
    },

    /// Print typography roles with absolute line heights
    TextStyles {
        language: Option<String>,

        #[arg(short, long)]
        mode: Option<Mode>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Toml,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose {
        "drape=debug,drape_theme=debug"
    } else {
        "drape=info,drape_theme=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mut config = match &cli.config {
        Some(path) => DrapeConfig::load(path)?,
        None => DrapeConfig::discover()?,
    };
    if cli.no_builtin {
        config.tokens.builtin = false;
    }

    let mut dirs = config.token_dirs();
    dirs.extend(cli.tokens.iter().cloned());
    let registry = commands::build_registry(config.tokens.builtin, &dirs)?;

    let select = |language: Option<String>, mode: Option<Mode>| {
        commands::Selection::new(language, mode, &config.defaults)
    };

    match cli.command {
        Commands::List => commands::list(&registry),
        Commands::Check => commands::check(&registry),
        Commands::Resolve {
            language,
            mode,
            overrides,
            format,
        } => commands::resolve(&registry, select(language, mode)?, overrides.as_deref(), format),
        Commands::Css { language, mode } => commands::css(&registry, select(language, mode)?),
        Commands::TextStyles { language, mode } => {
            commands::text_styles(&registry, select(language, mode)?)
        }
    }
}
