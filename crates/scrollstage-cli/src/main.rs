use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scrollstage_core::PageConfig;

mod commands;
mod trace;

#[derive(Parser)]
#[command(name = "scrollstage")]
#[command(author, version, about = "Inspect and replay scroll-hijacked page declarations")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved section table for a page declaration
    Inspect {
        /// Page declaration (TOML)
        page: PathBuf,
        /// Viewport width in px
        #[arg(long, default_value_t = 1280.0)]
        width: f64,
        /// Viewport height in px
        #[arg(long, default_value_t = 800.0)]
        height: f64,
        /// Classify as a touch device
        #[arg(long)]
        touch: bool,
    },
    /// Drive an engine with a recorded input trace and print the lifecycle
    /// events it produces
    Replay {
        /// Page declaration (TOML)
        page: PathBuf,
        /// Input trace (TOML)
        trace: PathBuf,
        #[arg(long, default_value_t = 1280.0)]
        width: f64,
        #[arg(long, default_value_t = 800.0)]
        height: f64,
        #[arg(long)]
        touch: bool,
        /// Start at this URL fragment
        #[arg(long)]
        fragment: Option<String>,
        /// Emit events as JSON lines instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.command {
        Commands::Inspect { page, .. } | Commands::Replay { page, .. } => PageConfig::load(page)?,
    };

    // dev_mode in the declaration raises the default log level.
    let default_level = if config.options.dev_mode { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Inspect {
            width,
            height,
            touch,
            ..
        } => commands::inspect::run(config, width, height, touch),
        Commands::Replay {
            trace,
            width,
            height,
            touch,
            fragment,
            json,
            ..
        } => commands::replay::run(config, &trace, width, height, touch, fragment, json),
    }
}
