//! Agora CLI - scripted front end for the social graph
//!
//! Replays JSON scripts of signups, follow requests, posts and queries
//! against an in-memory network and renders the results.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod script;

#[derive(Parser)]
#[command(name = "agora")]
#[command(author = "Agora Contributors")]
#[command(version)]
#[command(about = "In-memory social graph with follow requests and traversal", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to .agora/config.json, then the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config in the given directory
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Replay a script and print every step
    Run {
        /// JSON script of operations
        script: PathBuf,

        /// Print one JSON object per step instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Replay a script and export the resulting network to JSON
    Export {
        /// JSON script of operations
        script: PathBuf,

        /// Output file
        #[arg(short, long, default_value = "agora-network.json")]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let result = match cli.command {
        Commands::Init { path } => commands::init(&path),
        Commands::Run { script, json } => commands::load_config(cli.config.as_deref())
            .and_then(|config| commands::run(&script, config, json)),
        Commands::Export { script, output } => commands::load_config(cli.config.as_deref())
            .and_then(|config| commands::export(&script, config, &output)),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
