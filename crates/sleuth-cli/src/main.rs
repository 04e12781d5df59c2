//! Terminal frontend for the Sleuth investigation engine.

mod commands;

use std::path::PathBuf;
use std::process;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "sleuth",
    about = "Sleuth: a terminal cyber-investigation game",
    version,
    propagate_version = true
)]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive investigation session
    Play {
        /// RNG seed for reproducible cases
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Chat-completions endpoint for the analysis oracle
        #[arg(long, env = "SLEUTH_ORACLE_URL")]
        oracle_url: Option<String>,

        /// Model name sent to the oracle
        #[arg(long, env = "SLEUTH_ORACLE_MODEL")]
        oracle_model: Option<String>,

        /// Seconds to wait for an oracle reply
        #[arg(long, default_value = "15")]
        oracle_timeout_secs: u64,

        /// Never contact an oracle; always use fallback replies
        #[arg(long)]
        offline: bool,

        /// Write the session to this file on exit
        #[arg(long)]
        save: Option<PathBuf>,

        /// Restore a session saved with --save
        #[arg(long)]
        resume: Option<PathBuf>,
    },

    /// Generate a case and print it as JSON (includes the solution)
    Generate {
        /// RNG seed
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Anchor time for the case (RFC 3339, default: now)
        #[arg(long)]
        at: Option<DateTime<Utc>>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("SLEUTH_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let result = match cli.command {
        Commands::Play {
            seed,
            oracle_url,
            oracle_model,
            oracle_timeout_secs,
            offline,
            save,
            resume,
        } => commands::play::run(commands::play::PlayOptions {
            seed,
            oracle_url,
            oracle_model,
            oracle_timeout_secs,
            offline,
            save,
            resume,
        }),
        Commands::Generate { seed, at, output } => {
            commands::generate::run(seed, at.unwrap_or_else(Utc::now), output.as_deref())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
