//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `scan`: Scan the project tree and build the translation catalog
//! - `extract`: Extract translatable strings from a single file
//! - `init`: Initialize the transcan configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Common arguments shared by the scanning commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project directory (config is searched upward from here)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Language code for catalog records (overrides config file)
    #[arg(long)]
    pub language_code: Option<String>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ScanCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Files per batch (overrides config file)
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Upper bound in milliseconds for the random per-batch dispatch delay
    #[arg(long, default_value_t = 0)]
    pub jitter_ms: u64,

    /// Run batches synchronously instead of on the thread pool
    #[arg(long)]
    pub serial: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    /// File to extract from
    pub file: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan the project and build the translation catalog
    Scan(ScanCommand),
    /// Extract translatable strings from a single file
    Extract(ExtractCommand),
    /// Initialize transcan configuration file
    Init,
}
