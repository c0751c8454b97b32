//! CLI parse: clap types for aplus. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// aplus - Plan A+ marketing modules for a book
#[derive(Parser)]
#[command(name = "aplus")]
#[command(about = "Plan A+ marketing modules for a book with a text-generation service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (looked at for config/config.toml)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// API key commands
    Key {
        #[command(subcommand)]
        command: KeyCommands,
    },
    /// List the immediate subfolders of a book directory
    Subfolders {
        /// Book directory
        directory: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show the modules a plan run starts with
    Modules {
        /// Module sheet (TOML); the default modules are used when omitted
        #[arg(long)]
        sheet: Option<PathBuf>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Index a book directory and print a generated summary
    Summarize {
        /// Book directory
        directory: PathBuf,
        /// API key (falls back to generation.api_key from config)
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Run the wizard end to end and print the final plan
    Plan {
        /// Book directory
        directory: PathBuf,
        /// Module sheet (TOML)
        #[arg(long)]
        sheet: Option<PathBuf>,
        /// Subfolders to tick, comma-separated
        #[arg(long, value_delimiter = ',')]
        subfolders: Vec<String>,
        /// Book genre (Self-Help, Fiction, Non-Fiction, Mystery, Sci-Fi)
        #[arg(long)]
        genre: Option<String>,
        /// Structure type (Generate, Select, Manual)
        #[arg(long)]
        structure: Option<String>,
        /// Enable the bonus module step
        #[arg(long)]
        bonus: bool,
        /// Ask for headline proposals after population
        #[arg(long)]
        headlines: bool,
        /// Refinement prompt recorded with the plan
        #[arg(long)]
        refine: Option<String>,
        /// API key (falls back to generation.api_key from config)
        #[arg(long)]
        api_key: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(Subcommand)]
pub enum KeyCommands {
    /// Check an API key's format without storing it
    Check {
        /// Key to check
        key: String,
    },
}

/// Command name for logging (e.g. "key.check", "plan").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Key {
            command: KeyCommands::Check { .. },
        } => "key.check",
        Commands::Subfolders { .. } => "subfolders",
        Commands::Modules { .. } => "modules",
        Commands::Summarize { .. } => "summarize",
        Commands::Plan { .. } => "plan",
    }
}
