use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "ankivert",
    version,
    about = "Control panel for the flashcard sync service"
)]
pub struct Cli {
    /// Command to run; defaults to the interactive panel
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase verbosity (-v for verbose, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode: suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Base URL of the sync service (overrides the config file)
    #[arg(long, global = true, value_name = "URL")]
    pub server: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch the interactive panel
    Ui,

    /// Scan a vault for new and duplicate cards
    Scan(ScanArgs),

    /// Push new and changed cards into Anki
    Sync(SyncArgs),

    /// Ask the service whether Anki is reachable
    Health,

    /// Show or create the config file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `ankivert scan` command.
#[derive(clap::Args, Debug)]
pub struct ScanArgs {
    /// Vault path; the service default is used when omitted
    #[arg(long)]
    pub vault: Option<String>,
}

/// Arguments for the `ankivert sync` command.
#[derive(clap::Args, Debug)]
pub struct SyncArgs {
    /// Vault path; the service default is used when omitted
    #[arg(long)]
    pub vault: Option<String>,

    /// Report what would change without writing to Anki
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(clap::Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration (default)
    Show,
    /// Write a default config file if none exists
    Init,
}

#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
