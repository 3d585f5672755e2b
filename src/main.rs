use std::fs::OpenOptions;
use std::sync::Mutex;

use clap::{CommandFactory, Parser};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

mod api;
mod cli;
mod config;
mod engine;
mod error;
mod headless;
mod progress;
mod tui;

use cli::args::{Cli, Commands, ConfigAction};
use config::paths::ankivert_data_dir;
use config::{ConfigFile, Overrides, Verbosity};
use engine::Action;
use error::PanelError;

const LOG_FILE: &str = "ankivert.log";

fn main() {
    let cli = Cli::parse();

    // Convert CLI flags to verbosity level
    let verbosity = Verbosity::from((cli.quiet, cli.verbose));
    let interactive = matches!(cli.command, None | Some(Commands::Ui));
    init_tracing(verbosity, interactive);

    tracing::debug!("Verbosity level: {:?}", verbosity);

    if let Err(err) = run(cli) {
        display_error(&err);
        std::process::exit(1);
    }
}

/// Set up tracing with a verbosity-based filter; RUST_LOG overrides the flags.
///
/// The panel owns the terminal, so it logs to a file in the data directory
/// and drops output when that file can't be opened. Everything else logs to
/// stderr to keep stdout clean for results.
fn init_tracing(verbosity: Verbosity, interactive: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.as_tracing_filter()));

    let (writer, ansi) = if interactive {
        let file = ankivert_data_dir().ok().and_then(|dir| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join(LOG_FILE))
                .ok()
        });
        match file {
            Some(file) => (BoxMakeWriter::new(Mutex::new(file)), false),
            None => (BoxMakeWriter::new(std::io::sink), false),
        }
    } else {
        (BoxMakeWriter::new(std::io::stderr), true)
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .init();
}

/// Execute the dispatched command.
fn run(cli: Cli) -> Result<(), PanelError> {
    let file = ConfigFile::load(cli.config.as_deref())?;
    let mut config = file.config.clone();
    Overrides {
        server: cli.server.clone(),
    }
    .apply(&mut config);

    match cli.command {
        None | Some(Commands::Ui) => {
            config.validate()?;
            tui::launch_tui(&config)
        }
        Some(Commands::Scan(args)) => {
            config.validate()?;
            headless::execute_action(Action::Scan, args.vault.as_deref(), &config, cli.quiet)
        }
        Some(Commands::Sync(args)) => {
            config.validate()?;
            let action = if args.dry_run {
                Action::DryRun
            } else {
                Action::Sync
            };
            headless::execute_action(action, args.vault.as_deref(), &config, cli.quiet)
        }
        Some(Commands::Health) => {
            config.validate()?;
            headless::execute_health(&config)
        }
        Some(Commands::Config(args)) => match args.action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => {
                let origin = if file.exists() { "" } else { " (not found, defaults)" };
                println!("# {}{}", file.path().display(), origin);
                print!("{}", toml::to_string_pretty(&config)?);
                Ok(())
            }
            ConfigAction::Init => {
                let mut file = file;
                file.init()?;
                println!("Wrote {}", file.path().display());
                Ok(())
            }
        },
        Some(Commands::Completions(args)) => {
            clap_complete::generate(
                args.shell,
                &mut Cli::command(),
                "ankivert",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}

/// Display a PanelError with optional suggestion hint to stderr.
fn display_error(err: &PanelError) {
    eprintln!("error: {}", err);
    if let Some(suggestion) = err.suggestion() {
        eprintln!("  hint: {}", suggestion);
    }
}
