//! Valet CLI.
//!
//! Runs parking lot command scripts, one response line per command.
//!
//! # Quick Start
//!
//! ```bash
//! # Run resource/input.txt into output.txt
//! valet run
//!
//! # Run a script and print the responses
//! valet run commands.txt -o -
//!
//! # Try a few commands
//! valet exec "create_parking_lot 2" "park KA-01-HH-1234 21"
//!
//! # Drive a lot interactively
//! valet repl
//! ```

mod commands;
mod style;

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use valet_config::ValetConfig;

/// Valet - a parking lot command interpreter.
#[derive(Parser)]
#[command(name = "valet")]
#[command(author, version, about = "Valet - a parking lot command interpreter.", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log filter used when RUST_LOG is unset (e.g. "debug", "valet=trace").
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version information.
    Version,

    /// Run a command script, writing one response line per input line.
    Run {
        /// Script to read ("-" for stdin). Defaults to io.input.
        input: Option<PathBuf>,

        /// Where to write responses ("-" for stdout). Defaults to io.output.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Execute command lines against a fresh lot.
    Exec {
        /// Command lines, e.g. "create_parking_lot 6".
        #[arg(required = true)]
        lines: Vec<String>,
    },

    /// Interactive command prompt.
    Repl,

    /// Configuration commands.
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the merged configuration.
    Show {
        /// Output format.
        #[arg(short, long, value_enum, default_value_t = ConfigFormat::Text)]
        format: ConfigFormat,
    },
}

/// Rendering for `config show`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ConfigFormat {
    Text,
    Toml,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    style::set_no_color(
        cli.no_color || std::env::var_os("NO_COLOR").is_some() || !std::io::stdout().is_terminal(),
    );

    let config = ValetConfig::load().context("Failed to load configuration")?;

    init_logging(cli.log_level.as_deref(), &config)?;

    match cli.command {
        Commands::Version => {
            commands::version::run();
            Ok(())
        }
        Commands::Run { input, output } => commands::run::run(input, output, &config),
        Commands::Exec { lines } => {
            commands::exec::run(&lines);
            Ok(())
        }
        Commands::Repl => commands::repl::run(&config),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show { format } => commands::config::show(&config, format),
        },
    }
}

/// Installs the stderr subscriber.
///
/// Filter precedence: `RUST_LOG`, then `--log-level`, then `logging.filter`.
fn init_logging(cli_level: Option<&str>, config: &ValetConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let directive = cli_level.unwrap_or(&config.logging.filter);
            EnvFilter::try_new(directive)
                .with_context(|| format!("Invalid log filter '{directive}'"))?
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!style::no_color())
        .init();

    Ok(())
}
