//! # Trellis CLI
//!
//! Declarative, idempotent project skeleton generator.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 2. Initialise the tracing subscriber.
//! 3. Load configuration (defaults, files, environment).
//! 4. Build the [`OutputManager`].
//! 5. Dispatch to the command handler; no subcommand means `run`.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                              |
//! |------|--------------------------------------|
//! |  0   | Success                              |
//! |  1   | Filesystem failures / internal error |
//! |  2   | User input or blueprint validation   |
//! |  3   | Blueprint not found                  |
//! |  4   | Configuration error                  |
//! | 130  | Cancelled with Ctrl-C                |

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // Missing .env is fine.
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also arrive here, with exit code 0.
            let _ = e.print();
            return ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(2));
        }
    };

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("warning: {e}");
    }

    let config = match AppConfig::load(cli.global.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            let err = CliError::ConfigError {
                message: format!("{e:#}"),
                source: None,
            };
            return handle_error(err, cli.global.verbose > 0, !cli.global.no_color);
        }
    };
    debug!(?config, "configuration loaded");

    let output = OutputManager::new(&cli.global, &config);
    let verbose = cli.global.verbose > 0;
    let color = output.supports_color();

    match run(cli, config, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => handle_error(err, verbose, color),
    }
}

#[instrument(skip_all)]
fn run(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cli.command_or_run() {
        Commands::Run(cmd) => commands::run::execute(cmd, config, output),
        Commands::Check(cmd) => commands::check::execute(cmd, config, output),
        Commands::List(cmd) => commands::list::execute(cmd, output),
        Commands::Init(cmd) => commands::init::execute(cmd, output),
        Commands::Completions(cmd) => commands::completions::execute(cmd),
        Commands::Config(cmd) => commands::config::execute(cmd, config, output),
    }
}

/// The one place where a [`CliError`] becomes stderr text and an exit code.
fn handle_error(err: CliError, verbose: bool, color: bool) -> ExitCode {
    err.log();

    let color = color && std::io::IsTerminal::is_terminal(&std::io::stderr());
    eprint!("{}", err.render(verbose, color));

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_version_matches_cargo() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_version(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn cli_has_author() {
        assert!(Cli::command().get_author().is_some());
    }
}
