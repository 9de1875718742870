//! CLI argument definitions using the clap derive API.
//!
//! Only argument names, help text and value enums live here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = "trellis",
    bin_name = "trellis",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Declarative, idempotent project skeleton generator",
    long_about = "Trellis creates the directories and empty files a blueprint \
                  declares. Existing files are never touched, so running it \
                  again is always safe.",
    after_help = "EXAMPLES:\n\
        \x20 trellis                          # built-in blueprint into ./picnic-app\n\
        \x20 trellis run picnic -o ~/src/app\n\
        \x20 trellis run ./blueprint.toml --dry-run\n\
        \x20 trellis check ./blueprint.toml\n\
        \x20 trellis completions bash > /usr/share/bash-completion/completions/trellis",
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Defaults to `run` with no arguments.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// The subcommand to execute, `run` when none was given.
    pub fn command_or_run(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Run(RunArgs::default()))
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Create every directory and file a blueprint declares.
    #[command(
        visible_alias = "r",
        about = "Materialize a blueprint",
        after_help = "EXAMPLES:\n\
            \x20 trellis run\n\
            \x20 trellis run picnic --output ./app --jobs 4\n\
            \x20 trellis run ./blueprint.toml --dry-run"
    )]
    Run(RunArgs),

    /// Validate a blueprint without touching the filesystem.
    #[command(
        about = "Validate a blueprint",
        after_help = "EXAMPLES:\n\
            \x20 trellis check\n\
            \x20 trellis check ./blueprint.toml"
    )]
    Check(CheckArgs),

    /// List the built-in blueprints.
    #[command(
        visible_alias = "ls",
        about = "List available blueprints",
        after_help = "EXAMPLES:\n\
            \x20 trellis list\n\
            \x20 trellis list --format json"
    )]
    List(ListArgs),

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 trellis init           # user config directory\n\
            \x20 trellis init --local   # ./.trellis.toml"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 trellis completions bash > ~/.local/share/bash-completion/completions/trellis\n\
            \x20 trellis completions zsh  > ~/.zfunc/_trellis\n\
            \x20 trellis completions fish > ~/.config/fish/completions/trellis.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the effective configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 trellis config get scaffold.jobs\n\
            \x20 trellis config list\n\
            \x20 trellis config path"
    )]
    Config(ConfigCommands),
}

// ── run ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Built-in blueprint name or path to a `.toml` manifest.
    #[arg(value_name = "BLUEPRINT", help = "Blueprint name or manifest path")]
    pub blueprint: Option<String>,

    /// Defaults to `scaffold.output_dir`, then the blueprint's own output name.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory"
    )]
    pub output: Option<PathBuf>,

    /// Print the resolved plan and whether each path exists; write nothing.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,

    #[arg(
        short = 'j',
        long = "jobs",
        value_name = "N",
        value_parser = clap::value_parser!(u16).range(1..),
        help = "Worker threads (default: scaffold.jobs, usually 1)"
    )]
    pub jobs: Option<u16>,
}

// ── check ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Args)]
pub struct CheckArgs {
    #[arg(value_name = "BLUEPRINT", help = "Blueprint name or manifest path")]
    pub blueprint: Option<String>,
}

// ── list ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Args)]
pub struct InitArgs {
    /// Write `.trellis.toml` in the current directory instead.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `scaffold.jobs`.
        key: String,
    },
    /// Print the effective configuration.
    List,
    /// Print the path of the user configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
