//! Flags shared by every subcommand.

use std::path::PathBuf;

use clap::Args;

/// Global arguments, flattened into [`super::Cli`].
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Logging verbosity. Conflicts with `--quiet`.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase verbosity (-v, -vv, -vvv)",
        long_help = "Increase logging verbosity:
    (none)  - Warnings and errors
    -v      - Info (registry and run summary)
    -vv     - Debug (one line per entry)
    -vvv    - Trace"
    )]
    pub verbose: u8,

    /// Only errors and failure lists are printed.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Honours `NO_COLOR` (<https://no-color.org>).
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new(),
        help = "Disable colored output"
    )]
    pub no_color: bool,

    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Configuration file path"
    )]
    pub config: Option<PathBuf>,

    /// Falls back to `output.format` from the config when not given.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        help = "Output format [default: auto]"
    )]
    pub output_format: Option<OutputFormat>,
}

/// How results are rendered on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human on a terminal, plain otherwise.
    #[default]
    Auto,
    /// Colors and a progress bar.
    Human,
    Plain,
    /// Machine-readable JSON on stdout.
    Json,
}

impl OutputFormat {
    /// Parse the `output.format` config value; unknown values are `None`.
    pub fn from_config(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "human" => Some(Self::Human),
            "plain" => Some(Self::Plain),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}
