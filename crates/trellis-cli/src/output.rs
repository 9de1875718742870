//! Output management and formatting.
//!
//! Results go to stdout; failure lists, warnings and the progress bar go to
//! stderr so that `--output-format json` stays parseable.

use std::io::{self, IsTerminal};

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde::Serialize;

use trellis_core::application::{EntryOutcome, RunObserver, RunReport};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Writes CLI output according to the resolved format and flags.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
    err_term: Term,
}

impl OutputManager {
    /// `--output-format` wins over `output.format`; `auto` becomes human on
    /// a terminal and plain otherwise.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = args
            .output_format
            .or_else(|| OutputFormat::from_config(&config.output.format))
            .unwrap_or_default();

        let resolved_format = if requested == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            requested
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Error indicator on stderr: `✗ <msg>`. Printed even in quiet mode.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        let line = if self.no_color {
            format!("\u{2717} {msg}") // ✗
        } else {
            format!("{} {}", "\u{2717}".red().bold(), msg.red())
        };
        self.err_term.write_line(&line)
    }

    /// Warning indicator on stderr: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.err_term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Unstyled line on stderr, never suppressed. Used for failure lists.
    pub fn report_line(&self, line: &str) -> io::Result<()> {
        self.err_term.write_line(line)
    }

    /// Pretty JSON on stdout. Not suppressed by `--quiet`.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> crate::error::CliResult<()> {
        let text = serde_json::to_string_pretty(value)?;
        self.term.write_line(&text)?;
        Ok(())
    }

    /// A progress bar for human-format runs on an interactive stderr.
    pub fn progress(&self) -> Option<ProgressObserver> {
        let wanted =
            self.resolved_format == OutputFormat::Human && !self.quiet && self.err_term.is_term();
        wanted.then(ProgressObserver::new)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }

    pub fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }
}

/// Drives an `indicatif` bar from runner callbacks.
pub struct ProgressObserver {
    bar: ProgressBar,
}

impl ProgressObserver {
    fn new() -> Self {
        let bar = ProgressBar::new(0);
        if let Ok(style) =
            ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {wide_msg}")
        {
            bar.set_style(style.progress_chars("=> "));
        }
        Self { bar }
    }
}

impl RunObserver for ProgressObserver {
    fn on_start(&self, total: usize) {
        self.bar.set_length(total as u64);
    }

    fn on_entry(&self, outcome: &EntryOutcome) {
        self.bar.set_message(outcome.origin.clone());
        self.bar.inc(1);
    }

    fn on_finish(&self, _report: &RunReport) {
        self.bar.finish_and_clear();
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
