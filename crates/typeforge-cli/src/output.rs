//! Status lines, generated content and prompts on stdout.

use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::time::Duration;

use clap::ValueEnum;
use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Success,
    Error,
    Warning,
    Info,
}

impl Status {
    fn mark(self) -> &'static str {
        match self {
            Self::Success => "\u{2713}",
            Self::Error => "\u{2717}",
            Self::Warning => "\u{26a0}",
            Self::Info => "\u{2139}",
        }
    }
}

/// Everything the user sees on stdout goes through here so quiet mode and
/// colour settings apply uniformly.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // Flag wins over config; Auto resolves to Human (TTY) or Plain.
        let requested = if args.output_format == OutputFormat::Auto {
            OutputFormat::from_str(&config.output.format, true).unwrap_or_default()
        } else {
            args.output_format
        };
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
        }
    }

    /// Plain line, dropped in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Generated content destined for stdout. Never suppressed.
    pub fn emit(&self, content: &str) -> io::Result<()> {
        self.term.write_str(content)?;
        self.term.flush()
    }

    /// Pretty JSON document. Never suppressed.
    pub fn json(&self, value: &serde_json::Value) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.status(Status::Success, msg)
    }

    /// Printed even in quiet mode.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        self.status(Status::Error, msg)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.status(Status::Warning, msg)
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.status(Status::Info, msg)
    }

    fn status(&self, status: Status, msg: &str) -> io::Result<()> {
        if self.quiet && status != Status::Error {
            return Ok(());
        }
        let mark = status.mark();
        let line = if self.no_color {
            format!("{mark} {msg}")
        } else {
            match status {
                Status::Success => format!("{} {}", mark.green().bold(), msg.green()),
                Status::Error => format!("{} {}", mark.red().bold(), msg.red()),
                Status::Warning => format!("{} {}", mark.yellow().bold(), msg.yellow()),
                Status::Info => format!("{} {}", mark.blue().bold(), msg.blue()),
            }
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

    /// Indented file line: `  <label> <path>`.
    pub fn file(&self, label: &str, path: &Path) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("  {label:<9} {}", path.display())
        } else {
            format!("  {:<9} {}", label.dimmed(), path.display().bold())
        };
        self.term.write_line(&line)
    }

    /// Spinner on stderr while work runs; hidden unless human output is
    /// going to a terminal.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.quiet || self.resolved_format != OutputFormat::Human || !io::stderr().is_terminal()
        {
            return ProgressBar::hidden();
        }
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(msg.to_owned());
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner
    }

    /// Ask a yes/no question; `false` unless the user answers yes.
    pub fn confirm(&self, prompt: &str) -> io::Result<bool> {
        if let Some(answer) = prompt_terminal(prompt)? {
            return Ok(answer);
        }

        let mut stderr = io::stderr();
        write!(stderr, "{prompt} [y/N] ")?;
        stderr.flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim().to_ascii_lowercase();
        Ok(input == "y" || input == "yes")
    }

    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Never `Auto`.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

/// Interactive prompt when stdin is a terminal, `None` otherwise.
#[cfg(feature = "interactive")]
fn prompt_terminal(prompt: &str) -> io::Result<Option<bool>> {
    if !io::stdin().is_terminal() {
        return Ok(None);
    }
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map(Some)
        .map_err(io::Error::other)
}

#[cfg(not(feature = "interactive"))]
fn prompt_terminal(_prompt: &str) -> io::Result<Option<bool>> {
    Ok(None)
}

// ── tests ─────────────────────────────────────────────────────────────────────
