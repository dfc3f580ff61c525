//! Flags shared by every typeforge subcommand.

use std::path::PathBuf;

use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Raise the log level: `-v` info, `-vv` debug, `-vvv` trace.
    ///
    /// Without it only errors reach stderr.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print nothing but errors and generated content.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Plain output without ANSI escapes. Also read from `NO_COLOR`.
    #[arg(long = "no-color", env = "NO_COLOR", global = true)]
    pub no_color: bool,

    /// Read settings from this TOML file on top of the discovered ones.
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Mirror log events into FILE.
    #[arg(long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Shape of status output; `auto` picks `human` on a terminal.
    #[arg(long = "output-format", value_enum, default_value = "auto", global = true)]
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Auto,
    /// Coloured, with spinners.
    Human,
    Plain,
    /// One JSON document per report.
    Json,
}
