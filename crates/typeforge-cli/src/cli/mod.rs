//! Command-line surface of `typeforge`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use typeforge_core::domain::SwitchMode;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name    = "typeforge",
    bin_name = "typeforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} TypeScript types, mocks and API services from sample JSON",
    long_about = "Typeforge infers TypeScript interfaces from JSON samples, \
                  generates typed mock data modules and API-service classes, \
                  and toggles generated files between mock and live code.",
    after_help = "EXAMPLES:\n\
        \x20 typeforge types   -i user.json -n User -o src/types/user.d.ts\n\
        \x20 typeforge mock    -i user.json -t src/types/user.d.ts -n User -f getDummyUser --beside-input\n\
        \x20 typeforge service -m user.service.toml -o src/services/user.service.ts\n\
        \x20 typeforge switch live -d src -p .service",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Infer TypeScript declarations from a JSON sample.
    #[command(
        visible_alias = "t",
        about = "Generate TypeScript declarations from JSON",
        after_help = "EXAMPLES:\n\
            \x20 typeforge types -i user.json -n User                # print to stdout\n\
            \x20 typeforge types -i user.json -n User --beside-input # writes user.d.ts\n\
            \x20 typeforge types -i user.json -n User -o src/types/user.d.ts"
    )]
    Types(TypesArgs),

    /// Generate a mock data module.
    #[command(
        visible_alias = "dummy",
        about = "Generate a typed mock data module",
        after_help = "EXAMPLES:\n\
            \x20 typeforge mock -i user.json -t user.d.ts -n User -f getDummyUser --beside-input\n\
            \x20 typeforge mock -i user.json -t user.d.ts -n User -f getUser --sync --no-wrapper"
    )]
    Mock(MockArgs),

    /// Generate an API-service class from a manifest.
    #[command(
        about = "Generate an API-service class",
        after_help = "EXAMPLES:\n\
            \x20 typeforge service -m user.service.toml\n\
            \x20 typeforge service -m user.service.json -o src/services/user.service.ts --force"
    )]
    Service(ServiceArgs),

    /// Toggle generated files between mock and live code.
    #[command(
        visible_alias = "sw",
        about = "Switch files between mock and live code",
        after_help = "EXAMPLES:\n\
            \x20 typeforge switch live  src/services/user.service.ts\n\
            \x20 typeforge switch mock  -d src/services -p .service\n\
            \x20 typeforge switch strip -d src --dry-run"
    )]
    Switch(SwitchArgs),

    /// Initialise a typeforge configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 typeforge init           # global config\n\
            \x20 typeforge init --local   # .typeforge.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 typeforge completions bash > ~/.local/share/bash-completion/completions/typeforge\n\
            \x20 typeforge completions zsh  > ~/.zfunc/_typeforge\n\
            \x20 typeforge completions fish > ~/.config/fish/completions/typeforge.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the typeforge configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 typeforge config get mock.default_types_import\n\
            \x20 typeforge config list\n\
            \x20 typeforge config path"
    )]
    Config(ConfigCommands),
}

// ── types ─────────────────────────────────────────────────────────────────────

/// Arguments for `typeforge types`.
#[derive(Debug, Args)]
pub struct TypesArgs {
    /// JSON sample to infer from.
    #[arg(short = 'i', long = "input", value_name = "FILE", help = "Input JSON file")]
    pub input: PathBuf,

    /// Name of the root interface.
    #[arg(short = 'n', long = "name", value_name = "NAME", help = "Root type name")]
    pub name: String,

    /// Write declarations here instead of stdout.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        conflicts_with = "beside_input",
        help = "Output file (default: stdout)"
    )]
    pub output: Option<PathBuf>,

    /// Write `<stem>.d.ts` next to the input file.
    #[arg(long = "beside-input", help = "Write <stem>.d.ts next to the input")]
    pub beside_input: bool,
}

// ── mock ──────────────────────────────────────────────────────────────────────

/// Arguments for `typeforge mock`.
#[derive(Debug, Args)]
pub struct MockArgs {
    /// JSON sample embedded as the mock data.
    #[arg(short = 'i', long = "input", value_name = "FILE", help = "Input JSON file")]
    pub input: PathBuf,

    /// Types file declaring `--name`.
    #[arg(short = 't', long = "types", value_name = "FILE", help = "Types file")]
    pub types: PathBuf,

    /// Declared type of the data.
    #[arg(short = 'n', long = "name", value_name = "NAME", help = "Type name")]
    pub name: String,

    /// Exported accessor function name.
    #[arg(
        short = 'f',
        long = "function",
        value_name = "NAME",
        help = "Accessor function name"
    )]
    pub function: String,

    /// Write the module here instead of stdout.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        conflicts_with = "beside_input",
        help = "Output file (default: stdout)"
    )]
    pub output: Option<PathBuf>,

    /// Write `<stem>.dummy.ts` next to the input file.
    #[arg(long = "beside-input", help = "Write <stem>.dummy.ts next to the input")]
    pub beside_input: bool,

    /// Return the data directly instead of through a delayed promise.
    #[arg(long = "sync", help = "Generate a synchronous accessor")]
    pub sync: bool,

    /// Return the bare data instead of the response envelope.
    #[arg(long = "no-wrapper", help = "Skip the BaseApiResponse wrapper")]
    pub no_wrapper: bool,
}

// ── service ───────────────────────────────────────────────────────────────────

/// Arguments for `typeforge service`.
#[derive(Debug, Args)]
pub struct ServiceArgs {
    /// Service definition (`.json`, otherwise TOML).
    #[arg(
        short = 'm',
        long = "manifest",
        value_name = "FILE",
        help = "Service manifest (TOML or JSON)"
    )]
    pub manifest: PathBuf,

    /// Write the class here instead of stdout.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Output file (default: stdout)"
    )]
    pub output: Option<PathBuf>,

    /// Overwrite an existing output file.
    #[arg(long = "force", help = "Overwrite an existing output file")]
    pub force: bool,

    /// Answer yes to the overwrite prompt.
    #[arg(short = 'y', long = "yes", help = "Skip confirmation prompts")]
    pub yes: bool,

    /// Render and report without writing.
    #[arg(long = "dry-run", help = "Show what would be written without writing")]
    pub dry_run: bool,
}

// ── switch ────────────────────────────────────────────────────────────────────

/// Arguments for `typeforge switch`.
#[derive(Debug, Args)]
pub struct SwitchArgs {
    /// Target mode.
    #[arg(value_enum, help = "Mode to switch to")]
    pub mode: SwitchModeArg,

    /// Files to switch.
    #[arg(value_name = "FILES", help = "Files to switch")]
    pub files: Vec<PathBuf>,

    /// Also switch every matching file below this directory.
    #[arg(short = 'd', long = "dir", value_name = "DIR", help = "Directory to search")]
    pub dir: Option<PathBuf>,

    /// Only files whose name contains this text (with `--dir`).
    #[arg(
        short = 'p',
        long = "pattern",
        value_name = "TEXT",
        requires = "dir",
        help = "File name filter for --dir"
    )]
    pub pattern: Option<String>,

    /// Report what would change without writing.
    #[arg(long = "dry-run", help = "Show what would change without writing")]
    pub dry_run: bool,
}

/// Switch modes as spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SwitchModeArg {
    /// Activate mock code.
    #[value(alias = "dummy")]
    Mock,
    /// Activate live code.
    Live,
    /// Remove mock code and every marker.
    #[value(alias = "clean")]
    Strip,
}

impl From<SwitchModeArg> for SwitchMode {
    fn from(mode: SwitchModeArg) -> Self {
        match mode {
            SwitchModeArg::Mock => Self::Mock,
            SwitchModeArg::Live => Self::Live,
            SwitchModeArg::Strip => Self::Strip,
        }
    }
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `typeforge init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write the per-user file (the default).
    #[arg(long)]
    pub global: bool,

    /// Write `.typeforge.toml` here instead.
    #[arg(long, conflicts_with = "global")]
    pub local: bool,

    /// Replace a file that is already there.
    #[arg(short, long)]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell whose completion script is printed.
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `typeforge config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `switch.extension`.
        key: String,
    },
    /// Print the effective configuration.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
