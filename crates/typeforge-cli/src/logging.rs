//! Subscriber setup for the binary.
//!
//! The library crates only emit events; this is the single place they get
//! a subscriber. `RUST_LOG` replaces the verbosity-derived filter.

use std::io::IsTerminal as _;
use std::path::Path;

use anyhow::Context;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Install the stderr subscriber, plus an uncoloured copy into
/// `log_file` when one is given. Fails if a subscriber is already set.
pub fn init_logging(args: &GlobalArgs, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(level_for(args))));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    let file_layer = match log_file {
        Some(path) => {
            let (dir, name) = split_log_path(path)?;
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(dir, name);
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_target(true)
                    .with_writer(appender),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("A tracing subscriber is already installed")
}

/// The same level for each of the workspace crates.
fn directives(level: &str) -> String {
    ["typeforge", "typeforge_core", "typeforge_adapters"]
        .map(|target| format!("{target}={level}"))
        .join(",")
}

fn level_for(args: &GlobalArgs) -> &'static str {
    match (args.quiet, args.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    }
}

/// Directory and file name for the appender; a bare name logs into the CWD.
fn split_log_path(path: &Path) -> anyhow::Result<(std::path::PathBuf, std::ffi::OsString)> {
    let name = path
        .file_name()
        .with_context(|| format!("Log file path {} has no file name", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    Ok((dir.to_path_buf(), name.to_os_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{GlobalArgs, OutputFormat};

    fn args_with(verbose: u8, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            no_color: true,
            config: None,
            log_file: None,
            output_format: OutputFormat::Auto,
        }
    }

    #[test]
    fn verbosity_maps_to_levels() {
        let cases = [(0, "warn"), (1, "info"), (2, "debug"), (3, "trace"), (9, "trace")];
        for (verbose, expected) in cases {
            assert_eq!(level_for(&args_with(verbose, false)), expected, "-v x{verbose}");
        }
    }

    #[test]
    fn quiet_wins_over_verbose() {
        assert_eq!(level_for(&args_with(0, true)), "error");
        assert_eq!(level_for(&args_with(3, true)), "error");
    }

    #[test]
    fn directives_cover_every_crate() {
        assert_eq!(
            directives("debug"),
            "typeforge=debug,typeforge_core=debug,typeforge_adapters=debug"
        );
    }

    #[test]
    fn log_path_splits_into_dir_and_name() {
        let (dir, name) = split_log_path(Path::new("logs/typeforge.log")).unwrap();
        assert_eq!(dir, Path::new("logs"));
        assert_eq!(name, "typeforge.log");

        let (dir, _) = split_log_path(Path::new("typeforge.log")).unwrap();
        assert_eq!(dir, Path::new("."));
    }

    #[test]
    fn log_path_needs_a_file_name() {
        assert!(split_log_path(Path::new("/")).is_err());
    }
}
