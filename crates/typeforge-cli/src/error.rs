//! Errors raised by the command layer, their hints and exit codes.

use std::error::Error;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use typeforge_core::error::{ErrorCategory as CoreCategory, TypeforgeError};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// A flag combination or path that cannot be acted on.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A type or function name is not usable in generated TypeScript.
    #[error("Invalid {kind} name '{name}': {reason}")]
    InvalidName {
        kind: &'static str,
        name: String,
        reason: String,
    },

    /// A settings file that does not parse or cannot be written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error propagated from `typeforge-core`.
    #[error("{0}")]
    Core(#[from] TypeforgeError),

    /// Reading or writing outside the core failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// The overwrite prompt was declined.
    #[error("Operation cancelled")]
    Cancelled,

    /// `switch` had nothing to work on.
    #[error("No files to switch")]
    NoFilesFound { dir: Option<PathBuf> },

    /// Some files of a switch run failed; the others were written.
    #[error("{failed} of {total} files could not be switched")]
    SwitchFailed { failed: usize, total: usize },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Things the user can try next.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message, .. } => vec![
                format!("Check your input: {message}"),
                "See 'typeforge <command> --help'".into(),
            ],

            Self::InvalidName { kind, .. } if *kind == "type" => vec![
                "Type names start with an uppercase letter".into(),
                "Use letters, digits, '_' and '$' only".into(),
                "Examples: User, ApiResponse, Product2".into(),
            ],

            Self::InvalidName { .. } => vec![
                "Function names must be valid identifiers".into(),
                "Use letters, digits, '_' and '$' only, not starting with a digit".into(),
                "Examples: getDummyUser, loadProducts".into(),
            ],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {message}"),
                "Check the file reported by 'typeforge config path'".into(),
                "Use 'typeforge init --force' to recreate a default config".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {message}"),
                "Make sure the target directory exists and is writable".into(),
            ],

            Self::Cancelled => vec![
                "Nothing was written".into(),
                "Pass --force or --yes to overwrite without asking".into(),
            ],

            Self::NoFilesFound { dir } => {
                let mut suggestions = vec!["Pass files explicitly or search a directory with --dir".into()];
                if let Some(dir) = dir {
                    suggestions.push(format!(
                        "No candidate files below '{}': check --pattern and the switch.extension setting",
                        dir.display()
                    ));
                }
                suggestions
            }

            Self::SwitchFailed { .. } => vec![
                "The failed files are listed above and were left untouched".into(),
                "Fix the reported marker problems and run the switch again".into(),
            ],
        }
    }

    /// Core categories fold into the four CLI ones.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::UserError,
            Self::InvalidName { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::Malformed => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
            Self::Cancelled => ErrorCategory::UserError,
            Self::NoFilesFound { .. } => ErrorCategory::NotFound,
            Self::SwitchFailed { .. } => ErrorCategory::UserError,
        }
    }

    /// Process exit status: 2 user, 3 not found, 4 configuration, 1 internal.
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// The stderr report for this error. Causes are listed only when
    /// `verbose` is set.
    pub fn render(&self, verbose: bool, colored: bool) -> String {
        let paint = |text: &str, style: fn(&str) -> String| {
            if colored { style(text) } else { text.to_owned() }
        };

        let mut lines = vec![
            String::new(),
            format!(
                "{} {self}",
                paint("error:", |t| t.red().bold().to_string())
            ),
        ];

        if verbose {
            let causes = std::iter::successors(self.source(), |&err| err.source());
            lines.extend(causes.map(|cause| {
                paint(&format!("  caused by: {cause}"), |t| t.dimmed().to_string())
            }));
        }

        let hints = self.suggestions();
        if !hints.is_empty() {
            lines.push(String::new());
            lines.push(paint("hint:", |t| t.yellow().bold().to_string()));
            lines.extend(hints.iter().map(|hint| format!("  {hint}")));
        }

        if !verbose {
            lines.push(String::new());
            lines.push(paint("Run again with -v for the underlying cause.", |t| {
                t.dimmed().to_string()
            }));
        }

        lines.join("\n") + "\n"
    }

    /// Record the failure in the log at a level matching its category.
    pub fn log(&self) {
        let category = self.category();
        match category {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(?category, error = %self, "Command failed")
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(?category, error = %self, "Command failed")
            }
        }
        if let Some(cause) = self.source() {
            tracing::debug!(%cause, "Underlying cause");
        }
    }
}

/// Coarse grouping that decides the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    UserError,
    NotFound,
    Configuration,
    Internal,
}

/// Attach a message to a foreign error while converting it.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

impl<T> IntoCli<T> for Result<T, TypeforgeError> {
    /// Core errors already carry their own context.
    fn with_cli_context<F, S>(self, _f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(CliError::Core)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use typeforge_core::application::ApplicationError;
    use typeforge_core::domain::DomainError;

    // ── suggestions ───────────────────────────────────────────────────────

    #[test]
    fn type_name_suggestions_mention_uppercase() {
        let err = CliError::InvalidName {
            kind: "type",
            name: "user".into(),
            reason: "must start with an uppercase letter".into(),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("uppercase")));
    }

    #[test]
    fn function_name_suggestions_give_examples() {
        let err = CliError::InvalidName {
            kind: "function",
            name: "get-user".into(),
            reason: "not an identifier".into(),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("getDummyUser")));
    }

    #[test]
    fn core_suggestions_pass_through() {
        let core = TypeforgeError::from(ApplicationError::OutputExists {
            path: PathBuf::from("a.ts"),
        });
        let expected = core.suggestions();
        assert_eq!(CliError::Core(core).suggestions(), expected);
    }

    // ── exit codes ────────────────────────────────────────────────────────

    #[test]
    fn exit_code_user_error() {
        assert_eq!(
            CliError::InvalidInput {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            2
        );
        assert_eq!(CliError::SwitchFailed { failed: 1, total: 2 }.exit_code(), 2);
    }

    #[test]
    fn exit_code_not_found() {
        assert_eq!(CliError::NoFilesFound { dir: None }.exit_code(), 3);
        let missing = CliError::Core(
            ApplicationError::FileNotFound {
                path: PathBuf::from("x.json"),
            }
            .into(),
        );
        assert_eq!(missing.exit_code(), 3);
    }

    #[test]
    fn exit_code_for_malformed_input() {
        let err = CliError::Core(
            DomainError::MalformedMarkers {
                line: 3,
                reason: "unclosed".into(),
            }
            .into(),
        );
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn exit_code_configuration() {
        assert_eq!(
            CliError::ConfigError {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            4
        );
    }

    #[test]
    fn exit_code_internal() {
        assert_eq!(
            CliError::IoError {
                message: "x".into(),
                source: io::Error::other("e"),
            }
            .exit_code(),
            1
        );
    }

    // ── render ────────────────────────────────────────────────────────────

    #[test]
    fn plain_render_has_message_and_hints() {
        let err = CliError::SwitchFailed { failed: 1, total: 3 };
        let s = err.render(false, false);
        assert!(s.contains("error: 1 of 3 files could not be switched"));
        assert!(s.contains("hint:"));
        assert!(s.contains("Run again with -v"));
        assert!(!s.contains('\u{1b}'));
    }

    #[test]
    fn verbose_render_lists_causes() {
        let err = CliError::IoError {
            message: "writing config".into(),
            source: io::Error::other("disk full"),
        };
        let s = err.render(true, false);
        assert!(s.contains("caused by: disk full"));
        assert!(!s.contains("Run again with -v"));
    }

    // ── IntoCli ───────────────────────────────────────────────────────────

    #[test]
    fn into_cli_io_error() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let cli: CliResult<()> = result.with_cli_context(|| "reading config");
        assert!(matches!(cli, Err(CliError::IoError { ref message, .. }) if message == "reading config"));
    }
}
