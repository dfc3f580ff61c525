//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `TYPEFORGE_<SECTION>__<KEY>`
//! 3. `--config FILE` (must exist when given)
//! 4. `./.typeforge.toml`
//! 5. Global `config.toml` in the platform config directory
//! 6. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use typeforge_adapters::EmitterSettings;

/// File name of the per-project configuration.
pub const LOCAL_CONFIG: &str = ".typeforge.toml";

const ENV_PREFIX: &str = "TYPEFORGE";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub output: OutputConfig,
    pub logging: LoggingConfig,
    /// Defaults for generated mock modules.
    pub mock: MockConfig,
    /// Module paths imported by generated service classes.
    pub service: ServiceConfig,
    pub switch: SwitchConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log file used when `--log-file` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    pub asynchronous: bool,
    pub wrapper: bool,
    /// Types import for modules printed to stdout.
    pub default_types_import: String,
    pub response_import: String,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            asynchronous: true,
            wrapper: true,
            default_types_import: "@/types/api/generated".into(),
            response_import: "@/types/api/api-general".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub base_service_import: String,
    pub http_client_import: String,
    pub response_import: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        let settings = EmitterSettings::default();
        Self {
            base_service_import: settings.base_service_import,
            http_client_import: settings.http_client_import,
            response_import: settings.response_import,
        }
    }
}

impl From<&ServiceConfig> for EmitterSettings {
    fn from(config: &ServiceConfig) -> Self {
        Self {
            base_service_import: config.base_service_import.clone(),
            http_client_import: config.http_client_import.clone(),
            response_import: config.response_import.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchConfig {
    /// Extension of files picked up by `switch --dir`.
    pub extension: String,
    /// Directory names never descended into.
    pub skip_dirs: Vec<String>,
}

impl Default for SwitchConfig {
    fn default() -> Self {
        Self {
            extension: "ts".into(),
            skip_dirs: vec!["node_modules".into()],
        }
    }
}

impl AppConfig {
    /// Load configuration, layering files and environment over defaults.
    ///
    /// `config_file` is the path the user passed via `--config`; unlike the
    /// global and local files it must exist.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&Self::default()).context("Invalid built-in defaults")?);

        if let Some(global) = Self::config_path() {
            builder = builder.add_source(File::from(global).required(false));
        }
        builder = builder.add_source(File::from(PathBuf::from(LOCAL_CONFIG)).required(false));

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path.clone()).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("switch.skip_dirs"),
            )
            .build()
            .context("Failed to read configuration")?;

        config
            .try_deserialize()
            .context("Failed to parse configuration")
    }

    /// Path to the global configuration file, if the platform has a config
    /// directory.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "typeforge", "typeforge")
            .map(|d| d.config_dir().join("config.toml"))
    }

    /// The file with the highest priority that is actually in play.
    pub fn active_path(config_file: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = config_file {
            return Some(path.to_path_buf());
        }
        let local = PathBuf::from(LOCAL_CONFIG);
        if local.exists() {
            return Some(local);
        }
        Self::config_path().filter(|path| path.exists())
    }

    /// Import paths for the TypeScript emitter.
    pub fn emitter_settings(&self) -> EmitterSettings {
        EmitterSettings::from(&self.service)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_generated_paths() {
        let cfg = AppConfig::default();
        assert!(cfg.mock.asynchronous);
        assert!(cfg.mock.wrapper);
        assert_eq!(cfg.mock.default_types_import, "@/types/api/generated");
        assert_eq!(cfg.switch.skip_dirs, ["node_modules"]);
        assert_eq!(cfg.emitter_settings(), EmitterSettings::default());
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[mock]\nwrapper = false\n\n[switch]\nextension = \"tsx\"").unwrap();

        let cfg = AppConfig::load(Some(&file.path().to_path_buf())).unwrap();
        assert!(!cfg.mock.wrapper);
        assert!(cfg.mock.asynchronous);
        assert_eq!(cfg.switch.extension, "tsx");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let missing = PathBuf::from("/definitely/not/here/typeforge.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn defaults_serialise_to_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        assert!(text.contains("[mock]"));
        assert!(text.contains("skip_dirs"));
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, AppConfig::default());
    }

    #[test]
    fn active_path_prefers_explicit_file() {
        let path = Path::new("custom.toml");
        assert_eq!(AppConfig::active_path(Some(path)), Some(path.to_path_buf()));
    }
}
