//! CLI configuration
//!
//! Sources, lowest precedence first:
//! 1. Built-in defaults
//! 2. Optional TOML file passed with `--config`
//! 3. Environment variables prefixed with `PRIMCONV__` (e.g. `PRIMCONV__LOGGING__LEVEL=debug`)

use std::path::Path;

use config::{Config, Environment, File};
use serde::Deserialize;

const ENV_PREFIX: &str = "PRIMCONV";
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CliConfig {
    pub logging: LoggingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Default filter level; `RUST_LOG` takes precedence when set.
    pub level: String,
    /// Emit JSON log lines instead of human-readable output.
    pub json: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl CliConfig {
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = Config::builder()
            .set_default("logging.level", "warn")?
            .set_default("logging.json", false)?
            .set_default("output.pretty", true)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(format!(
                "logging.level must be one of {}, got '{}'",
                LOG_LEVELS.join(", "),
                self.logging.level
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn write_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "fhir-primconv-{}-{}.toml",
            name,
            std::process::id()
        ));
        fs::write(&path, contents).expect("write config file");
        path
    }

    #[test]
    fn defaults_are_valid() {
        let config = CliConfig::load(None).unwrap();
        assert!(config.validate().is_ok());
        assert!(config.output.pretty);
    }

    #[test]
    fn file_overrides_defaults() {
        let path = write_config(
            "override",
            "[logging]\nlevel = \"debug\"\njson = true\n\n[output]\npretty = false\n",
        );
        let config = CliConfig::load(Some(&path)).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
        assert!(!config.output.pretty);
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = std::env::temp_dir().join("fhir-primconv-does-not-exist.toml");
        assert!(CliConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn unknown_level_fails_validation() {
        let config = CliConfig {
            logging: LoggingConfig {
                level: "chatty".to_string(),
                json: false,
            },
            output: OutputConfig { pretty: true },
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("chatty"));
    }
}
