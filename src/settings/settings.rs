use crate::domain_model::{BackendKind, LogLevel, SinkOptions};
use crate::logger::DEFAULT_LOGGER_NAME;
use anyhow::{Result, anyhow};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub log: LogSettings,
    pub diagnostics: DiagnosticsSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub name: String,
    pub level: LogLevel,
    pub backend: BackendKind, // "tracing" or "env_logger"
    pub directory: PathBuf,
    pub console: bool,
    pub ansi: bool,
    pub truncate: bool,
}

impl LogSettings {
    pub fn sinks(&self) -> SinkOptions {
        SinkOptions {
            directory: self.directory.clone(),
            console: self.console,
            ansi: self.ansi,
            truncate: self.truncate,
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        let sinks = SinkOptions::default();
        Self {
            name: DEFAULT_LOGGER_NAME.to_string(),
            level: LogLevel::default(),
            backend: BackendKind::default(),
            directory: sinks.directory,
            console: sinks.console,
            ansi: sinks.ansi,
            truncate: sinks.truncate,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiagnosticsSettings {
    pub filter: String,
}

impl Default for DiagnosticsSettings {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

#[cfg(debug_assertions)]
const SETTINGS_PATH: &str = "settings/dev.toml";
#[cfg(not(debug_assertions))]
const SETTINGS_PATH: &str = "settings/release.toml";

const ENV_PREFIX: &str = "POLYLOG";

/// Loads settings from `path` (required) or the build profile's default file
/// (optional), with `POLYLOG__LOG__LEVEL`-style environment overrides.
pub fn parse_settings(path: Option<&str>) -> Result<Settings> {
    load(path, Environment::with_prefix(ENV_PREFIX).separator("__"))
}

fn load(path: Option<&str>, environment: Environment) -> Result<Settings> {
    let file = match path {
        Some(path) => File::with_name(path),
        None => File::with_name(SETTINGS_PATH).required(false),
    };

    let settings: Settings = Config::builder()
        .add_source(file)
        .add_source(environment)
        .build()
        .map_err(|e| anyhow!(e))?
        .try_deserialize()
        .map_err(|e| anyhow!(e))?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn no_env() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .source(Some(HashMap::new()))
    }

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_every_log_field() {
        let file = toml_file(
            r#"
            [log]
            name = "svc"
            level = "Warning"
            backend = "env_logger"
            directory = "/tmp/svc-logs"
            console = false
            ansi = false
            truncate = false

            [diagnostics]
            filter = "debug"
            "#,
        );
        let settings = load(file.path().to_str(), no_env()).unwrap();

        assert_eq!(settings.log.name, "svc");
        assert_eq!(settings.log.level, LogLevel::Warn);
        assert_eq!(settings.log.backend, BackendKind::EnvLogger);
        assert_eq!(
            settings.log.sinks(),
            SinkOptions {
                directory: PathBuf::from("/tmp/svc-logs"),
                console: false,
                ansi: false,
                truncate: false,
            }
        );
        assert_eq!(settings.diagnostics.filter, "debug");
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let file = toml_file("[log]\nlevel = \"fatal\"\n");
        let settings = load(file.path().to_str(), no_env()).unwrap();

        assert_eq!(settings.log.level, LogLevel::Critical);
        assert_eq!(settings.log.name, DEFAULT_LOGGER_NAME);
        assert_eq!(settings.log.backend, BackendKind::default());
        assert_eq!(settings.log.sinks(), SinkOptions::default());
        assert_eq!(settings.diagnostics.filter, "warn");
    }

    #[test]
    fn environment_overrides_file() {
        let file = toml_file("[log]\nname = \"from_file\"\nlevel = \"info\"\n");
        let env = Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .source(Some(HashMap::from([
                ("POLYLOG__LOG__LEVEL".to_string(), "error".to_string()),
                ("POLYLOG__LOG__NAME".to_string(), "from_env".to_string()),
            ])));
        let settings = load(file.path().to_str(), env).unwrap();

        assert_eq!(settings.log.level, LogLevel::Error);
        assert_eq!(settings.log.name, "from_env");
    }

    #[test]
    fn rejects_unknown_level_and_backend() {
        let file = toml_file("[log]\nlevel = \"verbose\"\n");
        assert!(load(file.path().to_str(), no_env()).is_err());

        let file = toml_file("[log]\nbackend = \"glog\"\n");
        assert!(load(file.path().to_str(), no_env()).is_err());
    }

    #[test]
    fn explicit_path_must_exist() {
        assert!(parse_settings(Some("does/not/exist.toml")).is_err());
    }
}
