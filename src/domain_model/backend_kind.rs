use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// The logging library a [`crate::logger::Logger`] delegates to.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum BackendKind {
    Tracing,
    EnvLogger,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Tracing => "tracing",
            BackendKind::EnvLogger => "env_logger",
        }
    }

    /// Whether this build carries the adapter for `self`.
    pub fn is_compiled(&self) -> bool {
        match self {
            BackendKind::Tracing => cfg!(feature = "tracing-backend"),
            BackendKind::EnvLogger => cfg!(feature = "env-logger-backend"),
        }
    }
}

impl Default for BackendKind {
    fn default() -> Self {
        if cfg!(feature = "tracing-backend") {
            BackendKind::Tracing
        } else {
            BackendKind::EnvLogger
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log backend: {0:?}")]
pub struct ParseBackendError(pub String);

impl FromStr for BackendKind {
    type Err = ParseBackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tracing" => Ok(BackendKind::Tracing),
            "env_logger" | "env-logger" | "envlogger" => Ok(BackendKind::EnvLogger),
            _ => Err(ParseBackendError(s.to_owned())),
        }
    }
}

impl TryFrom<String> for BackendKind {
    type Error = ParseBackendError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
