#[cfg(not(any(feature = "tracing-backend", feature = "env-logger-backend")))]
compile_error!("no log backend enabled: enable `tracing-backend` and/or `env-logger-backend`");

pub mod domain_model;
pub mod domain_port;
pub mod logger;
pub mod settings;

#[cfg(feature = "env-logger-backend")]
pub mod infra_env_logger;
#[cfg(feature = "tracing-backend")]
pub mod infra_tracing;

pub use domain_model::{BackendKind, LogLevel, SinkOptions};
pub use domain_port::{LogBackend, LogError};
pub use logger::Logger;
