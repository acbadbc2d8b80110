use super::{Logger, default_backend};
use crate::domain_model::{LogLevel, SinkOptions};
use crate::domain_port::LogError;
use crate::settings::LogSettings;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

pub const DEFAULT_LOGGER_NAME: &str = "polylog_default";

struct DefaultSlot {
    logger: Option<Arc<Logger>>,
    sinks: Option<SinkOptions>,
}

impl DefaultSlot {
    fn sinks(&self) -> SinkOptions {
        self.sinks.clone().unwrap_or_default()
    }
}

static DEFAULT_LOGGER: Mutex<DefaultSlot> = Mutex::new(DefaultSlot {
    logger: None,
    sinks: None,
});

fn slot() -> MutexGuard<'static, DefaultSlot> {
    DEFAULT_LOGGER.lock().unwrap_or_else(PoisonError::into_inner)
}

fn build_default(sinks: SinkOptions) -> Logger {
    let mut logger = Logger::with_backend(default_backend(sinks));
    if let Err(e) = logger.init(DEFAULT_LOGGER_NAME, LogLevel::Info) {
        warn!(error = %e, "default logger failed to initialize, logging is disabled");
    }
    logger
}

/// Sets where default loggers built from now on write (`default_logger`'s
/// lazy instance and [`init_default_logger`]). Unset means
/// [`SinkOptions::default`]. The current default logger is left alone.
pub fn set_default_sinks(sinks: SinkOptions) {
    slot().sinks = Some(sinks);
}

/// Returns the process-wide logger, creating it on first use with
/// [`DEFAULT_LOGGER_NAME`] at `Info`.
///
/// A creation failure leaves an inert logger in place rather than an error;
/// use [`init_default_logger`] when the caller needs to know.
pub fn default_logger() -> Arc<Logger> {
    let mut slot = slot();
    let sinks = slot.sinks();
    slot.logger
        .get_or_insert_with(|| Arc::new(build_default(sinks)))
        .clone()
}

/// Replaces the default logger with a fresh one named `name`.
///
/// The previous logger is shut down first, and the new one is installed even
/// when its `init` fails so later calls do not silently recreate a default.
pub fn init_default_logger(name: &str, level: LogLevel) -> Result<(), LogError> {
    let mut slot = slot();
    if let Some(previous) = slot.logger.take() {
        previous.shutdown();
    }
    let mut logger = Logger::with_backend(default_backend(slot.sinks()));
    let result = logger.init(name, level);
    debug!(name, %level, ok = result.is_ok(), "default logger replaced");
    slot.logger = Some(Arc::new(logger));
    result
}

/// Installs a caller-built logger as the default, shutting down the old one.
pub fn init_default_logger_with(logger: Logger) -> Arc<Logger> {
    let logger = Arc::new(logger);
    let mut slot = slot();
    if let Some(previous) = slot.logger.replace(logger.clone()) {
        previous.shutdown();
    }
    debug!(logger = ?logger, "default logger replaced");
    logger
}

/// Shuts down and releases the default logger. A later [`default_logger`]
/// call creates a new one.
pub fn shutdown_default_logger() {
    if let Some(previous) = slot().logger.take() {
        previous.shutdown();
    }
}

/// Owns the default logger's lifetime: dropping the guard shuts it down.
#[must_use = "dropping the guard shuts the default logger down"]
pub struct DefaultLoggerGuard {
    logger: Arc<Logger>,
}

impl DefaultLoggerGuard {
    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }
}

impl Drop for DefaultLoggerGuard {
    fn drop(&mut self) {
        let mut slot = slot();
        if slot
            .logger
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, &self.logger))
        {
            slot.logger.take();
        }
        drop(slot);
        self.logger.shutdown();
    }
}

/// Entry-point setup: builds the default logger from settings and hands back
/// the guard that tears it down. The settings' sinks also become the
/// [`set_default_sinks`] for later replacements.
pub fn install_default_logger(settings: &LogSettings) -> Result<DefaultLoggerGuard, LogError> {
    let logger = Logger::from_settings(settings)?;
    set_default_sinks(settings.sinks());
    Ok(DefaultLoggerGuard {
        logger: init_default_logger_with(logger),
    })
}
