use crate::domain_model::{BackendKind, LogLevel, SinkOptions};
use crate::domain_port::{LogBackend, LogError};
#[cfg(feature = "env-logger-backend")]
use crate::infra_env_logger::EnvLoggerBackend;
#[cfg(feature = "tracing-backend")]
use crate::infra_tracing::TracingBackend;
use crate::settings::LogSettings;
use std::fmt::{self, Write};

/// Builds the adapter for `kind`, failing when this build left it out.
pub fn create_backend(
    kind: BackendKind,
    sinks: SinkOptions,
) -> Result<Box<dyn LogBackend>, LogError> {
    match kind {
        #[cfg(feature = "tracing-backend")]
        BackendKind::Tracing => Ok(Box::new(TracingBackend::new(sinks))),
        #[cfg(feature = "env-logger-backend")]
        BackendKind::EnvLogger => Ok(Box::new(EnvLoggerBackend::new(sinks))),
        #[allow(unreachable_patterns)]
        other => Err(LogError::InvalidArgument(format!(
            "log backend {other} is not compiled in"
        ))),
    }
}

/// The adapter behind [`BackendKind::default`].
pub fn default_backend(sinks: SinkOptions) -> Box<dyn LogBackend> {
    #[cfg(feature = "tracing-backend")]
    return Box::new(TracingBackend::new(sinks));
    #[cfg(not(feature = "tracing-backend"))]
    return Box::new(EnvLoggerBackend::new(sinks));
}

/// Leveled logging front end.
///
/// Every call is checked against the backend's enablement first, so filtered
/// or uninitialized calls never format their arguments. Logging calls never
/// fail; only configuration calls (`init`, `set_level`) return errors.
pub struct Logger {
    backend: Box<dyn LogBackend>,
}

impl Logger {
    pub fn new(kind: BackendKind, sinks: SinkOptions) -> Result<Self, LogError> {
        Ok(Self::with_backend(create_backend(kind, sinks)?))
    }

    pub fn with_backend(backend: Box<dyn LogBackend>) -> Self {
        Self { backend }
    }

    /// Builds the configured backend and initializes it.
    pub fn from_settings(settings: &LogSettings) -> Result<Self, LogError> {
        let mut logger = Self::new(settings.backend, settings.sinks())?;
        logger.init(&settings.name, settings.level)?;
        Ok(logger)
    }

    pub fn init(&mut self, name: &str, level: LogLevel) -> Result<(), LogError> {
        self.backend.init(name, level)
    }

    pub fn set_level(&self, level: LogLevel) -> Result<(), LogError> {
        self.backend.set_level(level)
    }

    pub fn level(&self) -> LogLevel {
        self.backend.level()
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.backend.is_enabled(level)
    }

    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    pub fn name(&self) -> Option<&str> {
        self.backend.name()
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        if self.is_enabled(level) {
            self.backend.log(level, message);
        }
    }

    /// Formats and writes a message, discarding formatting errors.
    pub fn logf(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        let _ = self.try_logf(level, args);
    }

    /// Like [`Logger::logf`] but reports a failing `Display`/`Debug` impl.
    pub fn try_logf(&self, level: LogLevel, args: fmt::Arguments<'_>) -> Result<(), LogError> {
        if !self.is_enabled(level) {
            return Ok(());
        }
        if let Some(message) = args.as_str() {
            self.backend.log(level, message);
            return Ok(());
        }
        let mut message = String::new();
        message.write_fmt(args)?;
        self.backend.log(level, &message);
        Ok(())
    }

    pub fn trace(&self, message: impl fmt::Display) {
        self.logf(LogLevel::Trace, format_args!("{message}"));
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.logf(LogLevel::Debug, format_args!("{message}"));
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.logf(LogLevel::Info, format_args!("{message}"));
    }

    pub fn warn(&self, message: impl fmt::Display) {
        self.logf(LogLevel::Warn, format_args!("{message}"));
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.logf(LogLevel::Error, format_args!("{message}"));
    }

    pub fn critical(&self, message: impl fmt::Display) {
        self.logf(LogLevel::Critical, format_args!("{message}"));
    }

    pub fn flush(&self) {
        self.backend.flush();
    }

    pub fn shutdown(&self) {
        self.backend.shutdown();
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("backend", &self.backend_kind())
            .field("name", &self.name())
            .field("level", &self.level())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_port::AdapterState;
    use std::sync::{Arc, Mutex};

    type Entries = Arc<Mutex<Vec<(LogLevel, String)>>>;

    struct RecordingBackend {
        state: AdapterState,
        entries: Entries,
    }

    impl LogBackend for RecordingBackend {
        fn kind(&self) -> BackendKind {
            BackendKind::Tracing
        }
        fn init(&mut self, name: &str, level: LogLevel) -> Result<(), LogError> {
            self.state.check_init(name)?;
            self.state.mark_initialized(name, level);
            Ok(())
        }
        fn set_level(&self, level: LogLevel) -> Result<(), LogError> {
            self.state.check_initialized()?;
            self.state.store_level(level);
            Ok(())
        }
        fn level(&self) -> LogLevel {
            self.state.level()
        }
        fn is_enabled(&self, level: LogLevel) -> bool {
            self.state.is_enabled(level)
        }
        fn log(&self, level: LogLevel, message: &str) {
            self.entries.lock().unwrap().push((level, message.to_string()));
        }
        fn flush(&self) {}
        fn shutdown(&self) {
            self.state.mark_shutdown();
        }
        fn name(&self) -> Option<&str> {
            self.state.name()
        }
    }

    fn recording_logger() -> (Logger, Entries) {
        let entries = Entries::default();
        let backend = RecordingBackend {
            state: AdapterState::new(),
            entries: entries.clone(),
        };
        (Logger::with_backend(Box::new(backend)), entries)
    }

    struct Broken;

    impl fmt::Display for Broken {
        fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn uninitialized_logger_drops_everything() {
        let (logger, entries) = recording_logger();
        logger.critical("nobody hears this");
        logger.log(LogLevel::Error, "nor this");
        assert!(entries.lock().unwrap().is_empty());
        assert!(matches!(
            logger.set_level(LogLevel::Info),
            Err(LogError::FailedPrecondition(_))
        ));
    }

    #[test]
    fn filtered_levels_never_reach_backend() {
        let (mut logger, entries) = recording_logger();
        logger.init("facade", LogLevel::Warn).unwrap();

        logger.trace("t");
        logger.debug("d");
        logger.info("i");
        logger.warn("w");
        logger.error(format_args!("code {}", 500));
        logger.critical("c");

        let levels: Vec<_> = entries.lock().unwrap().iter().map(|(l, _)| *l).collect();
        assert_eq!(
            levels,
            vec![LogLevel::Warn, LogLevel::Error, LogLevel::Critical]
        );
        assert_eq!(entries.lock().unwrap()[1].1, "code 500");
    }

    #[test]
    fn logf_formats_positional_arguments() {
        let (mut logger, entries) = recording_logger();
        logger.init("facade", LogLevel::Trace).unwrap();

        logger.logf(LogLevel::Info, format_args!("user {} did {}", 12345, "login"));
        logger.logf(LogLevel::Warn, format_args!("success rate: {:.1}%", 98.54));
        logger.logf(LogLevel::Debug, format_args!("no arguments"));

        let entries = entries.lock().unwrap();
        assert_eq!(entries[0].1, "user 12345 did login");
        assert_eq!(entries[1].1, "success rate: 98.5%");
        assert_eq!(entries[2].1, "no arguments");
    }

    #[test]
    fn format_errors_are_reported_or_swallowed() {
        let (mut logger, entries) = recording_logger();
        logger.init("facade", LogLevel::Info).unwrap();

        assert!(matches!(
            logger.try_logf(LogLevel::Info, format_args!("{}", Broken)),
            Err(LogError::Format(_))
        ));
        logger.logf(LogLevel::Info, format_args!("{}", Broken));
        logger.info(Broken);
        assert!(entries.lock().unwrap().is_empty());

        // filtered calls never format, so they cannot fail
        assert!(
            logger
                .try_logf(LogLevel::Debug, format_args!("{}", Broken))
                .is_ok()
        );
    }

    #[test]
    fn shutdown_then_reinit() {
        let (mut logger, entries) = recording_logger();
        logger.init("facade", LogLevel::Info).unwrap();
        logger.shutdown();
        logger.shutdown();
        assert!(LogLevel::ALL.iter().all(|l| !logger.is_enabled(*l)));
        logger.error("after shutdown");
        assert!(entries.lock().unwrap().is_empty());

        logger.init("facade", LogLevel::Debug).unwrap();
        assert_eq!(logger.level(), LogLevel::Debug);
        assert_eq!(logger.name(), Some("facade"));
    }

    #[test]
    fn debug_output_names_backend() {
        let (mut logger, _) = recording_logger();
        logger.init("facade", LogLevel::Info).unwrap();
        let rendered = format!("{logger:?}");
        assert!(rendered.contains("Tracing"));
        assert!(rendered.contains("facade"));
    }
}
