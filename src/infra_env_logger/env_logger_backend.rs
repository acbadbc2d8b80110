use crate::domain_model::{BackendKind, LogLevel, SinkOptions};
use crate::domain_port::{AdapterState, LogBackend, LogError};
use anyhow::Context;
use env_logger::{Builder, Target, WriteStyle};
use log::Log;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::sync::{PoisonError, RwLock, RwLockReadGuard};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Adapter over `log` + `env_logger`.
///
/// The file logger is rebuilt on every level change, the same way a process
/// reconfigures `env_logger` through its filter string, and swapped in under
/// a write lock. A second logger echoes records to stderr when console output
/// is on. Both loggers and the file are released by `shutdown`.
pub struct EnvLoggerBackend {
    sinks: SinkOptions,
    state: AdapterState,
    handle: RwLock<Option<EnvLoggerHandle>>,
}

struct EnvLoggerHandle {
    file: File,
    file_logger: RwLock<env_logger::Logger>,
    console_logger: Option<RwLock<env_logger::Logger>>,
}

impl EnvLoggerBackend {
    pub fn new(sinks: SinkOptions) -> Self {
        Self {
            sinks,
            state: AdapterState::new(),
            handle: RwLock::new(None),
        }
    }

    fn handle(&self) -> RwLockReadGuard<'_, Option<EnvLoggerHandle>> {
        self.handle.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn to_native(level: LogLevel) -> log::Level {
        match level {
            LogLevel::Trace => log::Level::Trace,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info => log::Level::Info,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Error | LogLevel::Critical => log::Level::Error,
        }
    }

    pub fn from_native(level: log::Level) -> LogLevel {
        match level {
            log::Level::Trace => LogLevel::Trace,
            log::Level::Debug => LogLevel::Debug,
            log::Level::Info => LogLevel::Info,
            log::Level::Warn => LogLevel::Warn,
            log::Level::Error => LogLevel::Error,
        }
    }

    fn builder(name: &str, level: LogLevel) -> Builder {
        let name = name.to_owned();
        let mut builder = Builder::new();
        builder
            .filter_level(Self::to_native(level).to_level_filter())
            .format(move |buf, record| {
                writeln!(
                    buf,
                    "[{}] [{}] [{}] {}",
                    chrono::Local::now().format(TIME_FORMAT),
                    name,
                    record.level(),
                    record.args()
                )
            });
        builder
    }

    fn file_logger(
        name: &str,
        level: LogLevel,
        file: &File,
    ) -> anyhow::Result<env_logger::Logger> {
        let pipe = file.try_clone().context("cloning log file handle")?;
        Ok(Self::builder(name, level)
            .write_style(WriteStyle::Never)
            .target(Target::Pipe(Box::new(pipe)))
            .build())
    }

    fn console_logger(&self, name: &str, level: LogLevel) -> env_logger::Logger {
        let style = if self.sinks.ansi {
            WriteStyle::Auto
        } else {
            WriteStyle::Never
        };
        Self::builder(name, level)
            .write_style(style)
            .target(Target::Stderr)
            .build()
    }

    fn build(&self, name: &str, level: LogLevel) -> anyhow::Result<EnvLoggerHandle> {
        fs::create_dir_all(self.sinks.directory())
            .with_context(|| format!("creating {}", self.sinks.directory().display()))?;
        let path = self.sinks.log_file(name);
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(!self.sinks.truncate)
            .truncate(self.sinks.truncate)
            .open(&path)
            .with_context(|| format!("opening {}", path.display()))?;

        let file_logger = RwLock::new(Self::file_logger(name, level, &file)?);
        let console_logger = self
            .sinks
            .console
            .then(|| RwLock::new(self.console_logger(name, level)));

        Ok(EnvLoggerHandle {
            file,
            file_logger,
            console_logger,
        })
    }

    fn replace(slot: &RwLock<env_logger::Logger>, logger: env_logger::Logger) {
        *slot.write().unwrap_or_else(PoisonError::into_inner) = logger;
    }
}

impl EnvLoggerHandle {
    fn write(&self, record: &log::Record<'_>) {
        let slots = std::iter::once(&self.file_logger).chain(self.console_logger.as_ref());
        for slot in slots {
            let logger = slot.read().unwrap_or_else(PoisonError::into_inner);
            if logger.enabled(record.metadata()) {
                logger.log(record);
            }
        }
    }
}

impl Default for EnvLoggerBackend {
    fn default() -> Self {
        Self::new(SinkOptions::default())
    }
}

impl LogBackend for EnvLoggerBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::EnvLogger
    }

    fn init(&mut self, name: &str, level: LogLevel) -> Result<(), LogError> {
        self.state.check_init(name)?;
        let handle = self
            .build(name, level)
            .context("failed to initialize env_logger backend")?;
        *self.handle.get_mut().unwrap_or_else(PoisonError::into_inner) = Some(handle);
        self.state.mark_initialized(name, level);
        Ok(())
    }

    fn set_level(&self, level: LogLevel) -> Result<(), LogError> {
        self.state.check_initialized()?;
        if let (Some(handle), Some(name)) = (self.handle().as_ref(), self.state.name()) {
            let file_logger = Self::file_logger(name, level, &handle.file)
                .context("failed to set log level")?;
            Self::replace(&handle.file_logger, file_logger);
            if let Some(slot) = &handle.console_logger {
                Self::replace(slot, self.console_logger(name, level));
            }
        }
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
        if !self.is_enabled(level) {
            return;
        }
        let guard = self.handle();
        let (Some(handle), Some(name)) = (guard.as_ref(), self.state.name()) else {
            return;
        };
        handle.write(
            &log::Record::builder()
                .level(Self::to_native(level))
                .target(name)
                .args(format_args!("{message}"))
                .build(),
        );
    }

    fn flush(&self) {
        if !self.state.is_initialized() {
            return;
        }
        if let Some(handle) = self.handle().as_ref() {
            handle
                .file_logger
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .flush();
            if let Some(slot) = &handle.console_logger {
                slot.read().unwrap_or_else(PoisonError::into_inner).flush();
            }
            let _ = handle.file.sync_data();
        }
    }

    fn shutdown(&self) {
        if !self.state.is_initialized() {
            return;
        }
        self.flush();
        let released = self
            .handle
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        self.state.mark_shutdown();
        drop(released);
    }

    fn name(&self) -> Option<&str> {
        self.state.name()
    }
}

impl Drop for EnvLoggerBackend {
    fn drop(&mut self) {
        self.shutdown();
    }
}
