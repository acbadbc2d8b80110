use crate::domain_model::{BackendKind, LogLevel, SinkOptions};
use crate::domain_port::{AdapterState, LogBackend, LogError};
use anyhow::{Context, anyhow};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};
use tracing::Dispatch;
use tracing_subscriber::{
    EnvFilter, Registry, fmt, fmt::time::ChronoLocal, layer::SubscriberExt, reload,
};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Adapter over `tracing`: one private [`Dispatch`] per logger with a console
/// layer and a `<name>.log` file layer behind a reloadable level filter.
///
/// The dispatch and its file are dropped by `shutdown`, not only on drop.
pub struct TracingBackend {
    sinks: SinkOptions,
    state: AdapterState,
    handle: RwLock<Option<TracingHandle>>,
}

struct TracingHandle {
    dispatch: Dispatch,
    reload_handle: reload::Handle<EnvFilter, Registry>,
    file: Arc<File>,
}

impl TracingBackend {
    pub fn new(sinks: SinkOptions) -> Self {
        Self {
            sinks,
            state: AdapterState::new(),
            handle: RwLock::new(None),
        }
    }

    fn handle(&self) -> RwLockReadGuard<'_, Option<TracingHandle>> {
        self.handle.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn to_native(level: LogLevel) -> tracing::Level {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error | LogLevel::Critical => tracing::Level::ERROR,
        }
    }

    pub fn from_native(level: tracing::Level) -> LogLevel {
        match level {
            tracing::Level::TRACE => LogLevel::Trace,
            tracing::Level::DEBUG => LogLevel::Debug,
            tracing::Level::INFO => LogLevel::Info,
            tracing::Level::WARN => LogLevel::Warn,
            _ => LogLevel::Error,
        }
    }

    fn native_filter(level: LogLevel) -> anyhow::Result<EnvFilter> {
        let directive = Self::to_native(level).as_str().to_ascii_lowercase();
        EnvFilter::try_new(directive).map_err(|e| anyhow!(e))
    }

    fn build(&self, name: &str, level: LogLevel) -> anyhow::Result<TracingHandle> {
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
        let file = Arc::new(file);

        let (filter, reload_handle) = reload::Layer::new(Self::native_filter(level)?);

        let console = self.sinks.console.then(|| {
            fmt::layer()
                .with_writer(io::stdout)
                .with_ansi(self.sinks.ansi)
                .with_target(false)
                .with_timer(ChronoLocal::new(TIME_FORMAT.to_owned()))
        });
        let file_layer = fmt::layer()
            .with_writer(file.clone())
            .with_ansi(false)
            .with_target(false)
            .with_timer(ChronoLocal::new(TIME_FORMAT.to_owned()));

        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(console)
            .with(file_layer);

        Ok(TracingHandle {
            dispatch: Dispatch::new(subscriber),
            reload_handle,
            file,
        })
    }

    fn emit(dispatch: &Dispatch, name: &str, level: LogLevel, message: &str) {
        tracing::dispatcher::with_default(dispatch, || match level {
            LogLevel::Trace => tracing::trace!(logger = %name, "{message}"),
            LogLevel::Debug => tracing::debug!(logger = %name, "{message}"),
            LogLevel::Info => tracing::info!(logger = %name, "{message}"),
            LogLevel::Warn => tracing::warn!(logger = %name, "{message}"),
            LogLevel::Error => tracing::error!(logger = %name, "{message}"),
            LogLevel::Critical => tracing::error!(logger = %name, critical = true, "{message}"),
        });
    }

    fn flush_handle(handle: &TracingHandle) {
        let _ = io::stdout().flush();
        let _ = handle.file.sync_data();
    }
}

impl Default for TracingBackend {
    fn default() -> Self {
        Self::new(SinkOptions::default())
    }
}

impl LogBackend for TracingBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Tracing
    }

    fn init(&mut self, name: &str, level: LogLevel) -> Result<(), LogError> {
        self.state.check_init(name)?;
        let handle = self
            .build(name, level)
            .context("failed to initialize tracing backend")?;
        *self.handle.get_mut().unwrap_or_else(PoisonError::into_inner) = Some(handle);
        self.state.mark_initialized(name, level);
        Ok(())
    }

    fn set_level(&self, level: LogLevel) -> Result<(), LogError> {
        self.state.check_initialized()?;
        if let Some(handle) = self.handle().as_ref() {
            let filter = Self::native_filter(level)?;
            handle
                .reload_handle
                .reload(filter)
                .map_err(|e| anyhow!("failed to set log level: {e}"))?;
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
        if let (Some(handle), Some(name)) = (self.handle().as_ref(), self.state.name()) {
            Self::emit(&handle.dispatch, name, level, message);
        }
    }

    fn flush(&self) {
        if !self.state.is_initialized() {
            return;
        }
        if let Some(handle) = self.handle().as_ref() {
            Self::flush_handle(handle);
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

impl Drop for TracingBackend {
    fn drop(&mut self) {
        self.shutdown();
    }
}
