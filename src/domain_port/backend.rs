use crate::domain_model::{BackendKind, LogLevel, is_level_enabled};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// A logging library seen through the uniform six-level interface.
///
/// Implementations own exactly one handle of the wrapped library. `init`
/// builds it, `shutdown` flushes it and turns the adapter inert, and dropping
/// the adapter releases it. Everything after `init` works through `&self` so
/// a single instance can be shared between threads.
pub trait LogBackend: Send + Sync {
    fn kind(&self) -> BackendKind;

    /// Configures sinks for `name` with `level` as the minimum.
    fn init(&mut self, name: &str, level: LogLevel) -> Result<(), LogError>;

    fn set_level(&self, level: LogLevel) -> Result<(), LogError>;

    fn level(&self) -> LogLevel;

    /// False for every level while the backend is not initialized.
    fn is_enabled(&self, level: LogLevel) -> bool;

    /// Writes `message` if `level` is enabled. Write failures are dropped.
    fn log(&self, level: LogLevel, message: &str);

    fn flush(&self);

    /// Flushes and marks the backend uninitialized. Repeat calls do nothing.
    fn shutdown(&self);

    /// Name passed to the last successful `init`.
    fn name(&self) -> Option<&str>;
}

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("logger already initialized")]
    AlreadyInitialized,
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("failed precondition: {0}")]
    FailedPrecondition(String),
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
    #[error("failed to format log message")]
    Format(#[from] fmt::Error),
}

/// Name, minimum level and initialized flag every adapter keeps next to its
/// native handle.
#[derive(Debug)]
pub struct AdapterState {
    name: Option<String>,
    level: AtomicU8,
    initialized: AtomicBool,
}

impl AdapterState {
    pub fn new() -> Self {
        Self {
            name: None,
            level: AtomicU8::new(LogLevel::default().as_int()),
            initialized: AtomicBool::new(false),
        }
    }

    /// Validation run at the top of every adapter `init`.
    pub fn check_init(&self, name: &str) -> Result<(), LogError> {
        if self.is_initialized() {
            return Err(LogError::AlreadyInitialized);
        }
        if name.is_empty() {
            return Err(LogError::InvalidArgument(
                "logger name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn check_initialized(&self) -> Result<(), LogError> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(LogError::FailedPrecondition(
                "logger not initialized".to_string(),
            ))
        }
    }

    pub fn mark_initialized(&mut self, name: &str, level: LogLevel) {
        self.name = Some(name.to_owned());
        self.store_level(level);
        self.initialized.store(true, Ordering::Release);
    }

    /// Returns whether the state was initialized before the call.
    pub fn mark_shutdown(&self) -> bool {
        self.initialized.swap(false, Ordering::AcqRel)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    pub fn level(&self) -> LogLevel {
        LogLevel::from_int(self.level.load(Ordering::Acquire)).unwrap_or_default()
    }

    pub fn store_level(&self, level: LogLevel) {
        self.level.store(level.as_int(), Ordering::Release);
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.is_initialized() && is_level_enabled(self.level(), level)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Default for AdapterState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_is_enabled_before_init() {
        let state = AdapterState::new();
        assert!(LogLevel::ALL.iter().all(|level| !state.is_enabled(*level)));
        assert!(matches!(
            state.check_initialized(),
            Err(LogError::FailedPrecondition(_))
        ));
    }

    #[test]
    fn init_checks_run_in_order() {
        let mut state = AdapterState::new();
        assert!(matches!(
            state.check_init(""),
            Err(LogError::InvalidArgument(_))
        ));
        state.mark_initialized("core", LogLevel::Warn);
        assert!(matches!(
            state.check_init(""),
            Err(LogError::AlreadyInitialized)
        ));
        assert_eq!(state.name(), Some("core"));
    }

    #[test]
    fn shutdown_reports_previous_state_once() {
        let mut state = AdapterState::new();
        state.mark_initialized("core", LogLevel::Info);
        assert!(state.is_enabled(LogLevel::Info));
        assert!(!state.is_enabled(LogLevel::Debug));
        assert!(state.mark_shutdown());
        assert!(!state.mark_shutdown());
        assert!(!state.is_enabled(LogLevel::Critical));
        assert_eq!(state.level(), LogLevel::Info);
    }
}
