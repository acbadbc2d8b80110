//! `format_args!`-style macros over a [`Logger`](crate::logger::Logger) and
//! over the default logger.
//!
//! ```no_run
//! use polylog::{global_info, log_warn};
//!
//! let logger = polylog::logger::default_logger();
//! log_warn!(logger, "success rate: {:.1}%", 98.5);
//! global_info!("user {} did {}", 12345, "login");
//! ```

#[macro_export]
macro_rules! log_trace {
    ($logger:expr, $($arg:tt)+) => {
        $logger.logf($crate::domain_model::LogLevel::Trace, format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.logf($crate::domain_model::LogLevel::Debug, format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.logf($crate::domain_model::LogLevel::Info, format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)+) => {
        $logger.logf($crate::domain_model::LogLevel::Warn, format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.logf($crate::domain_model::LogLevel::Error, format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_critical {
    ($logger:expr, $($arg:tt)+) => {
        $logger.logf($crate::domain_model::LogLevel::Critical, format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! global_trace {
    ($($arg:tt)+) => {
        $crate::log_trace!($crate::logger::default_logger(), $($arg)+)
    };
}

#[macro_export]
macro_rules! global_debug {
    ($($arg:tt)+) => {
        $crate::log_debug!($crate::logger::default_logger(), $($arg)+)
    };
}

#[macro_export]
macro_rules! global_info {
    ($($arg:tt)+) => {
        $crate::log_info!($crate::logger::default_logger(), $($arg)+)
    };
}

#[macro_export]
macro_rules! global_warn {
    ($($arg:tt)+) => {
        $crate::log_warn!($crate::logger::default_logger(), $($arg)+)
    };
}

#[macro_export]
macro_rules! global_error {
    ($($arg:tt)+) => {
        $crate::log_error!($crate::logger::default_logger(), $($arg)+)
    };
}

#[macro_export]
macro_rules! global_critical {
    ($($arg:tt)+) => {
        $crate::log_critical!($crate::logger::default_logger(), $($arg)+)
    };
}
