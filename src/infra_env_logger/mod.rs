//! `log` + `env_logger` backend.

mod env_logger_backend;
pub use env_logger_backend::*;
