//! `tracing` + `tracing-subscriber` backend.

mod tracing_backend;
pub use tracing_backend::*;
