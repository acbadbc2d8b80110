//! The `logger` module holds the [`Logger`] facade, the process-wide default
//! logger and the logging macros. See `bin/logger_demo.rs` for the
//! diagnostics subscriber.

mod diagnostics;
mod global;
mod logger;
mod macros;

pub use diagnostics::*;
pub use global::*;
pub use logger::*;

pub use tracing::{debug, error, info, trace, warn};
