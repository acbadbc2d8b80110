//! The `settings` module loads [`Settings`] from a TOML file plus
//! `POLYLOG__*` environment overrides. See `bin/settings_demo.rs`.

mod cli;
pub use clap::Parser;
pub use cli::*;

mod settings;
pub use settings::*;
