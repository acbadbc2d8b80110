use super::Parser;
use crate::domain_model::{BackendKind, LogLevel};

#[derive(Parser, Debug)]
pub struct Cli {
    #[arg(long)]
    pub settings: Option<String>,

    /// Overrides `log.backend` (tracing, env_logger)
    #[arg(long)]
    pub backend: Option<BackendKind>,

    /// Overrides `log.level` (trace, debug, info, warn, error, critical)
    #[arg(long)]
    pub level: Option<LogLevel>,

    /// Overrides `log.name`
    #[arg(long)]
    pub name: Option<String>,
}

impl Cli {
    pub fn apply(&self, settings: &mut super::Settings) {
        if let Some(backend) = self.backend {
            settings.log.backend = backend;
        }
        if let Some(level) = self.level {
            settings.log.level = level;
        }
        if let Some(name) = &self.name {
            settings.log.name = name.clone();
        }
    }
}
