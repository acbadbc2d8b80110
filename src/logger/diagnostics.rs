use crate::settings::DiagnosticsSettings;
use anyhow::{Result, anyhow};
use tracing_subscriber::{
    EnvFilter, Registry, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt,
};

/// Process-wide `tracing` subscriber for the crate's own diagnostics
/// (default-logger replacement, backend init failures), printed to stderr.
///
/// It is unrelated to [`super::Logger`] output: each logger writes its own
/// `<name>.log` file and console stream through a private dispatch or
/// `env_logger` instance, so logger messages never reach this subscriber and
/// its filter does not affect them.
pub struct DiagnosticsSubscriber {
    reload_handle: reload::Handle<EnvFilter, Registry>,
}

impl DiagnosticsSubscriber {
    pub fn new_bootstrap() -> Self {
        let filter = EnvFilter::new("info");
        let (filter, reload_handle) = reload::Layer::new(filter);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();

        Self { reload_handle }
    }

    pub fn reload_from_config(&self, config: &DiagnosticsSettings) -> Result<()> {
        let filter = EnvFilter::try_new(&config.filter).map_err(|e| anyhow!(e))?;
        self.reload_handle.reload(filter).map_err(|e| anyhow!(e))?;
        Ok(())
    }
}
