use polylog::logger::*;
use polylog::settings::DiagnosticsSettings;
use polylog::{BackendKind, LogLevel, SinkOptions};

fn main() -> anyhow::Result<()> {
    let diagnostics = DiagnosticsSubscriber::new_bootstrap();
    trace!("bootstrap trace log");
    debug!("bootstrap debug log");
    info!("bootstrap info log");

    let config = DiagnosticsSettings {
        filter: "debug".to_string(),
    };
    diagnostics.reload_from_config(&config)?;
    trace!("application trace log");
    debug!("application debug log");
    info!("application info log");

    // Each backend writes demo_<backend>.log; the diagnostics subscriber above
    // never sees these lines.
    for kind in [BackendKind::Tracing, BackendKind::EnvLogger] {
        if !kind.is_compiled() {
            warn!(%kind, "backend not compiled in, skipping");
            continue;
        }
        let mut logger = Logger::new(kind, SinkOptions::default())?;
        logger.init(&format!("demo_{kind}"), LogLevel::Debug)?;
        logger.debug(format_args!("hello from {kind}"));
        logger.set_level(LogLevel::Warn)?;
        logger.info("filtered out");
        logger.warn("still visible");
        logger.shutdown();
    }

    Ok(())
}
