use polylog::logger::*;
use polylog::settings::*;
use polylog::{LogLevel, SinkOptions, global_info, log_critical, log_info, log_warn};
use std::thread;
use std::time::Duration;

const THREADS: usize = 4;
const MESSAGES_PER_THREAD: usize = 10;

fn basic_logging(logger: &Logger) {
    logger.trace("a TRACE message");
    logger.debug("a DEBUG message");
    logger.info("an INFO message");
    logger.warn("a WARN message");
    logger.error("an ERROR message");
    logger.critical("a CRITICAL message");
    logger.flush();
}

fn formatted_logging(logger: &Logger) {
    let user_id = 12345;
    let action = "login";
    let success_rate = 98.5;

    log_info!(logger, "user {} performed {}", user_id, action);
    log_warn!(logger, "success rate: {:.1}%", success_rate);
    logger.logf(LogLevel::Error, format_args!("request failed with {}", 404));
    logger.flush();
}

fn level_control(logger: &Logger) -> anyhow::Result<()> {
    let previous = logger.level();
    logger.set_level(LogLevel::Warn)?;
    logger.info("hidden at WARN");
    logger.warn("visible at WARN");
    log_critical!(logger, "visible at WARN too");

    logger.set_level(previous)?;
    logger.info(format_args!("level restored to {previous}"));
    logger.flush();
    Ok(())
}

fn custom_logger(settings: &LogSettings) -> anyhow::Result<()> {
    let mut custom = Logger::new(settings.backend, SinkOptions::file_only(&settings.directory))?;
    custom.init("custom_logger", LogLevel::Debug)?;
    custom.info("message from a custom logger");
    log_warn!(custom, "custom logger warning: {}", "test");
    custom.shutdown();
    Ok(())
}

fn multi_threaded(logger: &Logger) {
    thread::scope(|scope| {
        for thread_id in 0..THREADS {
            scope.spawn(move || {
                for i in 0..MESSAGES_PER_THREAD {
                    log_info!(logger, "thread {} message {}", thread_id, i);
                    thread::sleep(Duration::from_millis(10));
                }
            });
        }
    });
    logger.flush();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let diagnostics = DiagnosticsSubscriber::new_bootstrap();

    let mut project_settings = parse_settings(cli.settings.as_deref())?;
    cli.apply(&mut project_settings);
    info!(?project_settings);
    diagnostics.reload_from_config(&project_settings.diagnostics)?;

    let guard = install_default_logger(&project_settings.log)?;
    let logger = guard.logger().clone();

    basic_logging(&logger);
    formatted_logging(&logger);
    level_control(&logger)?;
    global_info!("{} + {} = {}", 10, 20, 30);
    custom_logger(&project_settings.log)?;
    multi_threaded(&logger);

    drop(guard);
    Ok(())
}
