//! The default logger is process-wide, so everything touching it lives in a
//! single test.

use polylog::logger::*;
use polylog::settings::LogSettings;
use polylog::{LogError, LogLevel, SinkOptions, global_info, global_warn};
use std::fs;
use std::sync::Arc;

#[test]
fn default_logger_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    set_default_sinks(SinkOptions::file_only(dir.path()));

    // lazily created with the fixed defaults, same instance until replaced
    let first = default_logger();
    assert_eq!(first.name(), Some(DEFAULT_LOGGER_NAME));
    assert_eq!(first.level(), LogLevel::Info);
    assert!(Arc::ptr_eq(&first, &default_logger()));
    global_info!("lazily created default logger");
    first.flush();
    let out = fs::read_to_string(dir.path().join(format!("{DEFAULT_LOGGER_NAME}.log"))).unwrap();
    assert!(out.contains("lazily created default logger"));

    // re-init shuts the previous instance down
    init_default_logger("global_reinit", LogLevel::Debug).unwrap();
    assert!(!first.is_enabled(LogLevel::Critical));
    let second = default_logger();
    assert_eq!(second.name(), Some("global_reinit"));
    assert_eq!(second.level(), LogLevel::Debug);
    assert!(dir.path().join("global_reinit.log").exists());

    // a failed re-init still replaces the instance and reports the error
    assert!(matches!(
        init_default_logger("", LogLevel::Info),
        Err(LogError::InvalidArgument(_))
    ));
    assert!(!second.is_enabled(LogLevel::Critical));
    assert!(!default_logger().is_enabled(LogLevel::Critical));

    // explicit ownership through the guard
    let settings = LogSettings {
        name: "global_guarded".to_string(),
        level: LogLevel::Warn,
        directory: dir.path().to_path_buf(),
        console: false,
        ..LogSettings::default()
    };
    let guard = install_default_logger(&settings).unwrap();
    assert!(Arc::ptr_eq(guard.logger(), &default_logger()));
    global_warn!("through the {} logger", "guarded");
    global_info!("below the guarded level");
    let guarded = guard.logger().clone();
    drop(guard);
    assert!(!guarded.is_enabled(LogLevel::Critical));

    let out = fs::read_to_string(dir.path().join("global_guarded.log")).unwrap();
    assert!(out.contains("through the guarded logger"));
    assert!(!out.contains("below the guarded level"));

    // caller-built instance, then explicit teardown
    let mut custom = polylog::Logger::new(
        polylog::BackendKind::default(),
        SinkOptions::file_only(dir.path()),
    )
    .unwrap();
    custom.init("global_custom", LogLevel::Trace).unwrap();
    let installed = init_default_logger_with(custom);
    assert_eq!(default_logger().name(), Some("global_custom"));
    shutdown_default_logger();
    shutdown_default_logger();
    assert!(!installed.is_enabled(LogLevel::Critical));
    assert!(!Arc::ptr_eq(&installed, &default_logger()));
    shutdown_default_logger();
}
