//! Logging Infrastructure
//!
//! Console logging, plus daily rolling files when a log directory is given.

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize the logger with console output only
pub fn init_logger(level: &str) {
    init_logger_with_file(level, false, None);
}

/// Initialize the logger with optional file output
///
/// `RUST_LOG` wins when set; otherwise `level` applies to this crate and
/// `tower_http`, everything else stays at `warn`.
pub fn init_logger_with_file(level: &str, json: bool, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("warn,admin_server={level},tower_http={level}"))
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists() {
            let file_appender = tracing_appender::rolling::daily(log_path, "admin-server");
            let builder = builder.with_writer(file_appender).with_ansi(false);
            let result = if json {
                builder.json().try_init()
            } else {
                builder.try_init()
            };
            if let Err(e) = result {
                eprintln!("Logger already initialized: {e}");
            }
            return;
        }
    }

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        eprintln!("Logger already initialized: {e}");
    }
}
