use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{env_bool, env_string};

const LOG_FILE_PREFIX: &str = "flashdeck.log";

/// Used when `RUST_LOG` is unset or unparsable
pub const DEFAULT_LOG_FILTER: &str = "flashdeck_backend=info,flashdeck_core=info,tower_http=info,warn";

/// Keeps the non-blocking file writer alive; drop it only at shutdown.
pub struct FileLogGuard {
    _guard: WorkerGuard,
}

pub fn file_logging_enabled() -> bool {
    env_bool("ENABLE_FILE_LOGS").unwrap_or(false)
}

fn build_filter(log_level: &str) -> EnvFilter {
    let log_level = log_level.trim();
    if log_level.is_empty() {
        return EnvFilter::new(DEFAULT_LOG_FILTER);
    }
    EnvFilter::try_new(log_level).unwrap_or_else(|err| {
        eprintln!("invalid log filter {log_level:?} ({err}), using {DEFAULT_LOG_FILTER}");
        EnvFilter::new(DEFAULT_LOG_FILTER)
    })
}

pub fn init_tracing(log_level: &str) -> Option<FileLogGuard> {
    let env_filter = build_filter(log_level);
    let stdout_layer = fmt::layer().with_target(true);

    if file_logging_enabled() {
        let log_dir = env_string("LOG_DIR").unwrap_or_else(|| "./logs".to_string());
        if let Err(err) = std::fs::create_dir_all(&log_dir) {
            eprintln!("failed to create log directory {log_dir}: {err}");
        } else {
            let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_PREFIX);
            let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
            let file_layer = fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_target(true);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(stdout_layer)
                .with(file_layer)
                .init();

            tracing::info!(log_dir = %log_dir, "file logging enabled");

            return Some(FileLogGuard { _guard: guard });
        }
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .init();

    None
}
