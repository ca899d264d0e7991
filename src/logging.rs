use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber. `RUST_LOG` overrides the default level.
///
/// With a `log_dir` the output goes to a daily rolling `<file_name>` there;
/// keep the returned guard alive until exit so buffered lines get flushed.
pub fn init(log_dir: Option<&Path>, file_name: &str) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    match log_dir {
        Some(dir) => {
            let file_appender = rolling::daily(dir, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(non_blocking)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}
