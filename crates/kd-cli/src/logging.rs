use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub const DEBUG_LOG_FILE: &str = ".kd-orchestrate-debug.log";

/// Install the global subscriber.
///
/// With `debug`, everything at `debug` and above goes to
/// [`DEBUG_LOG_FILE`] in the working directory and the returned guard must
/// be held until exit. Otherwise warnings go to stderr; `RUST_LOG`
/// overrides the level in both modes.
pub fn init(debug: bool) -> Option<WorkerGuard> {
    if debug {
        let file_appender = tracing_appender::rolling::never(".", DEBUG_LOG_FILE);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::fmt()
            .with_writer(non_blocking)
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_ansi(false)
            .init();

        Some(guard)
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_target(false)
            .init();

        None
    }
}
