//! Logging initialisation.
//!
//! Log output goes to stderr so that `--json` output on stdout stays clean.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when neither RUST_LOG nor a configured filter is present
pub const DEFAULT_FILTER: &str = "warn";

/// Pick the filter directive: RUST_LOG wins, then `configured`, then
/// [`DEFAULT_FILTER`].
pub fn filter_directive(rust_log: Option<&str>, configured: Option<&str>) -> String {
    rust_log
        .filter(|value| !value.trim().is_empty())
        .or(configured)
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// Install the global tracing subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(configured: Option<&str>) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let directive = filter_directive(rust_log.as_deref(), configured);
    let env_filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| {
        eprintln!("Warning: invalid log filter '{directive}', using '{DEFAULT_FILTER}'");
        EnvFilter::new(DEFAULT_FILTER)
    });

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(std::env::var_os("NO_COLOR").is_none()),
        )
        .with(env_filter)
        .try_init();
}
