//! Tracing initialization and subscriber setup.

use super::file_writer::FileWriter;
use crate::infrastructure::paths::LOG_FILE;
use crate::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive when neither `RUST_LOG` nor the config sets one.
const DEFAULT_LEVEL: &str = "info";

/// Initializes the global tracing subscriber.
///
/// # Level Resolution
///
/// 1. `RUST_LOG` environment variable, if set and non-empty
/// 2. `config.trace_level`
/// 3. Default: `"info"`
///
/// An invalid directive falls back to the default level.
///
/// # Sinks
///
/// - `<data_dir>/search-images.log` through a rotating [`FileWriter`], when the
///   data directory can be created
/// - stderr, when `stderr` is `true` or the log file is unavailable
///
/// Safe to call multiple times; only the first call installs a subscriber.
/// Failures never abort the program.
pub fn init_tracing(config: &Config, stderr: bool) {
    let directive = resolve_directive(
        std::env::var("RUST_LOG").ok(),
        config.trace_level.as_deref(),
    );
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let data_dir = config.resolved_data_dir();
    let file_layer = std::fs::create_dir_all(&data_dir).ok().map(|()| {
        fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_writer(FileWriter::new(data_dir.join(LOG_FILE)))
    });

    let stderr_layer = (stderr || file_layer.is_none())
        .then(|| fmt::layer().with_writer(std::io::stderr));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init();
}

fn resolve_directive(env: Option<String>, configured: Option<&str>) -> String {
    env.filter(|d| !d.trim().is_empty())
        .or_else(|| configured.map(str::to_string))
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_wins_over_config() {
        assert_eq!(resolve_directive(Some("trace".into()), Some("warn")), "trace");
    }

    #[test]
    fn config_used_when_environment_blank() {
        assert_eq!(resolve_directive(Some("  ".into()), Some("warn")), "warn");
    }

    #[test]
    fn defaults_to_info() {
        assert_eq!(resolve_directive(None, None), "info");
        assert_eq!(resolve_directive(None, Some("")), "info");
    }
}
