//! Log subscriber setup
//!
//! Output shape comes from the `[logging]` config section. `RUST_LOG`, when
//! set, replaces the configured level entirely.

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter, Layer,
};

use crate::config::LoggingConfig;

/// Install the global subscriber
///
/// Fails if one is already installed.
pub fn init(logging: &LoggingConfig) -> Result<(), TryInitError> {
    let format = fmt::layer()
        .with_target(logging.include_target)
        .with_thread_ids(logging.include_thread_ids);

    // Both branches are boxed so the registry type does not depend on the format.
    let output = if logging.json_format {
        format.json().with_current_span(true).with_span_list(false).boxed()
    } else {
        format.boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter(&logging.level))
        .with(output)
        .try_init()
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_configured_level_applies_without_rust_log() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert_eq!(env_filter("warn").max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_second_init_fails() {
        let logging = LoggingConfig::default();
        let _ = init(&logging);

        assert!(init(&logging).is_err());
    }
}
