//! Logging for Faultline
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and a text or
//! JSON `fmt` layer.

use faultline_config::{LogFormat, TelemetryConfig};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global subscriber from configuration
///
/// `RUST_LOG`, when set, takes precedence over the configured filter.
///
/// # Errors
///
/// Returns an error if the filter is invalid or a global subscriber is
/// already installed
pub fn init(config: &TelemetryConfig) -> anyhow::Result<()> {
    let filter = build_filter(config)?;

    match config.format {
        LogFormat::Json => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(true)
                .with_span_list(false);

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init()
                .map_err(|e| anyhow::anyhow!("failed to install subscriber: {e}"))?;
        }
        LogFormat::Text => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false);

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init()
                .map_err(|e| anyhow::anyhow!("failed to install subscriber: {e}"))?;
        }
    }

    Ok(())
}

fn build_filter(config: &TelemetryConfig) -> anyhow::Result<EnvFilter> {
    match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.trim().is_empty() => {
            EnvFilter::try_new(&directives).map_err(|e| anyhow::anyhow!("invalid {}: {e}", EnvFilter::DEFAULT_ENV))
        }
        _ => EnvFilter::try_new(&config.log_filter)
            .map_err(|e| anyhow::anyhow!("invalid log filter '{}': {e}", config.log_filter)),
    }
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::filter::LevelFilter;

    use super::*;

    #[test]
    fn configured_filter_is_used_without_rust_log() {
        temp_env::with_var_unset("RUST_LOG", || {
            let config = TelemetryConfig {
                log_filter: "warn,faultline_server=debug".to_string(),
                format: LogFormat::Text,
            };
            let filter = build_filter(&config).unwrap();
            assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
        });
    }

    #[test]
    fn rust_log_takes_precedence() {
        temp_env::with_var("RUST_LOG", Some("error"), || {
            let filter = build_filter(&TelemetryConfig::default()).unwrap();
            assert_eq!(filter.max_level_hint(), Some(LevelFilter::ERROR));
        });
    }

    #[test]
    fn invalid_rust_log_is_reported() {
        temp_env::with_var("RUST_LOG", Some("x=loud"), || {
            let err = build_filter(&TelemetryConfig::default()).unwrap_err();
            assert!(err.to_string().contains("RUST_LOG"));
        });
    }
}
